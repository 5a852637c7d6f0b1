// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Leap-second bookkeeping for TAI − UTC.
//!
//! Each [`LeapSecondEvent`] carries the first UTC day on which the new offset
//! applies (the second itself is inserted at the end of the previous day).
//! `TAI − UTC` on a date is the conventional 10 s of 1972-01-01 plus the sum
//! of every event effective on or before that date.

use crate::errors::{EphemerisError, EphemerisResult};
use chrono::{Datelike, NaiveDate};
use qtty::Seconds;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// TAI − UTC when integer leap seconds were introduced on 1972-01-01.
pub const INITIAL_TAI_MINUS_UTC: Seconds = Seconds::new(10.0);

/// A single inserted (`+1`) or removed (`−1`) leap second.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LeapSecondEvent {
    /// First UTC day with the new offset.
    pub date: NaiveDate,
    pub value: i8,
}

impl LeapSecondEvent {
    pub const fn new(date: NaiveDate, value: i8) -> Self {
        Self { date, value }
    }
}

/// IERS Bulletin C insertions as (year, month) of the effective first day.
#[rustfmt::skip]
const IERS_INSERTIONS: [(i32, u32); 27] = [
    (1972, 7), (1973, 1), (1974, 1), (1975, 1), (1976, 1), (1977, 1), (1978, 1),
    (1979, 1), (1980, 1), (1981, 7), (1982, 7), (1983, 7), (1985, 7), (1988, 1),
    (1990, 1), (1991, 1), (1992, 7), (1993, 7), (1994, 7), (1996, 1), (1997, 7),
    (1999, 1), (2006, 1), (2009, 1), (2012, 7), (2015, 7), (2017, 1),
];

/// A date-ordered list of leap-second events.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LeapSecondTable {
    events: Vec<LeapSecondEvent>,
}

impl Default for LeapSecondTable {
    fn default() -> Self {
        Self::iers()
    }
}

impl LeapSecondTable {
    /// The first UTC day covered by integer leap seconds.
    pub fn epoch() -> NaiveDate {
        NaiveDate::from_ymd_opt(1972, 1, 1).unwrap_or(NaiveDate::MIN)
    }

    /// The IERS list from 1972-07-01 through 2017-01-01 (TAI − UTC = 37 s).
    pub fn iers() -> Self {
        let events = IERS_INSERTIONS
            .iter()
            .filter_map(|&(y, m)| NaiveDate::from_ymd_opt(y, m, 1))
            .map(|date| LeapSecondEvent::new(date, 1))
            .collect();
        Self { events }
    }

    /// Builds a table from caller events, sorting them by date.
    ///
    /// Values outside `{−1, 0, +1}` are rejected with
    /// [`InvalidArgument`](EphemerisError::InvalidArgument).
    pub fn new(mut events: Vec<LeapSecondEvent>) -> EphemerisResult<Self> {
        if let Some(bad) = events.iter().find(|e| !(-1..=1).contains(&e.value)) {
            return Err(EphemerisError::invalid_argument(
                "value",
                format!("leap second on {} must be -1, 0 or +1, got {}", bad.date, bad.value),
            ));
        }
        events.sort();
        Ok(Self { events })
    }

    pub fn events(&self) -> &[LeapSecondEvent] {
        &self.events
    }

    /// Sum of the leap seconds effective on or before `date`.
    pub fn cumulative(&self, date: NaiveDate) -> i32 {
        let n = self.events.partition_point(|e| e.date <= date);
        self.events[..n].iter().map(|e| e.value as i32).sum()
    }

    /// TAI − UTC on `date`.
    ///
    /// Dates before 1972-01-01 fail with
    /// [`OutOfRange`](EphemerisError::OutOfRange): UTC then used fractional
    /// rate offsets that are not leap seconds.
    pub fn tai_minus_utc(&self, date: NaiveDate) -> EphemerisResult<Seconds> {
        let epoch = Self::epoch();
        if date < epoch {
            return Err(EphemerisError::out_of_range(
                "leap-second year",
                f64::from(date.year()),
                1972.0,
                f64::INFINITY,
            ));
        }
        Ok(INITIAL_TAI_MINUS_UTC + Seconds::new(self.cumulative(date) as f64))
    }
}
