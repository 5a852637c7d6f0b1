// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Half-open time intervals.
//!
//! - [`Interval<T>`]: interval over any [`TimeInstant`]
//! - [`Period<S>`]: scale-based alias for `Interval<Time<S>>`
//!
//! The phase and marker searches take a [`Period<UT>`]; its endpoints are
//! read as `[start, end)`.

use crate::errors::{EphemerisError, EphemerisResult};
use crate::instant::{Time, TimeInstant, TimeScale};
use chrono::{NaiveDate, NaiveTime};
use qtty::Days;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An interval between two instants, read as `[start, end)`.
///
/// # Examples
///
/// ```
/// use ephemera::{Interval, JulianDate};
///
/// let start = JulianDate::new(2451545.0);
/// let end = JulianDate::new(2451546.0);
/// let period = Interval::new(start, end);
/// assert!(period.contains(start));
/// assert!(!period.contains(end));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interval<T: TimeInstant> {
    pub start: T,
    pub end: T,
}

/// Time-scale period alias: `Period<UT>`, `Period<JDE>`, ...
pub type Period<S> = Interval<Time<S>>;

impl<T: TimeInstant> Interval<T> {
    /// Creates an interval without checking the endpoint order.
    pub fn new(start: T, end: T) -> Self {
        Interval { start, end }
    }

    /// Creates an interval, rejecting `end < start` with
    /// [`InvalidArgument`](EphemerisError::InvalidArgument).
    pub fn checked(start: T, end: T) -> EphemerisResult<Self> {
        let interval = Self::new(start, end);
        interval.validate()?;
        Ok(interval)
    }

    /// Fails with [`InvalidArgument`](EphemerisError::InvalidArgument) when
    /// the interval is inverted.
    pub fn validate(&self) -> EphemerisResult<()> {
        if self.end < self.start {
            return Err(EphemerisError::invalid_argument(
                "period",
                "end precedes start",
            ));
        }
        Ok(())
    }

    /// `end − start`.
    ///
    /// ```
    /// use ephemera::{Interval, JulianDate};
    /// use qtty::Days;
    ///
    /// let period = Interval::new(JulianDate::new(2451545.0), JulianDate::new(2451546.5));
    /// assert_eq!(period.duration(), Days::new(1.5));
    /// ```
    pub fn duration(&self) -> T::Duration {
        self.end.elapsed_since(&self.start)
    }

    /// Whether `instant` lies in `[start, end)`.
    #[inline]
    pub fn contains(&self, instant: T) -> bool {
        self.start <= instant && instant < self.end
    }
}

impl<T: TimeInstant + fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

impl<S: TimeScale> Interval<Time<S>> {
    /// Converts both endpoints to another time scale.
    ///
    /// ```
    /// use ephemera::{Period, Time, JD, MJD};
    ///
    /// let period_jd = Period::new(Time::<JD>::new(2451545.0), Time::<JD>::new(2451546.0));
    /// let period_mjd = period_jd.to::<MJD>();
    /// assert!((period_mjd.start.value() - 51544.5).abs() < 1e-12);
    /// ```
    #[inline]
    pub fn to<T: TimeScale>(&self) -> Period<T> {
        Interval::new(self.start.to::<T>(), self.end.to::<T>())
    }

    #[inline]
    pub fn duration_days(&self) -> Days {
        self.duration()
    }

    /// From January 1 00:00 UT of `year` to January 1 of `year + 1`.
    ///
    /// Fails with [`InvalidArgument`](EphemerisError::InvalidArgument) for
    /// years chrono cannot represent.
    pub fn calendar_year(year: i32) -> EphemerisResult<Self> {
        Ok(Self::new(new_year(year)?, new_year(year + 1)?))
    }
}

fn new_year<S: TimeScale>(year: i32) -> EphemerisResult<Time<S>> {
    let date = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| {
        EphemerisError::invalid_argument("year", format!("{year} is not a representable year"))
    })?;
    Ok(Time::<S>::from_utc(date.and_time(NaiveTime::MIN).and_utc()))
}
