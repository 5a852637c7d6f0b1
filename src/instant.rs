// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Instants tagged with their time scale.
//!
//! A [`Time<S>`] is a day count whose zero and rate are fixed by the marker
//! `S`. Mixing universal and terrestrial instants is a type error; crossing
//! between them goes through [`Time::to`], which routes every conversion via
//! JD(TT).

use chrono::{DateTime, TimeDelta, Utc};
use qtty::{Day, Days, Second, Seconds};
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use super::scales::UT;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ── TimeScale ─────────────────────────────────────────────────────────────

/// A day-count scale and its relation to JD(TT).
///
/// Scales that differ from JD(TT) by a constant only declare [`OFFSET`];
/// scales driven by a model override the two conversion functions.
///
/// [`OFFSET`]: TimeScale::OFFSET
pub trait TimeScale: Copy + fmt::Debug + PartialEq + PartialOrd + 'static {
    /// Short name used when an instant is displayed.
    const ABBREVIATION: &'static str;

    /// JD(TT) of this scale's zero.
    const OFFSET: Days;

    #[inline]
    fn to_terrestrial(native: Days) -> Days {
        native + Self::OFFSET
    }

    #[inline]
    fn from_terrestrial(jd_tt: Days) -> Days {
        jd_tt - Self::OFFSET
    }
}

// ── Time<S> ───────────────────────────────────────────────────────────────

/// An instant on scale `S`, stored as days.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Time<S: TimeScale> {
    days: Days,
    scale: PhantomData<S>,
}

/// 1970-01-01T00:00:00 as a Julian day on the UT axis.
const UNIX_EPOCH_UT: Days = Days::new(2_440_587.5);

impl<S: TimeScale> Time<S> {
    #[inline]
    pub const fn new(days: f64) -> Self {
        Self::from_days(Days::new(days))
    }

    #[inline]
    pub const fn from_days(days: Days) -> Self {
        Self {
            days,
            scale: PhantomData,
        }
    }

    #[inline]
    pub const fn quantity(&self) -> Days {
        self.days
    }

    #[inline]
    pub const fn value(&self) -> f64 {
        self.days.value()
    }

    /// The same instant on scale `T`.
    #[inline]
    pub fn to<T: TimeScale>(&self) -> Time<T> {
        Time::from_days(T::from_terrestrial(S::to_terrestrial(self.days)))
    }

    /// Reads a civil timestamp as UT1 and places it on this scale.
    ///
    /// UTC and UT1 differ by under a second; callers that need the exact
    /// difference apply [`ut1_minus_utc`](crate::ut1_minus_utc) themselves.
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        let whole = Seconds::new(datetime.timestamp() as f64);
        let fraction = Seconds::new(f64::from(datetime.timestamp_subsec_nanos()) * 1e-9);
        Time::<UT>::from_days(UNIX_EPOCH_UT + (whole + fraction).to::<Day>()).to::<S>()
    }

    /// This instant as a civil timestamp, reading UT1 as UTC.
    ///
    /// `None` outside the range chrono can represent.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        let since_epoch = (self.to::<UT>().quantity() - UNIX_EPOCH_UT)
            .to::<Second>()
            .value();
        if !since_epoch.is_finite() {
            return None;
        }
        let whole = since_epoch.floor();
        let nanos = ((since_epoch - whole) * 1e9) as i64;
        let offset =
            TimeDelta::try_seconds(whole as i64)? + TimeDelta::nanoseconds(nanos.min(999_999_999));
        DateTime::from_timestamp(0, 0)?.checked_add_signed(offset)
    }
}

impl<S: TimeScale> fmt::Display for Time<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", S::ABBREVIATION, self.days)
    }
}

#[cfg(feature = "serde")]
impl<S: TimeScale> Serialize for Time<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        self.value().serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, S: TimeScale> Deserialize<'de> for Time<S> {
    fn deserialize<De: Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        f64::deserialize(deserializer).map(Self::new)
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

/// Instants shift by day spans; two instants on one scale differ by a span.
impl<S: TimeScale> Add<Days> for Time<S> {
    type Output = Self;

    fn add(mut self, span: Days) -> Self {
        self += span;
        self
    }
}

impl<S: TimeScale> Sub<Days> for Time<S> {
    type Output = Self;

    fn sub(mut self, span: Days) -> Self {
        self -= span;
        self
    }
}

impl<S: TimeScale> AddAssign<Days> for Time<S> {
    fn add_assign(&mut self, span: Days) {
        self.days = self.days + span;
    }
}

impl<S: TimeScale> SubAssign<Days> for Time<S> {
    fn sub_assign(&mut self, span: Days) {
        self.days = self.days - span;
    }
}

impl<S: TimeScale> Sub for Time<S> {
    type Output = Days;

    fn sub(self, earlier: Self) -> Days {
        self.days - earlier.days
    }
}

// ── TimeInstant ───────────────────────────────────────────────────────────

/// Anything that can bound an [`Interval`](crate::Interval).
pub trait TimeInstant: Copy + PartialOrd {
    type Duration;

    /// Span from `earlier` to `self`.
    fn elapsed_since(&self, earlier: &Self) -> Self::Duration;
}

impl<S: TimeScale> TimeInstant for Time<S> {
    type Duration = Days;

    #[inline]
    fn elapsed_since(&self, earlier: &Self) -> Days {
        *self - *earlier
    }
}
