// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # ΔT (Delta T): TT − UT1 models
//!
//! Two independently selectable estimators, both indexed by **decimal year**:
//!
//! | Model | Source | Shape |
//! |-------|--------|-------|
//! | [`DeltaTModel::Nasa`] | Espenak & Meeus (NASA eclipse pages) | continuous piecewise polynomials |
//! | [`DeltaTModel::Meeus`] | Meeus, *Astronomical Algorithms* ch. 10 | polynomials + biennial table 1620–1998 |
//!
//! Anything that can produce ΔT for a year implements [`DeltaTSource`]: the
//! model enum, a caller-supplied [`DeltaTTable`], or a closure wrapped in
//! [`DeltaTFn`]. The time-scale converter and the lunar/seasonal finders
//! accept any of them.
//!
//! ```rust
//! use ephemera::{delta_t, DeltaTModel};
//!
//! let nasa = delta_t(2000.0, DeltaTModel::Nasa)?;
//! let meeus = delta_t(2000.0, DeltaTModel::Meeus)?;
//! assert!((nasa.value() - 63.86).abs() < 1e-9);
//! assert!((meeus.value() - 65.0).abs() < 1e-9);
//! # Ok::<(), ephemera::EphemerisError>(())
//! ```

mod nasa;
mod table;

pub use nasa::lunar_ephemeris_correction;
pub(crate) use nasa::nasa_delta_t;
pub use table::{DeltaTSample, DeltaTTable};

use crate::errors::{EphemerisError, EphemerisResult};
use crate::julian_date_ext::decimal_year_of;
use chrono::{Datelike, NaiveDate};
use qtty::{Days, Seconds};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Selects one of the built-in ΔT estimators.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeltaTModel {
    /// Continuous polynomial model with the lunar-ephemeris correction.
    #[default]
    Nasa,
    /// Table-and-polynomial model over the bundled biennial samples.
    Meeus,
}

/// ΔT in seconds for `decimal_year` under `model`.
///
/// The NASA model never fails. The Meeus model fails with
/// [`DataNotFound`](EphemerisError::DataNotFound) only if the bundled table
/// were missing an even-year sample it brackets.
pub fn delta_t(decimal_year: f64, model: DeltaTModel) -> EphemerisResult<Seconds> {
    model.delta_t(decimal_year)
}

// ── Injected ΔT source ────────────────────────────────────────────────────

/// Anything that yields ΔT = TT − UT1 for a decimal year.
pub trait DeltaTSource {
    /// ΔT in seconds at `decimal_year`.
    fn delta_t(&self, decimal_year: f64) -> EphemerisResult<Seconds>;

    /// ΔT at a raw Julian Day, using `2000 + (jd − J2000)/365.25` as the year.
    fn delta_t_at(&self, jd: Days) -> EphemerisResult<Seconds> {
        self.delta_t(decimal_year_of(jd))
    }
}

impl DeltaTSource for DeltaTModel {
    fn delta_t(&self, decimal_year: f64) -> EphemerisResult<Seconds> {
        match self {
            DeltaTModel::Nasa => Ok(nasa_delta_t(decimal_year)),
            DeltaTModel::Meeus => DeltaTTable::meeus().delta_t(decimal_year),
        }
    }
}

impl DeltaTSource for DeltaTTable {
    fn delta_t(&self, decimal_year: f64) -> EphemerisResult<Seconds> {
        DeltaTTable::delta_t(self, decimal_year)
    }
}

/// Adapts a closure `Fn(decimal_year) -> EphemerisResult<Seconds>` into a
/// [`DeltaTSource`].
///
/// ```rust
/// use ephemera::{DeltaTFn, DeltaTSource, EphemerisResult};
/// use qtty::Seconds;
///
/// let fixed = DeltaTFn(|_year: f64| -> EphemerisResult<Seconds> { Ok(Seconds::new(69.2)) });
/// assert_eq!(fixed.delta_t(2024.5)?.value(), 69.2);
/// # Ok::<(), ephemera::EphemerisError>(())
/// ```
#[derive(Debug, Copy, Clone)]
pub struct DeltaTFn<F>(pub F);

impl<F> DeltaTSource for DeltaTFn<F>
where
    F: Fn(f64) -> EphemerisResult<Seconds>,
{
    fn delta_t(&self, decimal_year: f64) -> EphemerisResult<Seconds> {
        (self.0)(decimal_year)
    }
}

// ── Decimal year ──────────────────────────────────────────────────────────

/// Decimal year from calendar components.
///
/// - `month == 0`: the year alone (`day` must be 0 too).
/// - `day == 0`: mid-month, `year + (month − 0.5)/12`.
/// - otherwise mid-day, `year + (day_of_year − 0.5)/days_in_year`.
///
/// ```rust
/// use ephemera::decimal_year;
///
/// assert_eq!(decimal_year(1990, 0, 0)?, 1990.0);
/// assert!((decimal_year(1990, 7, 0)? - 1990.541_666_666_7).abs() < 1e-9);
/// # Ok::<(), ephemera::EphemerisError>(())
/// ```
pub fn decimal_year(year: i32, month: u32, day: u32) -> EphemerisResult<f64> {
    if month > 12 {
        return Err(EphemerisError::invalid_argument(
            "month",
            format!("must be within 0..=12, got {month}"),
        ));
    }
    if month == 0 {
        if day != 0 {
            return Err(EphemerisError::invalid_argument(
                "day",
                format!("must be 0 when month is unset, got {day}"),
            ));
        }
        return Ok(year as f64);
    }
    if day == 0 {
        return Ok(year as f64 + (month as f64 - 0.5) / 12.0);
    }

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        EphemerisError::invalid_argument(
            "day",
            format!("{year:04}-{month:02}-{day:02} is not a calendar date"),
        )
    })?;
    let days_in_year = if date.leap_year() { 366.0 } else { 365.0 };
    Ok(year as f64 + (date.ordinal() as f64 - 0.5) / days_in_year)
}
