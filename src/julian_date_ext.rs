// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Epoch-relative time arguments on `Time<JD>`.
//!
//! The series in this crate take their argument as elapsed Julian
//! millennia (VSOP87) or centuries (FK5, nutation, seasons) since J2000.0.

use qtty::{Centuries, Days, Millennia};

use super::instant::Time;
use super::scales::JD;

const J2000: Days = Days::new(2_451_545.0);

impl Time<JD> {
    /// 2000-01-01T12:00:00 TT.
    pub const J2000: Self = Self::from_days(J2000);

    pub const JULIAN_YEAR: Days = Days::new(365.25);
    pub const JULIAN_CENTURY: Days = Days::new(36_525.0);
    pub const JULIAN_MILLENNIUM: Days = Days::new(365_250.0);

    /// τ, the VSOP87 argument.
    #[inline]
    pub fn julian_millennias(&self) -> Millennia {
        Millennia::new(elapsed_since_j2000(self.quantity(), Self::JULIAN_MILLENNIUM))
    }

    /// T, the argument of the FK5, nutation and seasonal polynomials.
    #[inline]
    pub fn julian_centuries(&self) -> Centuries {
        Centuries::new(elapsed_since_j2000(self.quantity(), Self::JULIAN_CENTURY))
    }

    #[inline]
    pub fn decimal_year(&self) -> f64 {
        decimal_year_of(self.quantity())
    }
}

fn elapsed_since_j2000(jd: Days, unit: Days) -> f64 {
    (jd - J2000).value() / unit.value()
}

/// `2000 + (jd − J2000) / 365.25` for a day count on any axis. ΔT sources
/// are indexed by this year.
#[inline]
pub(crate) fn decimal_year_of(jd: Days) -> f64 {
    2000.0 + elapsed_since_j2000(jd, Time::<JD>::JULIAN_YEAR)
}
