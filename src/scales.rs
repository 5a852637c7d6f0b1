// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time-scale markers.
//!
//! Every marker states where its zero lies on the terrestrial Julian-day
//! axis. Most scales differ from JD(TT) by a constant; only [`UT`] needs a
//! model, because Earth rotation drifts against atomic time.
//!
//! | Marker | Axis | Offset to JD(TT) |
//! |--------|------|------------------|
//! | [`JD`]  | TT | none |
//! | [`JDE`] | TT | none (ephemeris argument) |
//! | [`MJD`] | TT | + 2 400 000.5 d |
//! | [`TT`]  | TT | none |
//! | [`TAI`] | atomic | + 32.184 s |
//! | [`UT`]  | Earth rotation | + ΔT(year) |

use super::instant::{Time, TimeScale};
use crate::delta_t::nasa_delta_t;
use crate::julian_date_ext::decimal_year_of;
use qtty::{Day, Days, Seconds};

/// Fixed offset TT − TAI.
pub const TT_MINUS_TAI: Seconds = Seconds::new(32.184);

macro_rules! constant_offset_scale {
    ($(#[$doc:meta])* $name:ident, $abbreviation:literal, $offset:expr) => {
        $(#[$doc])*
        #[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
        pub struct $name;

        impl TimeScale for $name {
            const ABBREVIATION: &'static str = $abbreviation;
            const OFFSET: Days = $offset;
        }
    };
}

constant_offset_scale!(
    /// Julian Date on the TT axis.
    JD, "JD", Days::new(0.0)
);

constant_offset_scale!(
    /// Julian Ephemeris Day, the argument of every series in this crate.
    ///
    /// Same numbers as [`JD`]. The separate marker keeps "this value feeds an
    /// ephemeris" visible in signatures.
    JDE, "JDE", Days::new(0.0)
);

constant_offset_scale!(
    /// Modified Julian Date, JD minus 2 400 000.5.
    MJD, "MJD", Days::new(2_400_000.5)
);

constant_offset_scale!(
    /// Terrestrial Time as a Julian day count.
    TT, "TT", Days::new(0.0)
);

constant_offset_scale!(
    /// International Atomic Time as a Julian day count. `TT = TAI + 32.184 s`.
    TAI, "TAI", Days::new(32.184 / 86_400.0)
);

/// Universal Time (UT1) as a Julian day count.
///
/// Reaching the TT axis adds ΔT from the NASA polynomial model. Leaving it
/// solves `ut + ΔT(ut) = tt` by fixed point; ΔT changes by about 1e-8 s per
/// second, so three passes settle far below a microsecond.
///
/// Other ΔT sources go through [`ut1_to_tt`](crate::ut1_to_tt) and
/// [`tt_to_ut1`](crate::tt_to_ut1).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct UT;

impl TimeScale for UT {
    const ABBREVIATION: &'static str = "UT";
    const OFFSET: Days = Days::new(0.0);

    fn to_terrestrial(native: Days) -> Days {
        native + ut_delta_t(native).to::<Day>()
    }

    fn from_terrestrial(jd_tt: Days) -> Days {
        (0..3).fold(jd_tt, |ut, _| jd_tt - ut_delta_t(ut).to::<Day>())
    }
}

#[inline]
fn ut_delta_t(jd_ut: Days) -> Seconds {
    nasa_delta_t(decimal_year_of(jd_ut))
}

impl Time<UT> {
    /// ΔT = TT − UT at this instant, NASA model.
    #[inline]
    pub fn delta_t(&self) -> Seconds {
        ut_delta_t(self.quantity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtty::Second;

    #[test]
    fn mjd_is_shifted_julian_date() {
        let mjd = Time::<JD>::new(2_451_545.0).to::<MJD>();
        assert!((mjd.value() - 51_544.5).abs() < 1e-10, "MJD {}", mjd.value());
        assert!((mjd.to::<JD>().value() - 2_451_545.0).abs() < 1e-10);
    }

    #[test]
    fn tai_lags_tt_by_fixed_offset() {
        let tai = Time::<TAI>::new(2_451_545.0);
        let lag = (tai.to::<TT>() - Time::<TT>::new(tai.value())).to::<Second>();
        // A JD near 2.45e6 resolves to about 4e-5 s.
        assert!((lag - TT_MINUS_TAI).abs() < Seconds::new(1e-4), "{lag}");
    }

    #[test]
    fn jde_shares_the_tt_axis() {
        let jde = Time::<JDE>::new(2_448_976.5);
        assert_eq!(jde.to::<TT>().value(), 2_448_976.5);
        assert_eq!(jde.to::<JD>().value(), 2_448_976.5);
    }

    #[test]
    fn ut_reaches_tt_through_delta_t() {
        let ut = Time::<UT>::new(2_451_545.0);
        let gap = (ut.to::<TT>().quantity() - ut.quantity()).to::<Second>();
        assert!(
            (gap - Seconds::new(63.86)).abs() < Seconds::new(0.01),
            "UT → TT gap {gap}, expected about 63.86 s"
        );
        assert!((gap - ut.delta_t()).abs() < Seconds::new(1e-4));
    }

    #[test]
    fn ut_inverse_settles() {
        for jd in [2_305_447.5, 2_443_192.5, 2_460_676.5] {
            let tt = Time::<TT>::new(jd);
            let back = tt.to::<UT>().to::<TT>();
            assert!(
                (back - tt).abs() < Days::new(1e-9),
                "round trip at {jd}: {} d",
                (back - tt).abs()
            );
        }
    }
}
