// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Explicit conversions between UT1, TT, TAI and UTC.
//!
//! The typed scales ([`UT`], [`TT`], [`TAI`]) already convert through
//! `.to::<S>()` using the NASA ΔT model. The functions here take the ΔT
//! source and the leap-second list as injected collaborators instead.
//!
//! `tt_to_ut1` evaluates ΔT at the TT argument rather than solving
//! `UT1 = TT − ΔT(UT1)`. ΔT drifts by well under a millisecond per day, so the
//! two differ by nanoseconds in the modern era, and the one-sided form keeps
//! the published lunar and seasonal reference values reproducible.

use crate::angle::normalize_tau;
use crate::delta_t::DeltaTSource;
use crate::errors::{EphemerisError, EphemerisResult};
use crate::instant::Time;
use crate::leap_seconds::LeapSecondTable;
use crate::scales::{TAI, TT, TT_MINUS_TAI, UT};
use chrono::NaiveDate;
use qtty::{Day, Seconds};
use std::f64::consts::TAU;
use tracing::warn;

/// Nominal bound on |UT1 − UTC| maintained by the IERS.
pub const UT1_MINUS_UTC_NOMINAL_BOUND: Seconds = Seconds::new(0.9);

/// UT1 → TT: `jd_ut1 + ΔT(jd_ut1)/86400`.
pub fn ut1_to_tt<D>(jd_ut1: Time<UT>, delta_t: &D) -> EphemerisResult<Time<TT>>
where
    D: DeltaTSource + ?Sized,
{
    let dt = delta_t.delta_t_at(jd_ut1.quantity())?;
    Ok(Time::from_days(jd_ut1.quantity() + dt.to::<Day>()))
}

/// TT → UT1: `jd_tt − ΔT(jd_tt)/86400`, with ΔT taken at the TT argument.
pub fn tt_to_ut1<D>(jd_tt: Time<TT>, delta_t: &D) -> EphemerisResult<Time<UT>>
where
    D: DeltaTSource + ?Sized,
{
    let dt = delta_t.delta_t_at(jd_tt.quantity())?;
    Ok(Time::from_days(jd_tt.quantity() - dt.to::<Day>()))
}

/// TT → TAI (−32.184 s).
#[inline]
pub fn tt_to_tai(jd_tt: Time<TT>) -> Time<TAI> {
    jd_tt.to::<TAI>()
}

/// TAI → TT (+32.184 s).
#[inline]
pub fn tai_to_tt(jd_tai: Time<TAI>) -> Time<TT> {
    jd_tai.to::<TT>()
}

/// TAI − UTC on a UTC calendar date. See [`LeapSecondTable::tai_minus_utc`].
#[inline]
pub fn tai_minus_utc(date: NaiveDate, leap_seconds: &LeapSecondTable) -> EphemerisResult<Seconds> {
    leap_seconds.tai_minus_utc(date)
}

/// UT1 − UTC = (TT − TAI) − ΔT + (TAI − UTC).
///
/// The result is a consistency check between the ΔT source and the
/// leap-second list; values outside ±0.9 s are logged but still returned.
pub fn ut1_minus_utc<D>(
    jd_ut1: Time<UT>,
    delta_t: &D,
    leap_seconds: &LeapSecondTable,
) -> EphemerisResult<Seconds>
where
    D: DeltaTSource + ?Sized,
{
    let date = jd_ut1
        .to_utc()
        .map(|dt| dt.date_naive())
        .ok_or_else(|| {
            EphemerisError::out_of_range(
                "Julian day",
                jd_ut1.value(),
                f64::NEG_INFINITY,
                f64::INFINITY,
            )
        })?;
    let dt = delta_t.delta_t_at(jd_ut1.quantity())?;
    let tai_utc = leap_seconds.tai_minus_utc(date)?;
    let offset = TT_MINUS_TAI - dt + tai_utc;
    if offset.abs() > UT1_MINUS_UTC_NOMINAL_BOUND {
        warn!(%date, ut1_minus_utc = offset.value(), "UT1 − UTC outside nominal ±0.9 s band");
    }
    Ok(offset)
}

/// Earth Rotation Angle (IERS Conventions 2010, eq. 5.15), radians in `[0, 2π)`.
///
/// θ = 2π·(0.7790572732640 + 1.00273781191135448·(JD_UT1 − 2451545.0))
pub fn earth_rotation_angle(jd_ut1: Time<UT>) -> f64 {
    let du = jd_ut1.value() - 2_451_545.0;
    // Whole days contribute whole turns; keep only the fraction for precision.
    let day_fraction = jd_ut1.value().fract();
    normalize_tau(TAU * (day_fraction + 0.779_057_273_264_0 + 0.002_737_811_911_354_48 * du))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delta_t::{DeltaTFn, DeltaTModel};
    use qtty::Days;

    #[test]
    fn ut1_to_tt_adds_delta_t() {
        let ut = Time::<UT>::new(2_451_545.0);
        let tt = ut1_to_tt(ut, &DeltaTModel::Nasa).unwrap();
        let offset = (tt.quantity() - ut.quantity()).to::<qtty::Second>();
        // A JD near 2.45e6 resolves to about 4e-5 s.
        assert!((offset - Seconds::new(63.86)).abs() < Seconds::new(1e-4), "{offset}");
    }

    #[test]
    fn model_choice_changes_result() {
        let ut = Time::<UT>::new(2_455_197.5); // 2010-01-01
        let nasa = ut1_to_tt(ut, &DeltaTModel::Nasa).unwrap();
        let meeus = ut1_to_tt(ut, &DeltaTModel::Meeus).unwrap();
        assert!(meeus > nasa);
    }

    #[test]
    fn one_sided_inverse_roundtrips_within_1e9_days() {
        for jd in [2_415_020.5, 2_443_192.65, 2_451_545.0, 2_467_636.49] {
            let tt = Time::<TT>::new(jd);
            let back = ut1_to_tt(tt_to_ut1(tt, &DeltaTModel::Nasa).unwrap(), &DeltaTModel::Nasa)
                .unwrap();
            assert!((back - tt).abs() < Days::new(1e-9), "jd {jd}");

            let ut = Time::<UT>::new(jd);
            let back = tt_to_ut1(ut1_to_tt(ut, &DeltaTModel::Meeus).unwrap(), &DeltaTModel::Meeus)
                .unwrap();
            assert!((back - ut).abs() < Days::new(1e-9), "jd {jd}");
        }
    }

    #[test]
    fn delta_t_errors_propagate() {
        let failing =
            DeltaTFn(|_: f64| -> EphemerisResult<Seconds> { Err(EphemerisError::data_not_found("ΔT")) });
        assert!(ut1_to_tt(Time::<UT>::new(2_451_545.0), &failing).is_err());
    }

    #[test]
    fn tai_tt_offset_is_fixed() {
        let tt = Time::<TT>::new(2_451_545.0);
        let tai = tt_to_tai(tt);
        let diff = (tt.quantity() - tai.quantity()).to::<qtty::Second>();
        assert!((diff - Seconds::new(32.184)).abs() < Seconds::new(1e-4), "{diff}");
        assert!((tai_to_tt(tai) - tt).abs() < Days::new(1e-12));
    }

    #[test]
    fn ut1_minus_utc_near_zero_in_2000() {
        let ut = Time::<UT>::new(2_451_544.5); // 2000-01-01 00:00
        let value = ut1_minus_utc(ut, &DeltaTModel::Nasa, &LeapSecondTable::iers()).unwrap();
        // 32.184 − 63.86 + 32
        assert!((value - Seconds::new(0.324)).abs() < Seconds::new(1e-3), "{value}");
    }

    #[test]
    fn ut1_minus_utc_out_of_band_is_still_returned() {
        // 2000-01-01: 32.184 − 70 + 32 = −5.816 s, far outside ±0.9 s.
        let drifted = DeltaTFn(|_: f64| -> EphemerisResult<Seconds> { Ok(Seconds::new(70.0)) });
        let ut = Time::<UT>::new(2_451_544.5);
        let value = ut1_minus_utc(ut, &drifted, &LeapSecondTable::iers()).unwrap();
        assert!(value.abs() > UT1_MINUS_UTC_NOMINAL_BOUND);
        assert!((value - Seconds::new(-5.816)).abs() < Seconds::new(1e-9), "{value}");
    }

    #[test]
    fn ut1_minus_utc_before_1972_is_out_of_range() {
        let ut = Time::<UT>::new(2_440_587.5); // 1970-01-01
        let err = ut1_minus_utc(ut, &DeltaTModel::Nasa, &LeapSecondTable::iers()).unwrap_err();
        assert!(matches!(err, EphemerisError::OutOfRange { .. }));
    }

    #[test]
    fn earth_rotation_angle_at_j2000() {
        let era = earth_rotation_angle(Time::<UT>::new(2_451_545.0));
        assert!((era - TAU * 0.779_057_273_264_0).abs() < 1e-12);
        assert!((era.to_degrees() - 280.46).abs() < 0.01);
    }

    #[test]
    fn earth_rotation_angle_advances_one_sidereal_turn() {
        let a = earth_rotation_angle(Time::<UT>::new(2_460_000.25));
        let b = earth_rotation_angle(Time::<UT>::new(2_460_000.25 + 1.0 / 1.002_737_811_911_354_48));
        let diff = (a - b).abs();
        assert!(diff < 1e-8 || (TAU - diff) < 1e-8, "diff {diff}");
    }
}
