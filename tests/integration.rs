// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

mod common;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use ephemera::{
    body_position, delta_t, earth_rotation_angle, geodesic_distance, lunar_phase_near,
    lunar_phases_in_year, normalize_pi, seasonal_marker, seasonal_marker_approx,
    seasonal_markers_in_year, solar_position, tai_minus_utc, tt_to_ut1, ut1_minus_utc, ut1_to_tt,
    vsop87, Body, BundledSeries, DeltaTFn, DeltaTModel, DeltaTSample, DeltaTTable, EphemerisError,
    EphemerisResult, GeographicPoint, JulianDate, JulianEphemerisDay, LeapSecondTable,
    LunarPhaseKind, Period, SeasonalMarkerKind, SeriesCoefficientSet, Spheroid, Time,
    UniversalTime, JD, TT, UT,
};
use qtty::{Days, Seconds};
use std::collections::HashMap;

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

fn seconds_between(a: UniversalTime, b: UniversalTime) -> f64 {
    (a - b).to::<qtty::Second>().value().abs()
}

// ── time scales ───────────────────────────────────────────────────────────

#[test]
fn utc_roundtrip_j2000_is_stable() {
    let datetime = DateTime::from_timestamp(946_728_000, 0).unwrap();
    let jd = JulianDate::from_utc(datetime);
    let back = jd.to_utc().expect("to_utc");
    let delta_ns = back.timestamp_nanos_opt().unwrap() - datetime.timestamp_nanos_opt().unwrap();
    assert!(delta_ns.abs() < 50_000);
}

#[test]
fn ut_applies_delta_t_near_j2000() {
    let ut = Time::<UT>::new(2_451_545.0);
    let jd: JulianDate = ut.to::<JD>();
    let offset_s = (jd.quantity() - ut.quantity()).to::<qtty::Second>();
    assert!((offset_s - Seconds::new(63.86)).abs() < Seconds::new(0.01));
}

#[test]
fn explicit_converters_roundtrip_for_every_source() {
    let table = DeltaTTable::new(vec![
        DeltaTSample::new(1990, 56.9),
        DeltaTSample::new(1992, 58.3),
    ])
    .unwrap();
    let fixed = DeltaTFn(|_: f64| -> EphemerisResult<Seconds> { Ok(Seconds::new(69.0)) });

    let jd = 2_448_500.25; // 1991-09
    for source in [
        &DeltaTModel::Nasa as &dyn ephemera::DeltaTSource,
        &DeltaTModel::Meeus,
        &table,
        &fixed,
    ] {
        let tt = Time::<TT>::new(jd);
        let back = ut1_to_tt(tt_to_ut1(tt, source).unwrap(), source).unwrap();
        assert!((back - tt).abs() < Days::new(1e-9));
    }
}

#[test]
fn delta_t_models_agree_in_the_twentieth_century() {
    for year in [1900.0, 1925.0, 1950.0, 1975.0, 1990.0] {
        let nasa = delta_t(year, DeltaTModel::Nasa).unwrap();
        let meeus = delta_t(year, DeltaTModel::Meeus).unwrap();
        assert!((nasa - meeus).abs() < Seconds::new(1.0), "{year}: {nasa} vs {meeus}");
    }
}

#[test]
fn leap_seconds_and_ut1_minus_utc() {
    let table = LeapSecondTable::default();
    let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    assert_eq!(tai_minus_utc(date, &table).unwrap(), Seconds::new(37.0));

    let ut = UniversalTime::from_utc(utc(1990, 1, 1, 0, 0, 0));
    let dut1 = ut1_minus_utc(ut, &DeltaTModel::Nasa, &table).unwrap();
    assert!(dut1.abs() < Seconds::new(1.0), "UT1 − UTC = {dut1}");
}

#[test]
fn earth_rotation_angle_is_bounded() {
    let era = earth_rotation_angle(UniversalTime::from_utc(utc(2024, 3, 20, 3, 6, 0)));
    assert!((0.0..std::f64::consts::TAU).contains(&era));
}

// ── VSOP87 ────────────────────────────────────────────────────────────────

#[test]
fn venus_reference_position() {
    let (l, b, r) = common::VENUS_1992_12_20;
    let venus = common::venus();
    let pos = venus.position(JulianEphemerisDay::new(2_448_976.5)).unwrap();
    assert!((pos.longitude - normalize_pi(-68.659_258_2)).abs() < 1e-5);
    assert!((pos.longitude - l).abs() < 1e-5, "L = {}", pos.longitude);
    assert!((pos.latitude - b).abs() < 1e-5, "B = {}", pos.latitude);
    assert!((pos.radius - r).abs() < 1e-5, "R = {}", pos.radius);
}

#[test]
fn provider_serves_caller_supplied_bodies() {
    let mut provider: HashMap<Body, SeriesCoefficientSet> = HashMap::new();
    provider.insert(Body::Venus, common::venus());
    let jde = JulianEphemerisDay::new(2_448_976.5);

    assert!(body_position(&provider, Body::Venus, jde).is_ok());
    let missing = body_position(&provider, Body::Saturn, jde).unwrap_err();
    assert!(matches!(missing, EphemerisError::DataNotFound { .. }));
    assert!(body_position(&BundledSeries, Body::Earth, jde).is_ok());
}

#[test]
fn vsop87d_text_matches_tabulated_venus() {
    let parsed = SeriesCoefficientSet::from_vsop87d_text(&common::venus_vsop87d_text()).unwrap();
    let tabulated = common::venus();
    assert_eq!(parsed.term_count(), tabulated.term_count());

    let jde = JulianEphemerisDay::new(2_448_976.5);
    let a = parsed.position(jde).unwrap();
    let b = tabulated.position(jde).unwrap();
    assert!((a.longitude - b.longitude).abs() < 1e-12);
    assert!((a.latitude - b.latitude).abs() < 1e-12);
    assert!((a.radius - b.radius).abs() < 1e-12);
}

fn vsop87d_file(name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

#[test]
#[ignore = "requires the published VSOP87D.sat in tests/data"]
fn saturn_longitude_1999_july_26() {
    let text = std::fs::read_to_string(vsop87d_file("VSOP87D.sat")).unwrap();
    let mut provider: HashMap<Body, SeriesCoefficientSet> = HashMap::new();
    provider.insert(
        Body::Saturn,
        SeriesCoefficientSet::from_vsop87d_text(&text).unwrap(),
    );

    let jde = JulianEphemerisDay::from_utc(utc(1999, 7, 26, 0, 0, 0));
    let saturn = body_position(&provider, Body::Saturn, jde).unwrap();
    let expected = 39.972_390_1_f64.to_radians();
    assert!(
        (saturn.longitude - expected).abs() < 1e-6,
        "L = {}°",
        saturn.longitude.to_degrees()
    );
}

#[test]
fn series_evaluation_is_deterministic() {
    let jde = JulianEphemerisDay::new(2_460_000.123);
    let a = vsop87::earth().position(jde).unwrap();
    let b = vsop87::earth().position(jde).unwrap();
    assert_eq!(a.longitude.to_bits(), b.longitude.to_bits());
    assert_eq!(a.radius.to_bits(), b.radius.to_bits());
}

#[test]
fn solar_position_uses_injected_nutation() {
    let jde = JulianEphemerisDay::new(2_448_908.5);
    let shift = 10.0 * ephemera::ARCSEC_TO_RAD;
    let base = solar_position(vsop87::earth(), jde, |_| 0.0).unwrap();
    let shifted = solar_position(vsop87::earth(), jde, |_| shift).unwrap();
    assert!((shifted.longitude - base.longitude - shift).abs() < 1e-12);
}

// ── lunar phases ──────────────────────────────────────────────────────────

#[test]
fn new_moon_february_1977() {
    let start = UniversalTime::from_utc(utc(1977, 2, 15, 0, 0, 0));
    let phase = lunar_phase_near(start, &DeltaTModel::Nasa).unwrap();
    assert_eq!(phase.kind, LunarPhaseKind::NewMoon);
    let expected = UniversalTime::from_utc(utc(1977, 2, 18, 3, 36, 0));
    assert!(seconds_between(phase.instant, expected) < 60.0);
}

#[test]
fn third_quarter_january_2044() {
    let start = UniversalTime::from_utc(utc(2044, 1, 20, 0, 0, 0));
    let phase = lunar_phase_near(start, &DeltaTModel::Nasa).unwrap();
    assert_eq!(phase.kind, LunarPhaseKind::ThirdQuarter);
    let expected = UniversalTime::from_utc(utc(2044, 1, 21, 23, 46, 0));
    assert!(seconds_between(phase.instant, expected) < 60.0);
}

#[test]
fn phases_of_2024_cycle_through_kinds() {
    let phases = lunar_phases_in_year(2024, &DeltaTModel::Nasa).unwrap();
    let year = Period::<UT>::calendar_year(2024).unwrap();
    assert!(phases.iter().all(|p| year.contains(p.instant)));
    for pair in phases.windows(2) {
        assert_eq!((pair[0].kind.index() + 1) % 4, pair[1].kind.index());
        let gap = pair[1].instant - pair[0].instant;
        assert!(gap > Days::new(5.5) && gap < Days::new(9.0), "gap {gap}");
    }
}

// ── seasons ───────────────────────────────────────────────────────────────

#[test]
fn june_solstice_1962() {
    let kind = SeasonalMarkerKind::NorthernSolstice;
    let approx = seasonal_marker_approx(1962, kind, &DeltaTModel::Nasa).unwrap();
    let precise = seasonal_marker(
        1962,
        kind,
        ephemera::apparent_solar_longitude,
        &DeltaTModel::Nasa,
    )
    .unwrap();
    // Calendar JD numbers: UT-axis instants carry no ΔT offset.
    let tabulated = UniversalTime::from_utc(utc(1962, 6, 21, 21, 25, 8)).value();
    let iterative = UniversalTime::from_utc(utc(1962, 6, 21, 21, 24, 42)).value();
    assert!((approx.terrestrial.value() - tabulated).abs() * 86_400.0 < 1.0);
    assert!((precise.terrestrial.value() - iterative).abs() * 86_400.0 < 2.0);
    assert!((precise.terrestrial.value() - tabulated).abs() * 86_400.0 < 60.0);
}

#[test]
fn seasons_of_2024_in_ut() {
    let markers =
        seasonal_markers_in_year(2024, ephemera::apparent_solar_longitude, &DeltaTModel::Nasa)
            .unwrap();
    let expected = [
        utc(2024, 3, 20, 3, 6, 27),
        utc(2024, 6, 20, 20, 50, 51),
        utc(2024, 9, 22, 12, 43, 35),
        utc(2024, 12, 21, 9, 20, 24),
    ];
    for (marker, when) in markers.iter().zip(expected) {
        let expected = UniversalTime::from_utc(when);
        assert!(
            seconds_between(marker.instant, expected) < 2.0,
            "{}: {}",
            marker.kind,
            marker.instant
        );
    }
}

#[test]
fn seasonal_year_out_of_range() {
    let err = seasonal_marker_approx(3001, SeasonalMarkerKind::NorthwardEquinox, &DeltaTModel::Nasa)
        .unwrap_err();
    assert!(matches!(err, EphemerisError::OutOfRange { .. }));
}

// ── geodesy ───────────────────────────────────────────────────────────────

#[test]
fn paris_washington_distance() {
    let paris = GeographicPoint::from_dms((48.0, 50.0, 11.0), (2.0, 20.0, 14.0));
    let washington = GeographicPoint::from_dms((38.0, 55.0, 17.0), (-77.0, 3.0, 56.0));
    let iau = Spheroid::IAU_1976;
    let d = geodesic_distance(paris, washington, iau.equatorial_radius, iau.polar_radius);
    assert!((d - 6_181.63).abs() < 0.01, "d = {d}");
}

#[cfg(feature = "serde")]
#[test]
fn phase_serializes_instants_as_numbers() {
    let phase = ephemera::lunar_phase_for_lunation(0.0, &DeltaTModel::Nasa).unwrap();
    let json = serde_json::to_value(phase).unwrap();
    assert_eq!(json["kind"], "NewMoon");
    assert!(json["instant"].is_f64());
    let back: ephemera::LunarPhase = serde_json::from_value(json).unwrap();
    assert_eq!(back, phase);
}
