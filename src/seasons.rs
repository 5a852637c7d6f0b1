// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Equinoxes and solstices
//!
//! Three levels of accuracy, all from Meeus, *Astronomical Algorithms*
//! ch. 27:
//!
//! | Function | Method | Accuracy |
//! |----------|--------|----------|
//! | [`mean_marker_instant`] | polynomial in the year | ~1 h |
//! | [`seasonal_marker_approx`] | + 24 periodic terms | ~1 min |
//! | [`seasonal_marker`] | iterate on the apparent solar longitude | ~1 s |
//!
//! The iterative solver takes the solar longitude as a function, so it can
//! run on the bundled Earth series through
//! [`apparent_solar_longitude`](crate::apparent_solar_longitude) or on any
//! other ephemeris.

use crate::angle::{normalize_pi, reduced_radians};
use crate::convert::tt_to_ut1;
use crate::delta_t::DeltaTSource;
use crate::errors::{EphemerisError, EphemerisResult};
use crate::instant::Time;
use crate::polynomial::evaluate_polynomial;
use crate::scales::{JD, JDE, TT, UT};
use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::ops::RangeInclusive;
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Years covered by the mean-instant polynomials.
pub const MARKER_YEAR_RANGE: RangeInclusive<i32> = -1000..=3000;

/// Maximum solar-longitude evaluations before giving up.
pub const MAX_ITERATIONS: usize = 100;

/// Longitude residual (radians) at which the iteration stops.
pub const CONVERGENCE_TOLERANCE: f64 = 1e-9;

/// Days per radian of solar longitude, about 365.25 / 2π.
const DAYS_PER_RADIAN: f64 = 58.0;

// ── Marker kinds ──────────────────────────────────────────────────────────

/// The four seasonal markers, named by the Sun's motion so they read the
/// same in both hemispheres.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SeasonalMarkerKind {
    /// Apparent solar longitude 0° (March).
    NorthwardEquinox,
    /// 90° (June).
    NorthernSolstice,
    /// 180° (September).
    SouthwardEquinox,
    /// 270° (December).
    SouthernSolstice,
}

impl SeasonalMarkerKind {
    pub const ALL: [SeasonalMarkerKind; 4] = [
        Self::NorthwardEquinox,
        Self::NorthernSolstice,
        Self::SouthwardEquinox,
        Self::SouthernSolstice,
    ];

    pub const fn index(self) -> usize {
        match self {
            Self::NorthwardEquinox => 0,
            Self::NorthernSolstice => 1,
            Self::SouthwardEquinox => 2,
            Self::SouthernSolstice => 3,
        }
    }

    pub fn from_index(index: usize) -> EphemerisResult<Self> {
        Self::ALL.get(index).copied().ok_or_else(|| {
            EphemerisError::invalid_argument(
                "marker",
                format!("seasonal marker index must be within 0..=3, got {index}"),
            )
        })
    }

    /// Target apparent solar longitude in radians, `index·π/2`.
    pub fn solar_longitude(self) -> f64 {
        self.index() as f64 * FRAC_PI_2
    }
}

impl fmt::Display for SeasonalMarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NorthwardEquinox => "northward equinox",
            Self::NorthernSolstice => "northern solstice",
            Self::SouthwardEquinox => "southward equinox",
            Self::SouthernSolstice => "southern solstice",
        };
        f.write_str(name)
    }
}

/// A solved equinox or solstice.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SeasonalMarker {
    pub kind: SeasonalMarkerKind,
    /// Instant on the UT axis.
    pub instant: Time<UT>,
    /// Dynamical instant before ΔT was removed.
    pub terrestrial: Time<JDE>,
}

// ── Tables ────────────────────────────────────────────────────────────────

/// JDE0 polynomials in `Y = year/1000`, years −1000…1000.
#[rustfmt::skip]
const EARLY: [[f64; 5]; 4] = [
    [1_721_139.291_89, 365_242.137_40,  0.061_34,  0.001_11, -0.000_71],
    [1_721_233.254_01, 365_241.725_62, -0.053_23,  0.009_07,  0.000_25],
    [1_721_325.704_55, 365_242.495_58, -0.116_77, -0.002_97,  0.000_74],
    [1_721_414.399_87, 365_242.882_57, -0.007_69, -0.009_33, -0.000_06],
];

/// JDE0 polynomials in `Y = (year − 2000)/1000`, years 1000…3000.
#[rustfmt::skip]
const MODERN: [[f64; 5]; 4] = [
    [2_451_623.809_84, 365_242.374_04,  0.051_69, -0.004_11, -0.000_57],
    [2_451_716.567_67, 365_241.626_03,  0.003_25,  0.008_88, -0.000_30],
    [2_451_810.217_15, 365_242.017_67, -0.115_75,  0.003_37,  0.000_78],
    [2_451_900.059_52, 365_242.740_49, -0.062_23, -0.008_23,  0.000_32],
];

/// Periodic terms `A·cos(B + C·T)`, B in degrees, C in degrees per century.
#[rustfmt::skip]
const PERIODIC: [(f64, f64, f64); 24] = [
    (485.0, 324.96,   1_934.136), (203.0, 337.23,  32_964.467),
    (199.0, 342.08,      20.186), (182.0,  27.85, 445_267.112),
    (156.0,  73.14,  45_036.886), (136.0, 171.52,  22_518.443),
    ( 77.0, 222.54,  65_928.934), ( 74.0, 296.72,   3_034.906),
    ( 70.0, 243.58,   9_037.513), ( 58.0, 119.81,  33_718.147),
    ( 52.0, 297.17,     150.678), ( 50.0,  21.02,   2_281.226),
    ( 45.0, 247.54,  29_929.562), ( 44.0, 325.15,  31_555.956),
    ( 29.0,  60.93,   4_443.417), ( 18.0, 155.12,  67_555.328),
    ( 17.0, 288.79,   4_562.452), ( 16.0, 198.04,  62_894.029),
    ( 14.0, 199.76,  31_436.921), ( 12.0,  95.39,  14_577.848),
    ( 12.0, 287.11,  31_931.756), ( 12.0, 320.81,  34_777.259),
    (  9.0, 227.73,   1_222.114), (  8.0,  15.45,  16_859.074),
];

fn check_year(year: i32) -> EphemerisResult<()> {
    if !MARKER_YEAR_RANGE.contains(&year) {
        return Err(EphemerisError::out_of_range(
            "seasonal marker year",
            f64::from(year),
            f64::from(*MARKER_YEAR_RANGE.start()),
            f64::from(*MARKER_YEAR_RANGE.end()),
        ));
    }
    Ok(())
}

fn to_marker<D>(
    kind: SeasonalMarkerKind,
    terrestrial: Time<JDE>,
    delta_t: &D,
) -> EphemerisResult<SeasonalMarker>
where
    D: DeltaTSource + ?Sized,
{
    Ok(SeasonalMarker {
        kind,
        instant: tt_to_ut1(terrestrial.to::<TT>(), delta_t)?,
        terrestrial,
    })
}

// ── Finders ───────────────────────────────────────────────────────────────

/// Mean instant JDE0 of `kind` in `year`.
///
/// Years outside −1000…=3000 fail with
/// [`OutOfRange`](EphemerisError::OutOfRange).
pub fn mean_marker_instant(year: i32, kind: SeasonalMarkerKind) -> EphemerisResult<Time<JDE>> {
    check_year(year)?;
    let year = f64::from(year);
    let (coefficients, y) = if year <= 1000.0 {
        (&EARLY[kind.index()], year / 1000.0)
    } else {
        (&MODERN[kind.index()], (year - 2000.0) / 1000.0)
    };
    Ok(Time::new(evaluate_polynomial(coefficients, y)))
}

/// Mean instant corrected by the 24 periodic terms.
pub fn seasonal_marker_approx<D>(
    year: i32,
    kind: SeasonalMarkerKind,
    delta_t: &D,
) -> EphemerisResult<SeasonalMarker>
where
    D: DeltaTSource + ?Sized,
{
    let jde0 = mean_marker_instant(year, kind)?;
    let t = jde0.to::<JD>().julian_centuries().value();
    let w = reduced_radians(35_999.373 * t - 2.47);
    let d_lambda = 1.0 + 0.033_4 * w.cos() + 0.000_7 * (2.0 * w).cos();
    let s: f64 = PERIODIC
        .iter()
        .map(|&(a, b, c)| a * reduced_radians(b + c * t).cos())
        .sum();
    let terrestrial = Time::new(jde0.value() + 0.000_01 * s / d_lambda);
    to_marker(kind, terrestrial, delta_t)
}

/// Instant at which `solar_longitude` reaches the marker's target.
///
/// Starting from JDE0, each step moves by `58·sin(target − λ)` days until
/// the residual drops below [`CONVERGENCE_TOLERANCE`]. Errors from
/// `solar_longitude` propagate; more than [`MAX_ITERATIONS`] evaluations
/// fail with [`ConvergenceFailure`](EphemerisError::ConvergenceFailure).
///
/// ```rust
/// use ephemera::{apparent_solar_longitude, seasonal_marker, DeltaTModel, SeasonalMarkerKind};
///
/// let solstice = seasonal_marker(
///     2024,
///     SeasonalMarkerKind::NorthernSolstice,
///     apparent_solar_longitude,
///     &DeltaTModel::Nasa,
/// )?;
/// let utc = solstice.instant.to_utc().expect("in range");
/// assert_eq!(utc.format("%Y-%m-%d %H:%M").to_string(), "2024-06-20 20:50");
/// # Ok::<(), ephemera::EphemerisError>(())
/// ```
pub fn seasonal_marker<F, D>(
    year: i32,
    kind: SeasonalMarkerKind,
    mut solar_longitude: F,
    delta_t: &D,
) -> EphemerisResult<SeasonalMarker>
where
    F: FnMut(Time<JDE>) -> EphemerisResult<f64>,
    D: DeltaTSource + ?Sized,
{
    let target = kind.solar_longitude();
    let mut jde = mean_marker_instant(year, kind)?;
    let mut residual = f64::INFINITY;
    for iteration in 1..=MAX_ITERATIONS {
        residual = normalize_pi(target - solar_longitude(jde)?);
        trace!(iteration, jde = jde.value(), residual, "seasonal marker step");
        if residual.abs() < CONVERGENCE_TOLERANCE {
            debug!(year, %kind, iterations = iteration, "seasonal marker converged");
            return to_marker(kind, jde, delta_t);
        }
        jde = Time::new(jde.value() + DAYS_PER_RADIAN * residual.sin());
    }
    Err(EphemerisError::convergence_failure(
        "seasonal marker",
        MAX_ITERATIONS,
        residual,
    ))
}

/// The four markers of `year` in calendar order.
pub fn seasonal_markers_in_year<F, D>(
    year: i32,
    mut solar_longitude: F,
    delta_t: &D,
) -> EphemerisResult<[SeasonalMarker; 4]>
where
    F: FnMut(Time<JDE>) -> EphemerisResult<f64>,
    D: DeltaTSource + ?Sized,
{
    let mut solve = |kind| seasonal_marker(year, kind, &mut solar_longitude, delta_t);
    Ok([
        solve(SeasonalMarkerKind::NorthwardEquinox)?,
        solve(SeasonalMarkerKind::NorthernSolstice)?,
        solve(SeasonalMarkerKind::SouthwardEquinox)?,
        solve(SeasonalMarkerKind::SouthernSolstice)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delta_t::DeltaTModel;
    use crate::sun::apparent_solar_longitude;
    fn tt_hms(jde: Time<JDE>) -> f64 {
        // seconds past 0h TT on the calendar day
        ((jde.value() + 0.5).fract()) * 86_400.0
    }

    #[test]
    fn mean_instant_1962_june() {
        // Meeus example 27.a
        let jde0 = mean_marker_instant(1962, SeasonalMarkerKind::NorthernSolstice).unwrap();
        assert!((jde0.value() - 2_437_837.385_89).abs() < 1e-5, "{jde0}");
    }

    #[test]
    fn approx_1962_june_solstice() {
        let marker =
            seasonal_marker_approx(1962, SeasonalMarkerKind::NorthernSolstice, &DeltaTModel::Nasa)
                .unwrap();
        assert!((marker.terrestrial.value() - 2_437_837.392_45).abs() < 1e-5);
        let expected = 21.0 * 3600.0 + 25.0 * 60.0 + 8.0;
        assert!((tt_hms(marker.terrestrial) - expected).abs() < 1.0);
    }

    #[test]
    fn iterative_1962_june_solstice() {
        let marker = seasonal_marker(
            1962,
            SeasonalMarkerKind::NorthernSolstice,
            apparent_solar_longitude,
            &DeltaTModel::Nasa,
        )
        .unwrap();
        let expected = 21.0 * 3600.0 + 24.0 * 60.0 + 42.0;
        assert!((tt_hms(marker.terrestrial) - expected).abs() < 2.0);
        let dt = (marker.terrestrial.to::<TT>().quantity() - marker.instant.quantity())
            .to::<qtty::Second>()
            .value();
        assert!((dt - 34.5).abs() < 1.0, "ΔT {dt}");
    }

    #[test]
    fn year_range_enforced() {
        for year in [-1001, 3001] {
            let err = mean_marker_instant(year, SeasonalMarkerKind::NorthwardEquinox).unwrap_err();
            assert!(matches!(err, EphemerisError::OutOfRange { .. }));
        }
        assert!(mean_marker_instant(-1000, SeasonalMarkerKind::NorthwardEquinox).is_ok());
        assert!(mean_marker_instant(3000, SeasonalMarkerKind::SouthernSolstice).is_ok());
    }

    #[test]
    fn marker_index_roundtrip() {
        for kind in SeasonalMarkerKind::ALL {
            assert_eq!(SeasonalMarkerKind::from_index(kind.index()).unwrap(), kind);
        }
        assert!(matches!(
            SeasonalMarkerKind::from_index(4),
            Err(EphemerisError::InvalidArgument { argument: "marker", .. })
        ));
        assert_eq!(SeasonalMarkerKind::SouthernSolstice.solar_longitude(), 3.0 * FRAC_PI_2);
    }

    #[test]
    fn longitude_errors_propagate() {
        let err = seasonal_marker(
            2000,
            SeasonalMarkerKind::NorthwardEquinox,
            |_| Err(EphemerisError::data_not_found("Earth series")),
            &DeltaTModel::Nasa,
        )
        .unwrap_err();
        assert!(matches!(err, EphemerisError::DataNotFound { .. }));
    }

    #[test]
    fn non_converging_longitude_fails() {
        // A longitude that never reaches the target
        let err = seasonal_marker(
            2000,
            SeasonalMarkerKind::NorthernSolstice,
            |_| Ok(0.0),
            &DeltaTModel::Nasa,
        )
        .unwrap_err();
        match err {
            EphemerisError::ConvergenceFailure { iterations, .. } => {
                assert_eq!(iterations, MAX_ITERATIONS)
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn converges_in_few_steps() {
        let mut calls = 0;
        seasonal_marker(
            2024,
            SeasonalMarkerKind::SouthwardEquinox,
            |jde| {
                calls += 1;
                apparent_solar_longitude(jde)
            },
            &DeltaTModel::Nasa,
        )
        .unwrap();
        assert!(calls <= 6, "{calls} evaluations");
    }

    #[test]
    fn all_four_markers_of_2024() {
        let markers =
            seasonal_markers_in_year(2024, apparent_solar_longitude, &DeltaTModel::Nasa).unwrap();
        let kinds: Vec<_> = markers.iter().map(|m| m.kind).collect();
        assert_eq!(kinds, SeasonalMarkerKind::ALL);
        for pair in markers.windows(2) {
            assert!(pair[0].instant < pair[1].instant);
        }
    }
}
