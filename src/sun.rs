// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Apparent geocentric position of the Sun from a VSOP87 Earth series.
//!
//! The pipeline is the one of Meeus, *Astronomical Algorithms* ch. 25
//! ("higher accuracy"):
//!
//! 1. heliocentric Earth L, B, R from the series;
//! 2. geocentric Sun: `λ = L + π`, `β = −B`;
//! 3. reduction to the FK5 frame;
//! 4. nutation in longitude Δψ, supplied by the caller;
//! 5. annual aberration from the variation of the Sun's longitude.
//!
//! Nutation is injected so callers can plug in a full IAU model. The
//! built-in [`nutation_in_longitude`] is the four-term approximation,
//! good to about 0.5″.

use crate::angle::{normalize_pi, reduced_radians, ARCSEC_TO_RAD};
use crate::errors::EphemerisResult;
use crate::instant::{Time, TimeScale};
use crate::scales::{JD, JDE};
use crate::vsop87::{self, SeriesCoefficientSet};
use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Geocentric ecliptic position of the Sun.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolarPosition {
    /// Ecliptic longitude, radians in `(−π, π]`.
    pub longitude: f64,
    /// Ecliptic latitude, radians.
    pub latitude: f64,
    /// Earth–Sun distance in AU.
    pub radius: f64,
}

/// Variation of the Sun's longitude, `(A″, B°, C°/millennium, power of τ)`.
#[rustfmt::skip]
const LONGITUDE_VARIATION: [(f64, f64, f64, i32); 21] = [
    (118.568,  87.5287,  359_993.7286, 0),
    (  2.476,  85.0561,  719_987.4571, 0),
    (  1.376,  27.8502, 4_452_671.1152, 0),
    (  0.119,  73.1375,  450_368.8564, 0),
    (  0.114, 337.2264,  329_644.6718, 0),
    (  0.086, 222.5400,  659_289.3436, 0),
    (  0.078, 162.8136, 9_224_659.7915, 0),
    (  0.054,  82.5823, 1_079_981.1857, 0),
    (  0.052, 171.5189,  225_184.4282, 0),
    (  0.034,  30.3214, 4_092_677.3866, 0),
    (  0.033, 119.8105,  337_181.4711, 0),
    (  0.023, 247.5418,  299_295.6151, 0),
    (  0.023, 325.1526,  315_559.5560, 0),
    (  0.021, 155.1241,  675_553.2846, 0),
    (  7.311, 333.4515,  359_993.7286, 1),
    (  0.305, 330.9814,  719_987.4571, 1),
    (  0.010, 328.5170, 1_079_981.1857, 1),
    (  0.309, 241.4518,  359_993.7286, 2),
    (  0.021, 205.0482,  719_987.4571, 2),
    (  0.004, 297.8610, 4_452_671.1152, 2),
    (  0.010, 154.7066,  359_993.7286, 3),
];

/// Constant part of the daily variation, arcseconds.
const LONGITUDE_VARIATION_BASE: f64 = 3_548.193;

/// Aberration constant scaled to the daily variation (Meeus eq. 25.10).
const ABERRATION_FACTOR: f64 = -0.005_775_518;

/// Nutation in longitude Δψ in radians, four-term approximation.
///
/// ```text
/// Δψ = −17.20″ sin Ω − 1.32″ sin 2L − 0.23″ sin 2L′ + 0.21″ sin 2Ω
/// ```
pub fn nutation_in_longitude<S: TimeScale>(instant: Time<S>) -> f64 {
    let t = instant.to::<JD>().julian_centuries().value();
    let omega = reduced_radians(
        125.044_52 - 1_934.136_261 * t + 0.002_070_8 * t * t + t * t * t / 450_000.0,
    );
    let sun_mean = reduced_radians(280.466_5 + 36_000.769_8 * t);
    let moon_mean = reduced_radians(218.316_5 + 481_267.881_3 * t);
    let arcsec = -17.20 * omega.sin() - 1.32 * (2.0 * sun_mean).sin()
        - 0.23 * (2.0 * moon_mean).sin()
        + 0.21 * (2.0 * omega).sin();
    arcsec * ARCSEC_TO_RAD
}

/// Daily variation of the Sun's longitude in arcseconds.
fn longitude_variation(tau: f64) -> f64 {
    LONGITUDE_VARIATION
        .iter()
        .fold(LONGITUDE_VARIATION_BASE, |acc, &(a, b, c, p)| {
            acc + a * tau.powi(p) * reduced_radians(b + c * tau).sin()
        })
}

/// Geometric position: geocentric λ, β referred to the mean equinox of
/// date in the VSOP87 dynamical frame, no FK5, nutation or aberration.
pub fn geometric_solar_position<S: TimeScale>(
    earth: &SeriesCoefficientSet,
    instant: Time<S>,
) -> EphemerisResult<SolarPosition> {
    let helio = earth.position(instant)?;
    Ok(SolarPosition {
        longitude: normalize_pi(helio.longitude + PI),
        latitude: -helio.latitude,
        radius: helio.radius,
    })
}

/// Apparent position with a caller-supplied nutation in longitude
/// (radians, as a function of the dynamical instant).
pub fn solar_position<S, N>(
    earth: &SeriesCoefficientSet,
    instant: Time<S>,
    nutation: N,
) -> EphemerisResult<SolarPosition>
where
    S: TimeScale,
    N: Fn(Time<JDE>) -> f64,
{
    let jde = instant.to::<JDE>();
    let geometric = geometric_solar_position(earth, jde)?;
    let t = jde.to::<JD>().julian_centuries().value();

    // FK5
    let lambda_prime = geometric.longitude - (1.397 * t + 0.000_31 * t * t).to_radians();
    let mut longitude = geometric.longitude - 0.090_33 * ARCSEC_TO_RAD;
    let latitude = geometric.latitude
        + 0.039_16 * ARCSEC_TO_RAD * (lambda_prime.cos() - lambda_prime.sin());

    longitude += nutation(jde);

    let tau = t / 10.0;
    longitude += ABERRATION_FACTOR * geometric.radius * longitude_variation(tau) * ARCSEC_TO_RAD;

    Ok(SolarPosition {
        longitude: normalize_pi(longitude),
        latitude,
        radius: geometric.radius,
    })
}

/// Apparent solar longitude from the bundled Earth series and the
/// built-in nutation, radians in `(−π, π]`.
pub fn apparent_solar_longitude<S: TimeScale>(instant: Time<S>) -> EphemerisResult<f64> {
    solar_position(vsop87::earth(), instant, nutation_in_longitude).map(|p| p.longitude)
}
