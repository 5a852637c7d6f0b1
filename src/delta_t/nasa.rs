// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Continuous ΔT polynomials of Espenak & Meeus (2006).
//!
//! Each era is a polynomial in a shifted (and for early eras, scaled) year.
//! The coefficients are empirical fits and are kept verbatim.
//!
//! ## References
//! * F. Espenak & J. Meeus, *Five Millennium Canon of Solar Eclipses* (2006).
//! * Morrison & Stephenson (2004): "Historical values of the Earth's clock error".

use crate::polynomial::evaluate_polynomial;
use qtty::Seconds;

/// **Years −500 … +500**, in `u = y/100`.
#[rustfmt::skip]
const ANCIENT: [f64; 7] = [
    10_583.6, -1_014.41, 33.783_11, -5.952_053, -0.179_845_2, 0.022_174_192, 0.009_031_652_1,
];

/// **Years 500 … 1600**, in `u = (y − 1000)/100`.
#[rustfmt::skip]
const MEDIEVAL: [f64; 7] = [
    1_574.2, -556.01, 71.234_72, 0.319_781, -0.850_346_3, -0.005_050_998, 0.008_357_207_3,
];

/// **Years 1600 … 1700**, in `t = y − 1600`.
const Y1600: [f64; 4] = [120.0, -0.980_8, -0.015_32, 1.0 / 7_129.0];

/// **Years 1700 … 1800**, in `t = y − 1700`.
const Y1700: [f64; 5] = [8.83, 0.160_3, -0.005_928_5, 0.000_133_36, -1.0 / 1_174_000.0];

/// **Years 1800 … 1860**, in `t = y − 1800`.
#[rustfmt::skip]
const Y1800: [f64; 8] = [
    13.72, -0.332_447, 0.006_861_2, 0.004_111_6, -0.000_374_36,
    0.000_012_127_2, -0.000_000_169_9, 0.000_000_000_875,
];

/// **Years 1860 … 1900**, in `t = y − 1860`.
#[rustfmt::skip]
const Y1860: [f64; 6] = [
    7.62, 0.573_7, -0.251_754, 0.016_806_68, -0.000_447_362_4, 1.0 / 233_174.0,
];

/// **Years 1900 … 1920**, in `t = y − 1900`.
const Y1900: [f64; 5] = [-2.79, 1.494_119, -0.059_893_9, 0.006_196_6, -0.000_197];

/// **Years 1920 … 1941**, in `t = y − 1920`.
const Y1920: [f64; 4] = [21.20, 0.844_93, -0.076_100, 0.002_093_6];

/// **Years 1941 … 1961**, in `t = y − 1950`.
const Y1941: [f64; 4] = [29.07, 0.407, -1.0 / 233.0, 1.0 / 2_547.0];

/// **Years 1961 … 1986**, in `t = y − 1975`.
const Y1961: [f64; 4] = [45.45, 1.067, -1.0 / 260.0, -1.0 / 718.0];

/// **Years 1986 … 2005**, in `t = y − 2000`.
#[rustfmt::skip]
const Y1986: [f64; 6] = [
    63.86, 0.334_5, -0.060_374, 0.001_727_5, 0.000_651_814, 0.000_023_735_99,
];

/// **Years 2005 … 2050**, in `t = y − 2000`.
const Y2005: [f64; 3] = [62.92, 0.322_17, 0.005_589];

/// Long-term parabola `−20 + 32·u²` with `u = (y − 1820)/100`, used
/// before −500 and after 2150, and as the base of the 2050–2150 bridge.
#[inline]
fn long_term(year: f64) -> f64 {
    let u = (year - 1820.0) / 100.0;
    -20.0 + 32.0 * u * u
}

/// Polynomial estimate before the lunar-ephemeris correction.
fn polynomial_estimate(year: f64) -> f64 {
    match year {
        y if y < -500.0 => long_term(y),
        y if y < 500.0 => evaluate_polynomial(&ANCIENT, y / 100.0),
        y if y < 1600.0 => evaluate_polynomial(&MEDIEVAL, (y - 1000.0) / 100.0),
        y if y < 1700.0 => evaluate_polynomial(&Y1600, y - 1600.0),
        y if y < 1800.0 => evaluate_polynomial(&Y1700, y - 1700.0),
        y if y < 1860.0 => evaluate_polynomial(&Y1800, y - 1800.0),
        y if y < 1900.0 => evaluate_polynomial(&Y1860, y - 1860.0),
        y if y < 1920.0 => evaluate_polynomial(&Y1900, y - 1900.0),
        y if y < 1941.0 => evaluate_polynomial(&Y1920, y - 1920.0),
        y if y < 1961.0 => evaluate_polynomial(&Y1941, y - 1950.0),
        y if y < 1986.0 => evaluate_polynomial(&Y1961, y - 1975.0),
        y if y < 2005.0 => evaluate_polynomial(&Y1986, y - 2000.0),
        y if y < 2050.0 => evaluate_polynomial(&Y2005, y - 2000.0),
        y if y <= 2150.0 => long_term(y) - 0.5628 * (2150.0 - y),
        y => long_term(y),
    }
}

/// Correction for the lunar secular acceleration assumed by the model,
/// `−0.000012932·(y − 1955)²`, applied only outside 1955–2005.
#[inline]
pub fn lunar_ephemeris_correction(year: f64) -> f64 {
    if year < 1955.0 || year > 2005.0 {
        let dy = year - 1955.0;
        -0.000_012_932 * dy * dy
    } else {
        0.0
    }
}

/// ΔT (seconds) from the NASA model at `year`.
#[inline]
pub(crate) fn nasa_delta_t(year: f64) -> Seconds {
    Seconds::new(polynomial_estimate(year) + lunar_ephemeris_correction(year))
}
