// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Angle normalization helpers.
//!
//! Series outputs for longitude and latitude are reported in `(−π, π]`;
//! rotation angles such as ERA use `[0, 2π)`.

use std::f64::consts::{PI, TAU};

/// Arcseconds → radians.
pub const ARCSEC_TO_RAD: f64 = PI / (180.0 * 3600.0);

/// Wraps an angle in radians into `(−π, π]`.
#[inline]
pub fn normalize_pi(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Wraps an angle in radians into `[0, 2π)`.
#[inline]
pub fn normalize_tau(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Degrees → radians after reducing the argument modulo 360°.
///
/// Reducing first keeps precision for the large mean-motion arguments of
/// the lunar and seasonal series.
#[inline]
pub(crate) fn reduced_radians(degrees: f64) -> f64 {
    degrees.rem_euclid(360.0).to_radians()
}
