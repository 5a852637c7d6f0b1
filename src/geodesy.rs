// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Distance between two points on a reference spheroid.
//!
//! Andoyer's formula (Meeus, *Astronomical Algorithms* ch. 11): a closed-form
//! first-order correction for flattening on top of the great-circle arc.
//! Good to roughly the flattening squared, about 50 m over 10 000 km.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point given by geodetic latitude and longitude in degrees.
///
/// Longitudes are positive east.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeographicPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeographicPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Builds a point from sexagesimal components. The sign of the degrees
    /// applies to the whole angle.
    pub fn from_dms(latitude: (f64, f64, f64), longitude: (f64, f64, f64)) -> Self {
        fn degrees((d, m, s): (f64, f64, f64)) -> f64 {
            d.signum() * (d.abs() + m / 60.0 + s / 3_600.0)
        }
        Self::new(degrees(latitude), degrees(longitude))
    }
}

/// An oblate reference spheroid. Radii share one length unit, which is
/// also the unit of every distance computed on it.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Spheroid {
    pub equatorial_radius: f64,
    pub polar_radius: f64,
}

impl Spheroid {
    /// IAU 1976 ellipsoid in kilometres, `a = 6378.14`, `1/f = 298.257`.
    pub const IAU_1976: Spheroid = Spheroid::new(6_378.14, 6_378.14 * (1.0 - 1.0 / 298.257));

    /// WGS 84 ellipsoid in kilometres, `a = 6378.137`, `1/f = 298.257223563`.
    pub const WGS84: Spheroid =
        Spheroid::new(6_378.137, 6_378.137 * (1.0 - 1.0 / 298.257_223_563));

    pub const fn new(equatorial_radius: f64, polar_radius: f64) -> Self {
        Self {
            equatorial_radius,
            polar_radius,
        }
    }

    pub fn from_flattening(equatorial_radius: f64, flattening: f64) -> Self {
        Self::new(equatorial_radius, equatorial_radius * (1.0 - flattening))
    }

    #[inline]
    pub fn flattening(&self) -> f64 {
        (self.equatorial_radius - self.polar_radius) / self.equatorial_radius
    }

    /// Geodesic distance between `from` and `to` on this spheroid.
    #[inline]
    pub fn distance(&self, from: GeographicPoint, to: GeographicPoint) -> f64 {
        geodesic_distance(from, to, self.equatorial_radius, self.polar_radius)
    }
}

impl Default for Spheroid {
    fn default() -> Self {
        Self::IAU_1976
    }
}

/// Andoyer distance between two points, in the unit of the radii.
///
/// Coincident points (`S = 0`) and exact antipodes (`C = 0`) are singular
/// for the formula and yield NaN.
///
/// ```rust
/// use ephemera::{geodesic_distance, GeographicPoint};
///
/// let equator_a = GeographicPoint::new(0.0, 0.0);
/// let equator_b = GeographicPoint::new(0.0, 90.0);
/// let d = geodesic_distance(equator_a, equator_b, 6371.0, 6371.0);
/// assert!((d - std::f64::consts::FRAC_PI_2 * 6371.0).abs() < 1e-9);
/// ```
pub fn geodesic_distance(
    from: GeographicPoint,
    to: GeographicPoint,
    equatorial_radius: f64,
    polar_radius: f64,
) -> f64 {
    let flattening = (equatorial_radius - polar_radius) / equatorial_radius;
    let f = ((from.latitude + to.latitude) / 2.0).to_radians();
    let g = ((from.latitude - to.latitude) / 2.0).to_radians();
    let lambda = ((from.longitude - to.longitude) / 2.0).to_radians();

    let (sin_f, cos_f) = f.sin_cos();
    let (sin_g, cos_g) = g.sin_cos();
    let (sin_l, cos_l) = lambda.sin_cos();

    let s = sin_g.powi(2) * cos_l.powi(2) + cos_f.powi(2) * sin_l.powi(2);
    let c = cos_g.powi(2) * cos_l.powi(2) + sin_f.powi(2) * sin_l.powi(2);
    let omega = (s / c).sqrt().atan();
    let r = (s * c).sqrt() / omega;
    let d = 2.0 * omega * equatorial_radius;
    let h1 = (3.0 * r - 1.0) / (2.0 * c);
    let h2 = (3.0 * r + 1.0) / (2.0 * s);

    d * (1.0 + flattening * h1 * sin_f.powi(2) * cos_g.powi(2)
        - flattening * h2 * cos_f.powi(2) * sin_g.powi(2))
}
