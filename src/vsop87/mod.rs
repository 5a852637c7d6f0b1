// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # VSOP87 series evaluation
//!
//! A VSOP87 (variant D) coefficient set holds, for each of the three
//! heliocentric ecliptic variables L, B and R and each power `α` of the time
//! argument, a list of periodic terms `A·cos(B + C·τ)`. The variable is
//!
//! ```text
//! X(τ) = Σ_α τ^α · Σ_i A_i·cos(B_i + C_i·τ)
//! ```
//!
//! with `τ` in Julian millennia of TT from J2000.0. L and B come out in
//! radians, normalized to `(−π, π]`; R in astronomical units.
//!
//! Coefficient sets are plain values: callers load them however they like
//! and hand them to [`SeriesCoefficientSet::position`] or, through a
//! [`CoefficientProvider`], to [`body_position`]. A truncated Earth set is
//! bundled as [`earth()`].

mod earth;
mod text;

use crate::angle::normalize_pi;
use crate::errors::{EphemerisError, EphemerisResult};
use crate::instant::{Time, TimeScale};
use crate::scales::JD;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::OnceLock;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Metres per astronomical unit (IAU 2012 Resolution B2).
pub const ASTRONOMICAL_UNIT: f64 = 149_597_870_700.0;

/// Highest power of τ a series may carry.
pub const MAX_EXPONENT: usize = 5;

const EXPONENTS: usize = MAX_EXPONENT + 1;

// ── Terms and variables ───────────────────────────────────────────────────

/// One periodic term `amplitude · cos(phase + frequency·τ)`.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PeriodicTerm {
    /// Radians for L and B, AU for R.
    pub amplitude: f64,
    /// Radians.
    pub phase: f64,
    /// Radians per Julian millennium.
    pub frequency: f64,
}

impl PeriodicTerm {
    pub const fn new(amplitude: f64, phase: f64, frequency: f64) -> Self {
        Self {
            amplitude,
            phase,
            frequency,
        }
    }

    #[inline]
    pub fn evaluate(&self, tau: f64) -> f64 {
        self.amplitude * self.frequency.mul_add(tau, self.phase).cos()
    }
}

/// The three heliocentric ecliptic variables of a VSOP87D series.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SeriesVariable {
    Longitude,
    Latitude,
    Radius,
}

impl SeriesVariable {
    pub const ALL: [SeriesVariable; 3] = [Self::Longitude, Self::Latitude, Self::Radius];

    #[inline]
    const fn index(self) -> usize {
        match self {
            Self::Longitude => 0,
            Self::Latitude => 1,
            Self::Radius => 2,
        }
    }
}

impl fmt::Display for SeriesVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Longitude => "L",
            Self::Latitude => "B",
            Self::Radius => "R",
        };
        f.write_str(symbol)
    }
}

// ── Coefficient sets ──────────────────────────────────────────────────────

/// Terms for one body, indexed by variable and by power of τ (0…=5).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SeriesCoefficientSet {
    series: [[Vec<PeriodicTerm>; EXPONENTS]; 3],
}

/// Heliocentric ecliptic coordinates referred to the mean dynamical
/// ecliptic and equinox of date.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeliocentricPosition {
    /// Radians in `(−π, π]`.
    pub longitude: f64,
    /// Radians in `(−π, π]`.
    pub latitude: f64,
    /// Astronomical units.
    pub radius: f64,
}

impl HeliocentricPosition {
    #[inline]
    pub fn radius_meters(&self) -> f64 {
        self.radius * ASTRONOMICAL_UNIT
    }
}

fn check_exponent(exponent: usize) -> EphemerisResult<()> {
    if exponent > MAX_EXPONENT {
        return Err(EphemerisError::invalid_argument(
            "exponent",
            format!("power of τ must be within 0..={MAX_EXPONENT}, got {exponent}"),
        ));
    }
    Ok(())
}

impl SeriesCoefficientSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the terms multiplying `τ^exponent` in `variable`.
    pub fn set_terms(
        &mut self,
        variable: SeriesVariable,
        exponent: usize,
        terms: Vec<PeriodicTerm>,
    ) -> EphemerisResult<()> {
        check_exponent(exponent)?;
        self.series[variable.index()][exponent] = terms;
        Ok(())
    }

    /// Appends a single term to `variable`'s `τ^exponent` series.
    pub fn push_term(
        &mut self,
        variable: SeriesVariable,
        exponent: usize,
        term: PeriodicTerm,
    ) -> EphemerisResult<()> {
        check_exponent(exponent)?;
        self.series[variable.index()][exponent].push(term);
        Ok(())
    }

    /// Builder form of [`set_terms`](Self::set_terms).
    pub fn with_terms(
        mut self,
        variable: SeriesVariable,
        exponent: usize,
        terms: Vec<PeriodicTerm>,
    ) -> EphemerisResult<Self> {
        self.set_terms(variable, exponent, terms)?;
        Ok(self)
    }

    /// Terms multiplying `τ^exponent`; empty when none were loaded or the
    /// exponent exceeds [`MAX_EXPONENT`].
    pub fn terms(&self, variable: SeriesVariable, exponent: usize) -> &[PeriodicTerm] {
        self.series[variable.index()]
            .get(exponent)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of terms across all variables and exponents.
    pub fn term_count(&self) -> usize {
        self.series.iter().flatten().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.term_count() == 0
    }

    /// Raw series value of `variable` at `tau` millennia, not normalized.
    pub fn evaluate(&self, variable: SeriesVariable, tau: f64) -> f64 {
        // Horner over the per-exponent sums, highest power first.
        self.series[variable.index()]
            .iter()
            .rev()
            .fold(0.0, |acc, terms| {
                let sum: f64 = terms.iter().map(|t| t.evaluate(tau)).sum();
                acc.mul_add(tau, sum)
            })
    }

    /// Heliocentric L, B, R at `instant`.
    ///
    /// Fails with [`DataNotFound`](EphemerisError::DataNotFound) when the set
    /// holds no terms at all.
    pub fn position<S: TimeScale>(&self, instant: Time<S>) -> EphemerisResult<HeliocentricPosition> {
        if self.is_empty() {
            return Err(EphemerisError::data_not_found("VSOP87 coefficient set is empty"));
        }
        let tau = instant.to::<JD>().julian_millennias().value();
        Ok(HeliocentricPosition {
            longitude: normalize_pi(self.evaluate(SeriesVariable::Longitude, tau)),
            latitude: normalize_pi(self.evaluate(SeriesVariable::Latitude, tau)),
            radius: self.evaluate(SeriesVariable::Radius, tau),
        })
    }

    /// Builds a set from `[A, B, C]` rows grouped by exponent, multiplying
    /// each amplitude by `scale`.
    pub(crate) fn from_scaled_tables(
        longitude: &[&[[f64; 3]]],
        latitude: &[&[[f64; 3]]],
        radius: &[&[[f64; 3]]],
        scale: f64,
    ) -> Self {
        let mut set = Self::new();
        let tables = [longitude, latitude, radius];
        for (variable, table) in SeriesVariable::ALL.into_iter().zip(tables) {
            for (exponent, rows) in table.iter().take(EXPONENTS).enumerate() {
                set.series[variable.index()][exponent] = rows
                    .iter()
                    .map(|&[a, b, c]| PeriodicTerm::new(a * scale, b, c))
                    .collect();
            }
        }
        set
    }
}

/// The bundled truncated VSOP87D Earth series.
///
/// Built once on first use. Accurate to roughly 1″ in longitude over a few
/// millennia around J2000.
pub fn earth() -> &'static SeriesCoefficientSet {
    static EARTH: OnceLock<SeriesCoefficientSet> = OnceLock::new();
    EARTH.get_or_init(|| {
        SeriesCoefficientSet::from_scaled_tables(
            earth::EARTH_L,
            earth::EARTH_B,
            earth::EARTH_R,
            earth::AMPLITUDE_SCALE,
        )
    })
}

// ── Bodies and providers ──────────────────────────────────────────────────

/// Major planets with a VSOP87D series.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Body {
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl Body {
    pub const ALL: [Body; 8] = [
        Self::Mercury,
        Self::Venus,
        Self::Earth,
        Self::Mars,
        Self::Jupiter,
        Self::Saturn,
        Self::Uranus,
        Self::Neptune,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Earth => "Earth",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Source of coefficient sets keyed by body.
pub trait CoefficientProvider {
    /// The set for `body`, if this provider has one.
    fn coefficients(&self, body: Body) -> Option<&SeriesCoefficientSet>;
}

impl CoefficientProvider for HashMap<Body, SeriesCoefficientSet> {
    fn coefficients(&self, body: Body) -> Option<&SeriesCoefficientSet> {
        self.get(&body)
    }
}

impl CoefficientProvider for BTreeMap<Body, SeriesCoefficientSet> {
    fn coefficients(&self, body: Body) -> Option<&SeriesCoefficientSet> {
        self.get(&body)
    }
}

/// Provider backed by the data bundled with the crate (Earth only).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct BundledSeries;

impl CoefficientProvider for BundledSeries {
    fn coefficients(&self, body: Body) -> Option<&SeriesCoefficientSet> {
        match body {
            Body::Earth => Some(earth()),
            _ => None,
        }
    }
}

/// Heliocentric position of `body` from `provider`'s coefficients.
///
/// A provider without a set for `body` yields
/// [`DataNotFound`](EphemerisError::DataNotFound).
pub fn body_position<P, S>(
    provider: &P,
    body: Body,
    instant: Time<S>,
) -> EphemerisResult<HeliocentricPosition>
where
    P: CoefficientProvider + ?Sized,
    S: TimeScale,
{
    provider
        .coefficients(body)
        .ok_or_else(|| EphemerisError::data_not_found(format!("VSOP87 coefficients for {body}")))?
        .position(instant)
}
