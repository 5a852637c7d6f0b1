// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Table-based ΔT model (Meeus, *Astronomical Algorithms* ch. 10).
//!
//! | Range | Formula |
//! |-------|---------|
//! | y < 948 | `2177 + 497t + 44.1t²` |
//! | 948 ≤ y < 1620 | `102 + 102t + 25.3t²` |
//! | 1620 ≤ y < 2000 | linear interpolation between even-year samples |
//! | y ≥ 2000 | `102 + 102t + 25.3t²` (+ `0.37(y − 2100)` before 2100) |
//!
//! with `t = (y − 2000)/100`.

use crate::errors::{EphemerisError, EphemerisResult};
use crate::polynomial::evaluate_polynomial;
use qtty::Seconds;
use std::borrow::Cow;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One tabulated ΔT observation.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeltaTSample {
    pub year: i32,
    /// ΔT in seconds.
    pub delta_t: f64,
}

impl DeltaTSample {
    pub const fn new(year: i32, delta_t: f64) -> Self {
        Self { year, delta_t }
    }
}

const FIRST_YEAR: i32 = 1620;
const TERMS: usize = 190;

/// Biennial ΔT from 1620 to 1998 (seconds), compiled by J. Meeus.
#[rustfmt::skip]
const MEEUS_BIENNIAL: [f64; TERMS] = [
    124.0,115.0,106.0, 98.0, 91.0, 85.0, 79.0, 74.0, 70.0, 65.0,
     62.0, 58.0, 55.0, 53.0, 50.0, 48.0, 46.0, 44.0, 42.0, 40.0,
     37.0, 35.0, 33.0, 31.0, 28.0, 26.0, 24.0, 22.0, 20.0, 18.0,
     16.0, 14.0, 13.0, 12.0, 11.0, 10.0,  9.0,  9.0,  9.0,  9.0,
      9.0,  9.0,  9.0,  9.0, 10.0, 10.0, 10.0, 10.0, 10.0, 11.0,
     11.0, 11.0, 11.0, 11.0, 11.0, 11.0, 12.0, 12.0, 12.0, 12.0,
     12.0, 12.0, 13.0, 13.0, 13.0, 13.0, 14.0, 14.0, 14.0, 15.0,
     15.0, 15.0, 15.0, 16.0, 16.0, 16.0, 16.0, 16.0, 17.0, 17.0,
     17.0, 17.0, 17.0, 17.0, 17.0, 17.0, 16.0, 16.0, 15.0, 14.0,
     13.7, 13.1, 12.7, 12.5, 12.5, 12.5, 12.5, 12.5, 12.5, 12.3,
     12.0, 11.4, 10.6,  9.6,  8.6,  7.5,  6.6,  6.0,  5.7,  5.6,
      5.7,  5.9,  6.2,  6.5,  6.8,  7.1,  7.3,  7.5,  7.7,  7.8,
      7.9,  7.5,  6.4,  5.4,  2.9,  1.6, -1.0, -2.7, -3.6, -4.7,
     -5.4, -5.2, -5.5, -5.6, -5.8, -5.9, -6.2, -6.4, -6.1, -4.7,
     -2.7,  0.0,  2.6,  5.4,  7.7, 10.5, 13.4, 16.0, 18.2, 20.2,
     21.2, 22.4, 23.5, 23.9, 24.3, 24.0, 23.9, 23.9, 23.7, 24.0,
     24.3, 25.3, 26.2, 27.3, 28.2, 29.1, 30.0, 30.7, 31.4, 32.2,
     33.1, 34.0, 35.0, 36.5, 38.3, 40.2, 42.2, 44.5, 46.5, 48.5,
     50.5, 52.2, 53.8, 54.9, 55.8, 56.9, 58.3, 60.0, 61.6, 63.0,
];

const fn biennial_samples() -> [DeltaTSample; TERMS] {
    let mut out = [DeltaTSample::new(0, 0.0); TERMS];
    let mut i = 0;
    while i < TERMS {
        out[i] = DeltaTSample::new(FIRST_YEAR + 2 * i as i32, MEEUS_BIENNIAL[i]);
        i += 1;
    }
    out
}

static MEEUS_SAMPLES: [DeltaTSample; TERMS] = biennial_samples();

/// Medieval/modern parabola `102 + 102t + 25.3t²`.
const MODERN: [f64; 3] = [102.0, 102.0, 25.3];
/// Pre-948 parabola `2177 + 497t + 44.1t²`.
const ANCIENT: [f64; 3] = [2_177.0, 497.0, 44.1];

/// A year-sorted ΔT sample table and the Meeus model evaluated over it.
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaTTable {
    samples: Cow<'static, [DeltaTSample]>,
}

impl Default for DeltaTTable {
    fn default() -> Self {
        Self::meeus()
    }
}

impl DeltaTTable {
    /// The bundled biennial table, 1620–1998.
    pub fn meeus() -> Self {
        Self {
            samples: Cow::Borrowed(&MEEUS_SAMPLES),
        }
    }

    /// Builds a table from caller samples, sorting them by year.
    ///
    /// Duplicate years are rejected with
    /// [`InvalidArgument`](EphemerisError::InvalidArgument).
    pub fn new(mut samples: Vec<DeltaTSample>) -> EphemerisResult<Self> {
        samples.sort_by_key(|s| s.year);
        if let Some(pair) = samples.windows(2).find(|w| w[0].year == w[1].year) {
            return Err(EphemerisError::invalid_argument(
                "samples",
                format!("duplicate ΔT sample for year {}", pair[0].year),
            ));
        }
        Ok(Self {
            samples: Cow::Owned(samples),
        })
    }

    pub fn samples(&self) -> &[DeltaTSample] {
        &self.samples
    }

    /// Tabulated ΔT for exactly `year`.
    pub fn sample(&self, year: i32) -> EphemerisResult<Seconds> {
        self.samples
            .binary_search_by_key(&year, |s| s.year)
            .map(|idx| Seconds::new(self.samples[idx].delta_t))
            .map_err(|_| EphemerisError::data_not_found(format!("ΔT sample for year {year}")))
    }

    /// Meeus table model at `decimal_year`.
    ///
    /// Between 1620 and 2000 the value is interpolated linearly between the
    /// samples at the even years bracketing `decimal_year`; if the upper
    /// bracket is 2000 or later the modern parabola is used instead.
    pub fn delta_t(&self, decimal_year: f64) -> EphemerisResult<Seconds> {
        let t = (decimal_year - 2000.0) / 100.0;
        match decimal_year {
            y if y < 948.0 => Ok(Seconds::new(evaluate_polynomial(&ANCIENT, t))),
            y if y < 1620.0 => Ok(Seconds::new(evaluate_polynomial(&MODERN, t))),
            y if y < 2000.0 => {
                let lo = (y / 2.0).floor() as i32 * 2;
                let hi = lo + 2;
                if hi >= 2000 {
                    return Ok(modern_delta_t(y));
                }
                let a = self.sample(lo)?;
                let b = self.sample(hi)?;
                let frac = (y - lo as f64) / (hi - lo) as f64;
                Ok(a + frac * (b - a))
            }
            y => Ok(modern_delta_t(y)),
        }
    }
}

/// Meeus parabola for recent years, with the `0.37·(y − 2100)` correction
/// that joins it to the 1998 table entry and to the 2100 value.
fn modern_delta_t(decimal_year: f64) -> Seconds {
    let t = (decimal_year - 2000.0) / 100.0;
    let mut dt = evaluate_polynomial(&MODERN, t);
    if decimal_year < 2100.0 {
        dt += 0.37 * (decimal_year - 2100.0);
    }
    Seconds::new(dt)
}
