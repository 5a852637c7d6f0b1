// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Power-series evaluation shared by the ΔT, lunar and seasonal models.

/// Evaluates `Σ cᵢ·xⁱ` with Horner's scheme.
///
/// `coefficients[0]` is the constant term. An empty slice evaluates to `0.0`.
///
/// ```
/// use ephemera::evaluate_polynomial;
///
/// // 1 + 2x + 3x² at x = 2
/// assert_eq!(evaluate_polynomial(&[1.0, 2.0, 3.0], 2.0), 17.0);
/// ```
#[inline]
pub fn evaluate_polynomial(coefficients: &[f64], x: f64) -> f64 {
    coefficients
        .iter()
        .rev()
        .fold(0.0, |acc, &c| acc.mul_add(x, c))
}
