// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types shared by every computation in the crate.
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | [`InvalidArgument`](EphemerisError::InvalidArgument) | Malformed calendar components, marker/phase index out of range |
//! | [`OutOfRange`](EphemerisError::OutOfRange) | Input outside an algorithm's validated domain |
//! | [`DataNotFound`](EphemerisError::DataNotFound) | Missing coefficient set or table sample |
//! | [`ConvergenceFailure`](EphemerisError::ConvergenceFailure) | Iteration cap exceeded |
//!
//! Nothing here is retried internally; every failure is handed back to the caller.

use thiserror::Error;

/// Unified error type for time-scale and ephemeris computations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    /// An argument is malformed independently of any validity domain.
    #[error("invalid argument `{argument}`: {message}")]
    InvalidArgument {
        argument: &'static str,
        message: String,
    },

    /// A numeric input lies outside the range an algorithm is validated for.
    #[error("{quantity} = {value} is outside the supported range [{min}, {max}]")]
    OutOfRange {
        quantity: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Data the algorithm relies on (coefficients, table samples) is absent.
    #[error("data not found: {what}")]
    DataNotFound { what: String },

    /// An iterative refinement did not settle within its iteration cap.
    #[error("{algorithm} did not converge after {iterations} iterations (residual {residual:e})")]
    ConvergenceFailure {
        algorithm: &'static str,
        iterations: usize,
        residual: f64,
    },
}

/// Convenience alias for `Result<T, EphemerisError>`.
pub type EphemerisResult<T> = Result<T, EphemerisError>;

impl EphemerisError {
    /// Creates an [`InvalidArgument`](Self::InvalidArgument) error.
    pub fn invalid_argument(argument: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument,
            message: message.into(),
        }
    }

    /// Creates an [`OutOfRange`](Self::OutOfRange) error.
    pub fn out_of_range(quantity: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRange {
            quantity,
            value,
            min,
            max,
        }
    }

    /// Creates a [`DataNotFound`](Self::DataNotFound) error.
    pub fn data_not_found(what: impl Into<String>) -> Self {
        Self::DataNotFound { what: what.into() }
    }

    /// Creates a [`ConvergenceFailure`](Self::ConvergenceFailure) error.
    pub fn convergence_failure(algorithm: &'static str, iterations: usize, residual: f64) -> Self {
        Self::ConvergenceFailure {
            algorithm,
            iterations,
            residual,
        }
    }
}
