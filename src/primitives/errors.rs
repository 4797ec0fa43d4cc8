//! Error types for boundary-layer validation failures.
//!
//! ## Purpose
//!
//! This module defines [`SasError`], the typed error returned by every
//! fallible boundary-layer function in the crate. The numeric kernels
//! themselves recognize no error conditions: they trust pre-validated,
//! correctly shaped buffers, so all failures are reported here *before*
//! a kernel runs.
//!
//! ## Design notes
//!
//! * **Fieldful variants**: Each variant carries the offending values so
//!   messages are actionable without a debugger.
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **`no_std`**: Only `Display` requires `alloc`; the `std::error::Error`
//!   impl is gated on the `std` feature.
//!
//! ## Non-goals
//!
//! * This module does not classify numeric degeneracies inside the kernels
//!   (e.g. zero gradient norms); those resolve deterministically in the
//!   math layer rather than surfacing as errors.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;

use core::fmt;

/// Errors reported by the boundary layer before a kernel is entered.
#[derive(Debug, Clone, PartialEq)]
pub enum SasError {
    /// An input array was empty.
    EmptyInput,

    /// An estimate vector was too short for the smoothness constraint.
    TooFewPoints {
        /// Number of points received.
        got: usize,
        /// Minimum number of points required.
        min: usize,
    },

    /// A matrix did not have the expected shape.
    DimensionMismatch {
        /// Name of the offending argument.
        name: &'static str,
        /// Expected shape as (rows, cols).
        expected: (usize, usize),
        /// Actual shape as (rows, cols).
        got: (usize, usize),
    },

    /// A vector did not have the expected length.
    LengthMismatch {
        /// Name of the offending argument.
        name: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// A caller-provided output buffer was too small.
    BufferTooSmall {
        /// Name of the offending buffer.
        name: &'static str,
        /// Minimum length required.
        needed: usize,
        /// Actual length.
        got: usize,
    },

    /// A scalar or element was NaN or infinite where a finite value is required.
    InvalidNumericValue(String),

    /// The relaxation factor was outside (0, 1] or not finite.
    InvalidRelaxation(f64),

    /// The step-size reduction divisor was not greater than 1.
    InvalidReduction(f64),

    /// A convergence tolerance was negative or not finite.
    InvalidTolerance(f64),

    /// The iteration bounds were inconsistent (`minit` exceeds `maxit`).
    InvalidIterations {
        /// Maximum iteration count.
        maxit: usize,
        /// Minimum iteration count.
        minit: usize,
    },

    /// The radial bin range was empty or inverted.
    InvalidBinRange {
        /// Lower (exclusive) bin bound.
        low: usize,
        /// Upper (exclusive) bin bound.
        high: usize,
    },

    /// A required builder parameter was never set.
    MissingParameter {
        /// Name of the missing parameter.
        parameter: &'static str,
    },
}

impl fmt::Display for SasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SasError::EmptyInput => write!(f, "Input arrays are empty"),
            SasError::TooFewPoints { got, min } => {
                write!(f, "Too few points: got {}, need at least {}", got, min)
            }
            SasError::DimensionMismatch {
                name,
                expected,
                got,
            } => write!(
                f,
                "Shape mismatch for '{}': expected {}x{}, got {}x{}",
                name, expected.0, expected.1, got.0, got.1
            ),
            SasError::LengthMismatch {
                name,
                expected,
                got,
            } => write!(
                f,
                "Length mismatch for '{}': expected {}, got {}",
                name, expected, got
            ),
            SasError::BufferTooSmall { name, needed, got } => write!(
                f,
                "Buffer '{}' too small: need at least {}, got {}",
                name, needed, got
            ),
            SasError::InvalidNumericValue(detail) => {
                write!(f, "Invalid numeric value: {}", detail)
            }
            SasError::InvalidRelaxation(omega) => write!(
                f,
                "Invalid relaxation factor: {} (must be in (0, 1] and finite)",
                omega
            ),
            SasError::InvalidReduction(reduction) => write!(
                f,
                "Invalid step reduction: {} (must be > 1 and finite)",
                reduction
            ),
            SasError::InvalidTolerance(tol) => write!(
                f,
                "Invalid tolerance: {} (must be >= 0 and finite)",
                tol
            ),
            SasError::InvalidIterations { maxit, minit } => write!(
                f,
                "Invalid iteration bounds: minit {} exceeds maxit {}",
                minit, maxit
            ),
            SasError::InvalidBinRange { low, high } => write!(
                f,
                "Invalid bin range: ({}, {}) selects no bins",
                low, high
            ),
            SasError::MissingParameter { parameter } => {
                write!(f, "Required parameter '{}' was not set", parameter)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SasError {}
