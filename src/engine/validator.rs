//! Input validation for solver and aggregator entry points.
//!
//! ## Purpose
//!
//! This module is the boundary layer: it checks shapes, lengths, finite
//! values, and parameter bounds *before* either numeric kernel runs. The
//! kernels themselves are not defensively coded and must never be entered
//! with invalid inputs.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Invariants
//!
//! * All validated inputs satisfy their respective mathematical
//!   constraints.
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not transform or correct invalid inputs.
//! * This module does not perform the solve or the aggregation itself.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;

use num_traits::Float;

use crate::engine::solver::SolverControls;
use crate::primitives::errors::SasError;
use crate::primitives::view::MatrixView;

/// Validation utility for solver and aggregator inputs.
///
/// Provides static methods returning `Result<(), SasError>` that fail
/// fast upon the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Solver Input Validation
    // ========================================================================

    /// Validate an estimate vector: non-empty, long enough for the
    /// smoothness constraint, and finite throughout.
    pub fn validate_estimate<T: Float>(p: &[T]) -> Result<(), SasError> {
        if p.is_empty() {
            return Err(SasError::EmptyInput);
        }
        if p.len() < 2 {
            return Err(SasError::TooFewPoints {
                got: p.len(),
                min: 2,
            });
        }
        Self::validate_finite(p, "P")
    }

    /// Validate that `matrix` is square with side `n`.
    pub fn validate_square<T: Copy>(
        matrix: &MatrixView<'_, T>,
        n: usize,
        name: &'static str,
    ) -> Result<(), SasError> {
        if matrix.shape() != (n, n) {
            return Err(SasError::DimensionMismatch {
                name,
                expected: (n, n),
                got: matrix.shape(),
            });
        }
        Ok(())
    }

    /// Validate that `values` has length `n`.
    pub fn validate_length<T>(
        values: &[T],
        n: usize,
        name: &'static str,
    ) -> Result<(), SasError> {
        if values.len() != n {
            return Err(SasError::LengthMismatch {
                name,
                expected: n,
                got: values.len(),
            });
        }
        Ok(())
    }

    /// Validate that every element of `values` is finite.
    pub fn validate_finite<T: Float>(values: &[T], name: &str) -> Result<(), SasError> {
        for (i, &val) in values.iter().enumerate() {
            if !val.is_finite() {
                return Err(SasError::InvalidNumericValue(format!(
                    "{}[{}]={}",
                    name,
                    i,
                    val.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }
        Ok(())
    }

    /// Validate a single scalar for finiteness.
    pub fn validate_scalar<T: Float>(val: T, name: &str) -> Result<(), SasError> {
        if !val.is_finite() {
            return Err(SasError::InvalidNumericValue(format!(
                "{}={}",
                name,
                val.to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok(())
    }

    /// Validate the solver step-control scalars.
    ///
    /// `alpha` may be any finite value; `bkkmax` may be infinite (which
    /// leaves backtracking permanently enabled).
    pub fn validate_controls<T: Float>(controls: &SolverControls<T>) -> Result<(), SasError> {
        Self::validate_scalar(controls.alpha, "alpha")?;
        Self::validate_scalar(controls.dotsp0, "dotsp0")?;

        let omega = controls.omega.to_f64().unwrap_or(f64::NAN);
        if !omega.is_finite() || omega <= 0.0 || omega > 1.0 {
            return Err(SasError::InvalidRelaxation(omega));
        }

        let omegamin = controls.omegamin.to_f64().unwrap_or(f64::NAN);
        if !omegamin.is_finite() || omegamin < 0.0 {
            return Err(SasError::InvalidRelaxation(omegamin));
        }

        let reduction = controls.omegareduction.to_f64().unwrap_or(f64::NAN);
        if !reduction.is_finite() || reduction <= 1.0 {
            return Err(SasError::InvalidReduction(reduction));
        }

        let tol = controls.dotsptol.to_f64().unwrap_or(f64::NAN);
        if !tol.is_finite() || tol < 0.0 {
            return Err(SasError::InvalidTolerance(tol));
        }

        if controls.minit > controls.maxit {
            return Err(SasError::InvalidIterations {
                maxit: controls.maxit,
                minit: controls.minit,
            });
        }

        Ok(())
    }

    // ========================================================================
    // Aggregator Input Validation
    // ========================================================================

    /// Validate that `mask` matches the image shape.
    pub fn validate_mask<T: Copy>(
        image: &MatrixView<'_, T>,
        mask: &MatrixView<'_, T>,
        name: &'static str,
    ) -> Result<(), SasError> {
        if mask.shape() != image.shape() {
            return Err(SasError::DimensionMismatch {
                name,
                expected: image.shape(),
                got: mask.shape(),
            });
        }
        Ok(())
    }

    /// Validate the radial bin bounds and output buffer capacity.
    ///
    /// The bounds are exclusive on both sides, so at least one bin index
    /// must fit strictly between them, and `hist` must cover every
    /// reachable bin.
    pub fn validate_bins(
        low_q: usize,
        high_q: usize,
        hist_len: usize,
        stats_bins: usize,
    ) -> Result<(), SasError> {
        if low_q + 1 >= high_q {
            return Err(SasError::InvalidBinRange {
                low: low_q,
                high: high_q,
            });
        }
        if hist_len < high_q {
            return Err(SasError::BufferTooSmall {
                name: "hist",
                needed: high_q,
                got: hist_len,
            });
        }
        if stats_bins < high_q {
            return Err(SasError::BufferTooSmall {
                name: "hist_count",
                needed: high_q,
                got: stats_bins,
            });
        }
        Ok(())
    }

    /// Validate a beam center for finiteness.
    pub fn validate_center<T: Float>(x_c: T, y_c: T) -> Result<(), SasError> {
        Self::validate_scalar(x_c, "x_c")?;
        Self::validate_scalar(y_c, "y_c")
    }
}
