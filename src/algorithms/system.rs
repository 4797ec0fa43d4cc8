//! Weighted-system assembly for the regularized solver.
//!
//! ## Purpose
//!
//! This module turns a transfer matrix and a measured intensity curve
//! (with per-point variances) into the precomputed quantities the solver
//! consumes: the kernel matrix `B`, its zero-diagonal companion `Bmat`,
//! the diagonal `bkk`, the weighted data projection `sum_dia`, and the
//! backtracking ceiling `bkkmax`.
//!
//! ## Design notes
//!
//! * This is an API-layer collaborator, not a kernel: it allocates its
//!   outputs once per dataset, while the solver itself allocates nothing.
//! * `B` is symmetric by construction (`B[k,j] = Σ_i T[i,k]*T[i,j]/σ²_i`);
//!   the assembly exploits no symmetry to keep the indexing obvious.
//!
//! ## Key concepts
//!
//! * **`sum_dia`**: `Σ_i T[i,k]*I_i/σ²_i`, the data pull on each estimate
//!   point.
//! * **`bkkmax`**: `10 * max(bkk)`, the regularization ceiling above which
//!   backtracking is disabled.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{format, vec::Vec};

use num_traits::Float;

use crate::primitives::errors::SasError;
use crate::primitives::view::MatrixView;

/// Precomputed solver inputs for one dataset.
#[derive(Debug, Clone)]
pub struct IftSystem<T> {
    /// Estimate length (number of `P(r)` points).
    pub n: usize,
    /// Kernel matrix `B`, row-major `n x n`.
    pub b: Vec<T>,
    /// `B` with its diagonal zeroed, row-major `n x n`.
    pub bmat: Vec<T>,
    /// Weighted data projection, length `n`.
    pub sum_dia: Vec<T>,
    /// Diagonal of `B`, length `n`.
    pub bkk: Vec<T>,
    /// Backtracking ceiling, `10 * max(bkk)`.
    pub bkkmax: T,
}

/// Assemble solver inputs from transfer matrix `t` (`q.len() x n`),
/// measured `intensity`, and per-point `variance`.
///
/// Errors with [`SasError::LengthMismatch`] when `intensity` or
/// `variance` does not have `t.rows()` entries, and
/// [`SasError::InvalidNumericValue`] when a variance is not a positive
/// finite value.
pub fn assemble<T: Float>(
    t: MatrixView<'_, T>,
    intensity: &[T],
    variance: &[T],
) -> Result<IftSystem<T>, SasError> {
    let (rows, n) = t.shape();
    if intensity.len() != rows {
        return Err(SasError::LengthMismatch {
            name: "intensity",
            expected: rows,
            got: intensity.len(),
        });
    }
    if variance.len() != rows {
        return Err(SasError::LengthMismatch {
            name: "variance",
            expected: rows,
            got: variance.len(),
        });
    }
    for (i, &var) in variance.iter().enumerate() {
        if !var.is_finite() || var <= T::zero() {
            return Err(SasError::InvalidNumericValue(format!(
                "variance[{}]={}",
                i,
                var.to_f64().unwrap_or(f64::NAN)
            )));
        }
    }

    let ten = T::from(10.0).unwrap();

    let mut sum_dia = vec![T::zero(); n];
    for k in 0..n {
        let mut acc = T::zero();
        for i in 0..rows {
            acc = acc + t.get(i, k) * intensity[i] / variance[i];
        }
        sum_dia[k] = acc;
    }

    let mut b = vec![T::zero(); n * n];
    for k in 0..n {
        for j in 0..n {
            let mut acc = T::zero();
            for i in 0..rows {
                acc = acc + t.get(i, k) * t.get(i, j) / variance[i];
            }
            b[k * n + j] = acc;
        }
    }

    let mut bmat = b.clone();
    let mut bkk = vec![T::zero(); n];
    let mut bkkmax = T::zero();
    for k in 0..n {
        let diag = b[k * n + k];
        bkk[k] = diag;
        bmat[k * n + k] = T::zero();
        if diag > bkkmax {
            bkkmax = diag;
        }
    }
    bkkmax = bkkmax * ten;

    Ok(IftSystem {
        n,
        b,
        bmat,
        sum_dia,
        bkk,
        bkkmax,
    })
}

impl<T: Copy> IftSystem<T> {
    /// View of the kernel matrix `B`.
    pub fn b_view(&self) -> MatrixView<'_, T> {
        // Shape is consistent by construction.
        MatrixView::from_slice(&self.b, self.n, self.n).expect("IftSystem holds an n*n kernel")
    }

    /// View of the zero-diagonal smoothing operator `Bmat`.
    pub fn bmat_view(&self) -> MatrixView<'_, T> {
        MatrixView::from_slice(&self.bmat, self.n, self.n).expect("IftSystem holds an n*n kernel")
    }
}
