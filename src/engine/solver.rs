//! Regularized iterative solver with backtracking step-size control.
//!
//! ## Purpose
//!
//! This module runs the damped outer loop of the regularized estimator:
//! each accepted iteration recomputes the smoothness vector and the fit
//! vector, blends the estimate toward the damped update target, and
//! evaluates the alignment of the smoothness and fit gradients. When the
//! gradients oppose each other the relaxation factor is repeatedly divided
//! down (backtracking) until the step is acceptable or the factor hits its
//! floor.
//!
//! ## Design notes
//!
//! * **Unchecked core**: The kernel performs no bounds or shape checks;
//!   malformed inputs are a contract violation, not a recoverable error.
//!   The validator rejects them before this module is entered.
//! * **Strictly sequential**: Each outer iteration depends on the prior
//!   estimate; only the inner sums are data-parallel.
//! * **No internal cancellation**: Termination is governed solely by the
//!   loop condition; external cancellation must wrap the call.
//!
//! ## Key concepts
//!
//! * **Outer loop**: Runs while
//!   `(ite < maxit AND omega > omegamin AND |1 - dotsp| > dotsptol)
//!   OR ite < minit`.
//! * **Backtracking**: While the raw gradient dot product is negative
//!   (and `alpha < bkkmax`, `ite > 1`, `omega > omegamin`), divide `omega`
//!   by `omegareduction` and re-derive the estimate from the pre-update
//!   snapshot.
//! * **Penalty**: The returned scalar `s = -Σ (P[k] - m[k])^2`.
//!
//! ## Invariants
//!
//! * `0 <= ite <= max(maxit, minit)`.
//! * `omega` is non-increasing within a call.
//! * `P` is overwritten in place only on accepted outer iterations; the
//!   backtracking re-derivations always start from the snapshot `Pold`.
//!
//! ## Non-goals
//!
//! * This module does not assemble `B`, `Bmat`, `sum_dia`, or `bkk`
//!   (see `algorithms::system`).
//! * This module does not search over `alpha` or `dmax`; it performs the
//!   single inner solve an evidence search would call repeatedly.

use num_traits::Float;

use crate::math::gradient::{alignment, damped_update, fit_vector, penalty, relax, Alignment};
use crate::math::smoothness::smoothness_vector;
use crate::engine::workspace::IftWorkspace;
use crate::primitives::view::MatrixView;

// ============================================================================
// Controls
// ============================================================================

/// Step-control scalars for one regularized solve.
#[derive(Debug, Clone, Copy)]
pub struct SolverControls<T> {
    /// Regularization weight balancing smoothness against fit.
    pub alpha: T,
    /// Initial relaxation factor.
    pub omega: T,
    /// Relaxation floor; backtracking stops at or below this value.
    pub omegamin: T,
    /// Divisor applied to `omega` on each backtracking step.
    pub omegareduction: T,
    /// Ceiling on `alpha` above which backtracking is disabled.
    pub bkkmax: T,
    /// Maximum outer iterations.
    pub maxit: usize,
    /// Minimum outer iterations, enforced regardless of convergence.
    pub minit: usize,
    /// Convergence tolerance on `|1 - dotsp|`.
    pub dotsptol: T,
    /// Initial gradient-alignment value.
    pub dotsp0: T,
}

impl<T: Float> Default for SolverControls<T> {
    /// Defaults matching the established reduction driver.
    fn default() -> Self {
        Self {
            alpha: T::one(),
            omega: T::from(0.5).unwrap(),
            omegamin: T::from(0.001).unwrap(),
            omegareduction: T::from(2.0).unwrap(),
            bkkmax: T::infinity(),
            maxit: 1000,
            minit: 10,
            dotsptol: T::from(0.001).unwrap(),
            dotsp0: T::zero(),
        }
    }
}

// ============================================================================
// Solver
// ============================================================================

/// Run the regularized solve, mutating `p` in place.
///
/// `b` and `bmat` are `n x n` where `n = p.len()`; `sum_dia` and `bkk`
/// have length `n`; the workspace buffers have length `n` and their
/// incoming contents seed the first gradient evaluation (`m` is
/// conventionally the prior, or zeros). Returns the penalty `s` of the
/// final estimate.
pub fn solve<T: Float>(
    controls: &SolverControls<T>,
    b: MatrixView<'_, T>,
    bmat: MatrixView<'_, T>,
    sum_dia: &[T],
    bkk: &[T],
    p: &mut [T],
    ws: &mut IftWorkspace<T>,
) -> T {
    let (m, psumi, dp, pold) = ws.parts();

    let mut ite = 0usize;
    let mut omega = controls.omega;
    let mut dotsp = controls.dotsp0;
    let mut s = penalty(p, m);

    while (ite < controls.maxit
        && omega > controls.omegamin
        && (T::one() - dotsp).abs() > controls.dotsptol)
        || ite < controls.minit
    {
        // The first pass evaluates the incoming estimate as-is.
        if ite != 0 {
            smoothness_vector(p, m);
            fit_vector(p, bmat, psumi);
            damped_update(m, sum_dia, psumi, bkk, controls.alpha, dp);

            pold.copy_from_slice(p);
            relax(pold, dp, omega, p);
        }
        ite += 1;

        let align = alignment(p, m, b, sum_dia);
        let (next_omega, align) = backtrack(
            b, sum_dia, m, pold, dp, p, omega, align, controls, ite,
        );
        omega = next_omega;

        s = align.penalty;
        dotsp = align.cosine();
    }

    s
}

/// Shrink `omega` while the gradients oppose each other.
///
/// While the raw dot product is negative, `alpha < bkkmax`, `ite > 1`,
/// and `omega > omegamin`: divide `omega` by `omegareduction`, re-derive
/// `p` from the snapshot `pold`, and re-evaluate the alignment. Returns
/// the final `omega` and alignment.
#[allow(clippy::too_many_arguments)]
pub fn backtrack<T: Float>(
    b: MatrixView<'_, T>,
    sum_dia: &[T],
    m: &[T],
    pold: &[T],
    dp: &[T],
    p: &mut [T],
    mut omega: T,
    mut align: Alignment<T>,
    controls: &SolverControls<T>,
    ite: usize,
) -> (T, Alignment<T>) {
    while align.dotsp < T::zero()
        && controls.alpha < controls.bkkmax
        && ite > 1
        && omega > controls.omegamin
    {
        omega = omega / controls.omegareduction;
        relax(pold, dp, omega, p);
        align = alignment(p, m, b, sum_dia);
    }

    (omega, align)
}
