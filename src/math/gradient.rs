//! Gradient, alignment, and update-step computations for the solver.
//!
//! ## Purpose
//!
//! This module provides the per-iteration vector operations of the
//! regularized solver: the fit vector (estimate projected through the
//! off-diagonal smoothing operator), the damped update step, the
//! relaxation blend, and the gradient-alignment evaluation that drives
//! both convergence detection and backtracking.
//!
//! ## Design notes
//!
//! * All functions write into caller-owned output slices; nothing here
//!   allocates.
//! * The alignment evaluation fuses the penalty sum, both gradient norms,
//!   and the raw dot product into one pass over the estimate, matching
//!   the access pattern of the reduction it was lifted from.
//! * The inner sums are data-parallel across `k`; parallelism is left to
//!   callers.
//!
//! ## Key concepts
//!
//! * **Alignment**: The raw dot product of the smoothness gradient and
//!   the fit gradient. A negative value means the two objectives pull the
//!   estimate in opposing directions and the step size must shrink.
//! * **Degeneracy rule**: When either gradient norm is zero, the cosine
//!   similarity is defined as `1` (treated as aligned/converged), which
//!   also avoids a division by zero.
//!
//! ## Non-goals
//!
//! * This module does not decide when to iterate or backtrack (engine).
//! * This module does not validate shapes (validator).

use num_traits::Float;

use crate::primitives::view::MatrixView;

// ============================================================================
// Update steps
// ============================================================================

/// Compute the fit vector: `psumi[j] = Σ_k p[k] * bmat[k, j]`.
///
/// Overwrites `psumi` entirely, so the buffer needs no clearing between
/// iterations.
#[inline]
pub fn fit_vector<T: Float>(p: &[T], bmat: MatrixView<'_, T>, psumi: &mut [T]) {
    let n = p.len();
    for (j, out) in psumi.iter_mut().enumerate().take(n) {
        let mut acc = T::zero();
        for (k, &pk) in p.iter().enumerate() {
            acc = acc + pk * bmat.get(k, j);
        }
        *out = acc;
    }
}

/// Compute the damped update target:
/// `dp[k] = (m[k]*alpha + sum_dia[k] - psumi[k]) / (bkk[k] + alpha)`.
///
/// The denominator is assumed non-zero; that is the caller's contract,
/// not validated here.
#[inline]
pub fn damped_update<T: Float>(
    m: &[T],
    sum_dia: &[T],
    psumi: &[T],
    bkk: &[T],
    alpha: T,
    dp: &mut [T],
) {
    for k in 0..dp.len() {
        dp[k] = (m[k] * alpha + sum_dia[k] - psumi[k]) / (bkk[k] + alpha);
    }
}

/// Blend `base` toward `dp` with relaxation factor `omega`:
/// `p[k] = (1 - omega) * base[k] + omega * dp[k]`.
#[inline]
pub fn relax<T: Float>(base: &[T], dp: &[T], omega: T, p: &mut [T]) {
    let one = T::one();
    for k in 0..p.len() {
        p[k] = (one - omega) * base[k] + omega * dp[k];
    }
}

/// Penalty of an estimate against its smoothness vector:
/// `s = -Σ (p[k] - m[k])^2`.
#[inline]
pub fn penalty<T: Float>(p: &[T], m: &[T]) -> T {
    let mut s = T::zero();
    for k in 0..p.len() {
        let diff = p[k] - m[k];
        s = s - diff * diff;
    }
    s
}

// ============================================================================
// Gradient alignment
// ============================================================================

/// Result of one gradient-alignment evaluation.
#[derive(Debug, Clone, Copy)]
pub struct Alignment<T> {
    /// Penalty `s = -Σ (P[k] - m[k])^2`.
    pub penalty: T,
    /// Raw dot product of smoothness and fit gradients.
    pub dotsp: T,
    /// Squared norm of the smoothness gradient.
    pub wgrads: T,
    /// Squared norm of the fit gradient.
    pub wgradc: T,
}

impl<T: Float> Alignment<T> {
    /// Cosine similarity of the two gradients.
    ///
    /// Degenerate case: when either squared norm is zero the similarity
    /// is `1` (aligned/converged).
    #[inline]
    pub fn cosine(&self) -> T {
        if self.wgrads == T::zero() || self.wgradc == T::zero() {
            T::one()
        } else {
            self.dotsp / (self.wgrads.sqrt() * self.wgradc.sqrt())
        }
    }
}

/// Evaluate penalty, gradients, and their alignment for the current
/// estimate.
///
/// Per index `k`: `grads[k] = -2(P[k] - m[k])` and
/// `gradc[k] = 2 Σ_j P[j]*B[j,k] - 2*sum_dia[k]`; the returned struct
/// carries `Σ grads²`, `Σ gradc²`, the raw `Σ grads*gradc`, and the
/// penalty, accumulated in a single pass.
pub fn alignment<T: Float>(
    p: &[T],
    m: &[T],
    b: MatrixView<'_, T>,
    sum_dia: &[T],
) -> Alignment<T> {
    let n = p.len();
    let two = T::from(2.0).unwrap();

    let mut s = T::zero();
    let mut dotsp = T::zero();
    let mut wgrads = T::zero();
    let mut wgradc = T::zero();

    for k in 0..n {
        let diff = p[k] - m[k];
        s = s - diff * diff;

        let gradsi = -two * diff;
        wgrads = wgrads + gradsi * gradsi;

        let mut gradci = T::zero();
        for (j, &pj) in p.iter().enumerate() {
            gradci = gradci + two * pj * b.get(j, k);
        }
        gradci = gradci - two * sum_dia[k];

        wgradc = wgradc + gradci * gradci;
        dotsp = dotsp + gradci * gradsi;
    }

    Alignment {
        penalty: s,
        dotsp,
        wgrads,
        wgradc,
    }
}
