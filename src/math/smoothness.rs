//! Smoothness constraint vector for the regularized solver.
//!
//! ## Purpose
//!
//! The solver's regularization term compares each point of the estimate
//! against the average of its two neighbors. This module computes that
//! neighbor-average vector `m` from the current estimate `P`.
//!
//! ## Invariants
//!
//! * `m` and `p` have the same length (callers validate this upstream).
//! * The boundary formula is asymmetric on purpose: `m[0] = P[1]/2` and
//!   `m[N-1] = P[N-2]/2` omit any contribution from the endpoint itself.
//!   This matches the established reduction behavior and must not be
//!   "fixed" to a limiting case of the interior average without domain
//!   confirmation.

use num_traits::Float;

/// Fill `m` with the neighbor average of `p`.
///
/// Interior points use `m[k] = (P[k-1] + P[k+1]) / 2`; the endpoints use
/// the asymmetric half-neighbor rule described in the module docs.
///
/// Requires `p.len() >= 2`.
#[inline]
pub fn smoothness_vector<T: Float>(p: &[T], m: &mut [T]) {
    let n = p.len();
    let half = T::from(0.5).unwrap();

    for k in 1..n - 1 {
        m[k] = (p[k - 1] + p[k + 1]) * half;
    }

    m[0] = p[1] * half;
    m[n - 1] = p[n - 2] * half;
}
