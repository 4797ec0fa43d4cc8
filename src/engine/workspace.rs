//! Workspace for reusable solver buffers.
//!
//! This module provides the caller-owned scratch space the solver mutates
//! during a call: the smoothness vector `m`, the fit vector `Psumi`, the
//! update target `dP`, and the pre-update snapshot `Pold`. Reusing one
//! workspace across repeated solves (e.g. an evidence search over many
//! `(alpha, dmax)` pairs) avoids reallocating four vectors per call.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use num_traits::Float;

/// Scratch buffers for one regularized solve.
///
/// All four buffers share the estimate length. `reset` zeroes them; the
/// smoothness vector may be seeded afterwards (the first gradient
/// evaluation reads whatever `m` holds, conventionally the prior).
pub struct IftWorkspace<T> {
    /// Smoothness constraint vector `m`.
    pub m: Vec<T>,
    /// Fit vector `Psumi`.
    pub psumi: Vec<T>,
    /// Damped update target `dP`.
    pub dp: Vec<T>,
    /// Snapshot of `P` before the current update, re-read during
    /// backtracking.
    pub pold: Vec<T>,
}

impl<T: Float> IftWorkspace<T> {
    /// Create a zeroed workspace for estimates of length `n`.
    pub fn new(n: usize) -> Self {
        Self {
            m: vec![T::zero(); n],
            psumi: vec![T::zero(); n],
            dp: vec![T::zero(); n],
            pold: vec![T::zero(); n],
        }
    }

    /// Resize to length `n` and zero every buffer.
    pub fn reset(&mut self, n: usize) {
        for buf in [&mut self.m, &mut self.psumi, &mut self.dp, &mut self.pold] {
            buf.clear();
            buf.resize(n, T::zero());
        }
    }

    /// Mutable slices over all four buffers, in `(m, psumi, dp, pold)`
    /// order.
    pub fn parts(&mut self) -> (&mut [T], &mut [T], &mut [T], &mut [T]) {
        (&mut self.m, &mut self.psumi, &mut self.dp, &mut self.pold)
    }
}
