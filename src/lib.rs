//! # sasnum-rs — numeric kernels for small-angle scattering reduction
//!
//! This crate implements the two computational kernels at the heart of a
//! SAXS (small-angle X-ray scattering) reduction pipeline:
//!
//! 1. **Regularized IFT solver** — a damped iterative estimator for the
//!    pair-distance distribution `P(r)`, balancing fit against a smoothness
//!    constraint with a relaxation parameter and backtracking step-size
//!    control.
//! 2. **Radial aggregator** — a single-pass reduction of a 2-D detector
//!    image into per-radius intensity sums and numerically stable running
//!    statistics (Welford's algorithm), with optional readout-noise
//!    accumulation from a second mask.
//!
//! Both kernels are stateless per call, operate on caller-owned buffers
//! through typed array views, and perform no validation of their own:
//! shape and parameter checking happens in the boundary layer before a
//! kernel is entered.
//!
//! ## Quick start
//!
//! ```rust
//! use sasnum_rs::prelude::*;
//!
//! // Radial averaging of a 4x4 detector image around a beam center.
//! let image = vec![2.0_f64; 16];
//! let view = MatrixView::from_slice(&image, 4, 4)?;
//!
//! let profile = RadialAverager::new()
//!     .center(1.5, 1.5)
//!     .bounds(0, 3)
//!     .build()?
//!     .average(view, None, None)?;
//!
//! assert_eq!(profile.intensity.len(), 3);
//! # Result::<(), SasError>::Ok(())
//! ```
//!
//! Solving a regularized system assembled from a transfer matrix:
//!
//! ```rust
//! use sasnum_rs::prelude::*;
//!
//! let q = [0.01_f64, 0.02, 0.03, 0.04, 0.05];
//! let (prior, r_axis) = sphere_prior(8, 10.0, 1.0)?;
//!
//! let mut t = vec![0.0_f64; q.len() * r_axis.len()];
//! transfer_matrix(&q, &r_axis, 1.0, &mut t)?;
//!
//! let tv = MatrixView::from_slice(&t, q.len(), r_axis.len())?;
//! let intensity = [1.0_f64; 5];
//! let variance = [0.01_f64; 5];
//! let system = assemble(tv, &intensity, &variance)?;
//!
//! let solution = Ift::new()
//!     .alpha(1.0)
//!     .max_iterations(200)
//!     .build()?
//!     .solve(&system, &prior)?;
//!
//! assert_eq!(solution.pr.len(), 8);
//! # Result::<(), SasError>::Ok(())
//! ```
//!
//! ## Design
//!
//! * Kernels are generic over [`num_traits::Float`]; reduction pipelines
//!   use `f64` in practice.
//! * The solver's outer loop is strictly sequential; the aggregator's
//!   per-bin updates are associative, so a parallel wrapper may merge
//!   per-partition `Welford` accumulators.
//! * The crate is `no_std`-compatible (requires `alloc` for the API layer).

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - errors and typed array views.
//
// Contains the crate error type (`SasError`) and the strided 2-D view
// abstractions (`MatrixView`, `BinStats`, `NoiseStats`) shared by both
// kernels.
mod primitives;

// Layer 2: Math - pure mathematical functions.
//
// Contains the smoothness constraint vector, gradient/alignment
// computations, the damped update and relaxation steps, and Welford's
// online mean/variance recurrence.
mod math;

// Layer 3: Algorithms - the aggregation kernel and system construction.
//
// Contains the radial-bin aggregator, the sinc transfer-matrix builder,
// weighted-system assembly, and the sphere prior distribution.
mod algorithms;

// Layer 4: Engine - orchestration and execution control.
//
// Contains the input validator (boundary layer), the solver scratch
// workspace, and the solver outer loop with backtracking.
mod engine;

// High-level fluent API.
//
// Provides the `Ift` and `RadialAverager` builders.
mod api;

// ============================================================================
// Prelude
// ============================================================================

/// Standard prelude.
///
/// Intended to be wildcard-imported for convenient access to the most
/// commonly used types:
///
/// ```
/// use sasnum_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        assemble, sphere_prior, transfer_matrix, Averager, Ift, IftSolution, IftSolver,
        IftSystem, IftWorkspace, MatrixView, RadialAverager, RadialProfile, SasError,
        SolverControls, Welford,
    };
}

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// This module re-exports internal modules for development and testing
/// purposes. It is only available with the `dev` feature enabled.
///
/// **Warning**: These are internal implementation details and may change
/// without notice. Do not use in production code.
#[cfg(feature = "dev")]
pub mod internals {
    /// Internal primitive types and utilities.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal math functions.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal core algorithms.
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    /// Internal execution engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
