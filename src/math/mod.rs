//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides the pure mathematical functions used by the solver
//! and the aggregator:
//! - Smoothness constraint vector from nearest neighbors
//! - Fit vector, damped update, relaxation, and gradient alignment
//! - Welford's online mean/variance recurrence
//!
//! These are reusable building blocks with no control-flow logic.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Smoothness constraint vector computation.
pub mod smoothness;

/// Gradient, alignment, and update-step computations.
pub mod gradient;

/// Welford's online mean/variance accumulator.
pub mod welford;
