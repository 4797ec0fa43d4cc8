//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer contains the radial aggregation kernel and the routines
//! that construct solver inputs:
//! - Streaming radial-bin statistics over a 2-D image
//! - Sinc transfer-matrix construction
//! - Weighted-system assembly (`B`, `Bmat`, `sum_dia`, `bkk`)
//! - Sphere prior distribution
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Streaming radial-bin statistics aggregator.
pub mod radial;

/// Sinc transfer-matrix construction.
pub mod transfer;

/// Weighted-system assembly for the regularized solver.
pub mod system;

/// Prior distributions for the estimate vector.
pub mod prior;
