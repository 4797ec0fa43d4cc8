//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the foundational building blocks shared by both
//! kernels:
//! - The crate error type for boundary-layer validation failures
//! - Typed strided views over caller-owned 2-D buffers
//! - In-place statistics tables (radial bins, readout noise)
//!
//! These carry no algorithm-specific logic.
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Error types for boundary-layer validation.
pub mod errors;

/// Typed strided views over caller-owned buffers.
pub mod view;
