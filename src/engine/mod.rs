//! Layer 4: Engine
//!
//! # Purpose
//!
//! This layer orchestrates the regularized solve and hosts the boundary
//! layer:
//! - Fail-fast input validation (shapes, lengths, parameter bounds)
//! - The reusable solver scratch workspace
//! - The solver outer loop with backtracking step-size control
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Fail-fast input validation (the boundary layer).
pub mod validator;

/// Reusable solver scratch workspace.
pub mod workspace;

/// Solver outer loop with backtracking.
pub mod solver;
