//! Layer 3: Algorithms
//!
//! Core WENO algorithms.
//!
//! This layer implements the per-cell logic of the two WENO components: the
//! nonlinear weights and the two-stage reconstruction. It is orchestrated by
//! the engine layer, which owns the loop over cells.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine (executor, validator, output)
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math (dot, coefficients)
//!   ↓
//! Layer 1: Primitives (errors, shifts, layout)
//! ```

/// Nonlinear weights.
///
/// Provides:
/// - The regularized `alpha` weight
/// - Per-cell normalization over the clipped shift range
pub mod weights;

/// Stencil reconstructions and the weighted blend.
///
/// Provides:
/// - Order-`k` reconstructions per shift and point
/// - Order-`2k-1` blend over all shifts
pub mod reconstruction;
