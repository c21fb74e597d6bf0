//! Layer 2: Math
//!
//! Pure mathematical functions.
//!
//! This layer provides the numeric building blocks used by the WENO passes:
//! - The strided dot product shared by both reconstruction stages
//! - Reconstruction coefficients for arbitrary cell boundaries
//!
//! These carry no WENO-specific control flow.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine (executor, validator, output)
//!   ↓
//! Layer 3: Algorithms (weights, reconstruction)
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives (errors, shifts, layout)
//! ```

/// Dense-by-strided dot products.
///
/// Provides:
/// - `strided_dot` over raw slices
/// - `view_dot` over stride-carrying views
pub mod dot;

/// Reconstruction coefficients.
///
/// Provides:
/// - Coefficients for a single stencil and point
/// - Whole-grid fill of `c[cell, shift, point, offset]`
pub mod coefficients;
