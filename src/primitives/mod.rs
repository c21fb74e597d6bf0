//! Layer 1: Primitives
//!
//! Core building blocks and types.
//!
//! This layer provides the error type, shift ranges and array layout
//! descriptors used throughout the crate. It has no dependencies on the
//! other layers.
//!
//! # Module Organization
//!
//! - **errors**: Shared error type (WenoError)
//! - **shifts**: Boundary-clipped and biased shift ranges
//! - **layout**: Axis extents and cell-average storage
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
//! Layer 2: Math (dot, coefficients)
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Shared error types.
///
/// Provides:
/// - Unified `WenoError` enum
/// - One variant per validation failure, naming the argument at fault
pub mod errors;

/// Shift range logic.
///
/// Provides:
/// - Boundary clipping for nonlinear weights
/// - Bias ranges for stencil reconstructions
pub mod shifts;

/// Array layout descriptors.
///
/// Provides:
/// - Row-major offsets into `c`, `qr` and `wr`
/// - Dense or strided access to cell averages
pub mod layout;
