//! Layer 4: Engine
//!
//! Core execution logic for WENO reconstruction.
//!
//! This layer orchestrates the passes by coordinating between primitives
//! (errors, layouts) and algorithms (weights, reconstruction). It provides
//! the loops over cells and the checks that guard them.
//!
//! # Module Organization
//!
//! - **executor**: Sequential and parallel passes over a cell range
//! - **validator**: Array contracts and configuration bounds
//! - **output**: Owned work buffers
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine ← You are here
//!   ↓
//! Layer 3: Algorithms (weights, reconstruction)
//!   ↓
//! Layer 2: Math (dot, coefficients)
//!   ↓
//! Layer 1: Primitives (errors, shifts, layout)
//! ```

/// Execution engine for WENO passes.
///
/// Provides:
/// - Weights, stencil and blend passes over a cell range
/// - Optional per-cell parallelism (`cpu` feature)
pub mod executor;

/// Validation utilities.
///
/// Provides:
/// - Contiguity and shape checks naming the offending argument
/// - Cell-range and stencil-reach checks
/// - Configuration bound validation
pub mod validator;

/// Owned buffers.
///
/// Provides:
/// - The `WenoBuffers` container for `wr`, `qr` and `qs`
pub mod output;
