//! Weighted essentially non-oscillatory (WENO) reconstruction.
//!
//! Given cell averages `q` of a quantity on a one-dimensional grid, this
//! crate reconstructs point values inside each cell as a convex combination
//! of `k` candidate polynomial reconstructions (one per stencil shift `r`),
//! weighted so that stencils crossing a discontinuity contribute almost
//! nothing.
//!
//! The work is split in two operations:
//!
//! * **Weights**: `alpha_r = w_r / (epsilon + sigma_r)^2`, normalized over
//!   the shifts valid near the grid boundaries.
//! * **Reconstruction**: every stencil produces `qr[i, r, l]` from a
//!   precomputed coefficient table, then `qs[i, l] = sum_r wr[i, r] * qr[i, r, l]`.
//!
//! Smoothness indicators `sigma`, optimal weights `w` and coefficients `c`
//! are inputs. [`math::coefficients`] can generate `c` for arbitrary
//! (non-uniform) grids.
//!
//! # Quick start
//!
//! ```rust
//! use ndarray::{Array1, Array2};
//! use weno::prelude::*;
//!
//! # fn main() -> std::result::Result<(), WenoError> {
//! let (cells, k) = (20, 3);
//! let x: Vec<f64> = (0..=cells).map(|j| j as f64 - 0.5).collect();
//! let q: Array1<f64> = (0..cells).map(|i| i as f64).collect();
//!
//! // Reconstruct at the left and right boundary of every cell.
//! let weno = Weno::<f64>::new().order(k).points(2).build()?;
//! let c = weno.coefficients(&x, &[0.0, 1.0])?;
//!
//! // Smooth data: all stencils equally smooth.
//! let sigma = Array2::<f64>::zeros((cells, k));
//! let w = Array2::<f64>::from_shape_fn((cells, k), |(_, r)| [0.1, 0.6, 0.3][r]);
//!
//! let mut buffers = weno.buffers(cells)?;
//! weno.step(q.view(), 2, 17, sigma.view(), w.view(), c.view(), &mut buffers)?;
//!
//! assert!((buffers.qs[[5, 0]] - 4.5).abs() < 1e-12);
//! assert!((buffers.qs[[5, 1]] - 5.5).abs() < 1e-12);
//! # Ok(())
//! # }
//! ```
//!
//! The free functions [`compute_weights`](api::compute_weights) and
//! [`reconstruct`](api::reconstruct) expose the same operations without a
//! builder, for drivers that manage their own buffers.
//!
//! # Array layout
//!
//! | Array   | Shape           | Layout                 |
//! |---------|-----------------|------------------------|
//! | `q`     | `[N]`           | any stride             |
//! | `sigma` | `[N, k]`        | row-major contiguous   |
//! | `w`     | `[N, k]`        | row-major contiguous   |
//! | `wr`    | `[N, k]`        | row-major contiguous   |
//! | `c`     | `[N, k, n, k]`  | row-major contiguous   |
//! | `qr`    | `[N, k, n]`     | row-major contiguous   |
//! | `qs`    | `[N, n]`        | any stride             |
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API (builder, free functions)
//!   ↓
//! Layer 4: Engine (executor, validator, output)
//!   ↓
//! Layer 3: Algorithms (weights, reconstruction)
//!   ↓
//! Layer 2: Math (dot, coefficients)
//!   ↓
//! Layer 1: Primitives (errors, shifts, layout)
//! ```
//!
//! # Features
//!
//! * `cpu` (default): per-cell parallel passes via `rayon`, enabled with
//!   `.parallel(true)`.

// Layer 1: Primitives - errors, shift ranges, buffer layout.
pub mod primitives;

// Layer 2: Math - strided dot product, coefficient generation.
pub mod math;

// Layer 3: Algorithms - per-cell weights and reconstruction kernels.
pub mod algorithms;

// Layer 4: Engine - passes over cell ranges, validation, buffers.
pub mod engine;

// Layer 5: API - builder and free functions.
pub mod api;

/// Standard WENO prelude.
pub mod prelude {
    pub use crate::api::{
        blend, compute_weights, reconstruct, stencil_reconstruct, Result, WenoBuffers,
        WenoBuilder as Weno, WenoError, WenoReconstructor, DEFAULT_EPSILON,
    };
    pub use crate::math::coefficients::{coefficients_for_points, reconstruction_coeffs};
    pub use crate::primitives::layout::CellAverages;
    pub use crate::primitives::shifts::ShiftRange;
}
