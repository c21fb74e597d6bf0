//! Owned work buffers for WENO reconstruction.
//!
//! ## Purpose
//!
//! The passes never allocate: `wr`, `qr` and `qs` belong to the driver.
//! [`WenoBuffers`] is a convenience container for drivers that want the
//! crate to allocate them once and reuse them across time steps.
//!
//! ## Invariants
//!
//! * Buffers are zero-initialized, so shifts skipped by boundary clipping or
//!   bias carry zero weight and zero reconstruction.
//! * All three arrays share the same cell count.
//! * `wr` and `qr` are row-major contiguous, as the passes require.

use ndarray::{Array2, Array3};
use num_traits::Float;

/// Nonlinear weights, stencil reconstructions and final values.
#[derive(Debug, Clone, PartialEq)]
pub struct WenoBuffers<T> {
    /// Nonlinear weights `[cell, shift]`.
    pub wr: Array2<T>,

    /// Stencil reconstructions `[cell, shift, point]`.
    pub qr: Array3<T>,

    /// Reconstructed point values `[cell, point]`.
    pub qs: Array2<T>,
}

impl<T: Float> WenoBuffers<T> {
    /// Allocate zeroed buffers for `cells` cells, stencil width `order` and
    /// `points` reconstruction points per cell.
    pub fn new(cells: usize, order: usize, points: usize) -> Self {
        Self {
            wr: Array2::zeros((cells, order)),
            qr: Array3::zeros((cells, order, points)),
            qs: Array2::zeros((cells, points)),
        }
    }

    /// Number of cells.
    pub fn cells(&self) -> usize {
        self.wr.nrows()
    }

    /// Stencil width.
    pub fn order(&self) -> usize {
        self.wr.ncols()
    }

    /// Reconstruction points per cell.
    pub fn points(&self) -> usize {
        self.qs.ncols()
    }

    /// Zero all buffers, e.g. before reusing them with a different bias.
    pub fn reset(&mut self) {
        self.wr.fill(T::zero());
        self.qr.fill(T::zero());
        self.qs.fill(T::zero());
    }
}
