//! Array layout descriptors.
//!
//! ## Purpose
//!
//! The reconstruction passes operate on flat row-major buffers. This module
//! names the axis extents of those buffers ([`Layout`]) and wraps the cell
//! averages, the one input allowed to carry an arbitrary element stride
//! ([`CellAverages`]).
//!
//! ## Flat indexing
//!
//! ```text
//! c [cell, shift, point, offset] -> ((i * k + r) * n + l) * k + j
//! qr[cell, shift, point]         -> (i * k + r) * n + l
//! wr[cell, shift]                -> i * k + r
//! ```

use ndarray::ArrayView1;

/// Axis extents shared by the reconstruction arrays.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Number of cells along the leading axis.
    pub cells: usize,

    /// Stencil width `k` (also the number of shifts).
    pub order: usize,

    /// Reconstruction points per cell `n`.
    pub points: usize,
}

impl Layout {
    /// Elements of `wr` per cell.
    #[inline]
    pub fn weights_per_cell(&self) -> usize {
        self.order
    }

    /// Elements of `qr` per cell.
    #[inline]
    pub fn stencils_per_cell(&self) -> usize {
        self.order * self.points
    }

    /// Elements of `c` per cell.
    #[inline]
    pub fn coefficients_per_cell(&self) -> usize {
        self.order * self.points * self.order
    }

    /// Offset of `c[i, r, l, 0]` relative to the start of cell `i`.
    #[inline]
    pub fn coefficient_offset(&self, r: usize, l: usize) -> usize {
        (r * self.points + l) * self.order
    }

    /// Offset of `qr[i, r, l]` relative to the start of cell `i`.
    #[inline]
    pub fn stencil_offset(&self, r: usize, l: usize) -> usize {
        r * self.points + l
    }
}

/// Cell averages `q`, contiguous or strided.
#[derive(Clone, Debug)]
pub enum CellAverages<'a, T> {
    /// Unit-stride storage.
    Dense(&'a [T]),

    /// Any other layout, including negative strides.
    Strided(ArrayView1<'a, T>),
}

impl<'a, T> CellAverages<'a, T> {
    /// Wrap a one-dimensional view, borrowing its storage directly when it is
    /// contiguous.
    pub fn from_view(q: ArrayView1<'a, T>) -> Self {
        match q.to_slice() {
            Some(slice) => CellAverages::Dense(slice),
            None => CellAverages::Strided(q),
        }
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            CellAverages::Dense(q) => q.len(),
            CellAverages::Strided(q) => q.len(),
        }
    }

    /// Returns `true` if there are no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a, T> From<&'a [T]> for CellAverages<'a, T> {
    fn from(q: &'a [T]) -> Self {
        CellAverages::Dense(q)
    }
}

impl<'a, T> From<ArrayView1<'a, T>> for CellAverages<'a, T> {
    fn from(q: ArrayView1<'a, T>) -> Self {
        CellAverages::from_view(q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{s, Array1};

    #[test]
    fn offsets_follow_row_major_order() {
        let layout = Layout {
            cells: 4,
            order: 3,
            points: 2,
        };
        assert_eq!(layout.coefficients_per_cell(), 18);
        assert_eq!(layout.coefficient_offset(2, 1), 15);
        assert_eq!(layout.stencil_offset(2, 1), 5);
        assert_eq!(layout.stencils_per_cell(), 6);
    }

    #[test]
    fn contiguous_view_is_borrowed_dense() {
        let q = Array1::from(vec![1.0, 2.0, 3.0]);
        assert!(matches!(CellAverages::from_view(q.view()), CellAverages::Dense(_)));
    }

    #[test]
    fn strided_view_stays_a_view() {
        let q = Array1::from(vec![1.0, 2.0, 3.0, 4.0]);
        let every_other = q.slice(s![..;2]);
        let averages = CellAverages::from_view(every_other);
        assert!(matches!(averages, CellAverages::Strided(_)));
        assert_eq!(averages.len(), 2);
    }
}
