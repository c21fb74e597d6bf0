//! Two-stage WENO reconstruction kernels.
//!
//! ## Purpose
//!
//! Per-cell kernels for the reconstruction engine:
//!
//! 1. **Stencils**: for every shift `r` in the biased range and every point
//!    `l`, the order-`k` reconstruction
//!    `qr[i, r, l] = sum_j c[i, r, l, j] * q[i - r + j]`.
//! 2. **Blend**: the order-`2k-1` value
//!    `qs[i, l] = sum_r wr[i, r] * qr[i, r, l]` over all `k` shifts.
//!
//! ## Design notes
//!
//! * Kernels take one cell's slices; the executor slices the buffers and
//!   decides how cells are scheduled.
//! * The blend always runs over the full shift range. Bias is carried by
//!   zero weights, so the stencil pass may leave shifts unwritten only if
//!   their weights are zero.
//!
//! ## Invariants
//!
//! * Stencil `r` of cell `i` reads `q[i - r..i - r + k]`; callers guarantee
//!   these indices exist.
//! * Kernels never allocate.

use ndarray::{s, ArrayViewMut1};
use num_traits::Float;

use crate::math::dot::{strided_dot, view_dot};
use crate::primitives::layout::{CellAverages, Layout};
use crate::primitives::shifts::ShiftRange;

// ============================================================================
// Stage 1: Stencil Reconstructions
// ============================================================================

/// Order-`k` reconstructions of cell `i` for every shift in `shifts`.
///
/// `c_cell` is `c[i, .., .., ..]` flattened; `qr_cell` is `qr[i, .., ..]`.
pub fn cell_stencils<T: Float>(
    q: &CellAverages<'_, T>,
    i: usize,
    shifts: ShiftRange,
    layout: &Layout,
    c_cell: &[T],
    qr_cell: &mut [T],
) {
    let k = layout.order;

    for r in shifts.iter() {
        let start = i - r;
        for l in 0..layout.points {
            let coeffs = &c_cell[layout.coefficient_offset(r, l)..][..k];
            qr_cell[layout.stencil_offset(r, l)] = match q {
                CellAverages::Dense(q) => strided_dot(coeffs, &q[start..], k, 1),
                CellAverages::Strided(q) => view_dot(coeffs, q.slice(s![start..start + k])),
            };
        }
    }
}

// ============================================================================
// Stage 2: Weighted Blend
// ============================================================================

/// Blend the stencil reconstructions of one cell into `qs_row` (`qs[i, ..]`).
///
/// The shift axis of `qr_cell` has stride `n`, the number of points.
pub fn cell_blend<T: Float>(
    wr_cell: &[T],
    qr_cell: &[T],
    layout: &Layout,
    mut qs_row: ArrayViewMut1<'_, T>,
) {
    for (l, out) in qs_row.iter_mut().enumerate() {
        *out = strided_dot(wr_cell, &qr_cell[l..], layout.order, layout.points);
    }
}
