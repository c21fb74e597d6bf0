//! Execution engine for WENO passes.
//!
//! ## Purpose
//!
//! This module runs the per-cell kernels of the algorithms layer over a
//! closed cell range `[imin, imax]`. It slices the flat buffers into per-cell
//! chunks and schedules the cells either sequentially or, with the `cpu`
//! feature, in parallel via `rayon`.
//!
//! ## Design notes
//!
//! * Every pass writes disjoint per-cell output chunks, so cells can run in
//!   any order without changing results.
//! * Parallel and sequential passes call the same kernels and produce
//!   bit-identical output.
//! * Without the `cpu` feature the `parallel` flag is ignored.
//!
//! ## Execution Flow
//!
//! 1. `weights_pass`: `sigma`, `w` -> `wr` over the clipped shift range
//! 2. `stencil_pass`: `q`, `c` -> `qr` over the biased shift range
//! 3. `blend_pass`: `wr`, `qr` -> `qs` over all shifts
//!
//! ## Invariants
//!
//! * `imin <= imax`, and all buffers and stencils are in range. The API
//!   layer validates this before calling in.
//! * No pass allocates.
//!
//! ## Non-goals
//!
//! * This module does not validate input data (handled by `validator`).
//! * This module does not own buffers (handled by the caller or `output`).

#[cfg(feature = "cpu")]
use rayon::prelude::*;

use ndarray::{s, ArrayViewMut1, ArrayViewMut2, Axis};
use num_traits::Float;

use crate::algorithms::reconstruction::{cell_blend, cell_stencils};
use crate::algorithms::weights::cell_weights;
use crate::primitives::layout::{CellAverages, Layout};
use crate::primitives::shifts::ShiftRange;

// ============================================================================
// Executor
// ============================================================================

/// Runs WENO passes over a range of cells.
#[derive(Debug, Clone, Copy)]
pub struct WenoExecutor<T> {
    /// Regularizer of the nonlinear weights.
    pub epsilon: T,

    /// Whether to schedule cells in parallel.
    pub parallel: bool,
}

impl<T: Float + Send + Sync> WenoExecutor<T> {
    /// Nonlinear weights for cells `imin..=imax`.
    ///
    /// `sigma`, `w` and `wr` are `[cells, k]` row-major. Weights are
    /// normalized over the clipped shifts that also lie in `allowed`; clipped
    /// shifts outside `allowed` get zero weight. Shifts outside the clipped
    /// range are not written.
    #[allow(clippy::too_many_arguments)]
    pub fn weights_pass(
        &self,
        imin: usize,
        imax: usize,
        cells: usize,
        k: usize,
        allowed: ShiftRange,
        sigma: &[T],
        w: &[T],
        wr: &mut [T],
    ) {
        log::trace!(
            "weights pass: cells {}..={} of {}, k = {}, shifts {}..={}, parallel = {}",
            imin,
            imax,
            cells,
            k,
            allowed.lo,
            allowed.hi,
            self.parallel
        );

        let epsilon = self.epsilon;
        let rows = &mut wr[imin * k..(imax + 1) * k];
        for_each_cell(rows, k, imin, self.parallel, |i, wr_cell| {
            let Some(clipped) = ShiftRange::clipped(i, cells, k) else {
                return;
            };
            for r in clipped.iter().filter(|&r| !allowed.contains(r)) {
                wr_cell[r] = T::zero();
            }
            if let Some(shifts) = clipped.intersect(allowed) {
                let at = i * k;
                cell_weights(
                    &sigma[at..at + k],
                    &w[at..at + k],
                    wr_cell,
                    shifts,
                    epsilon,
                );
            }
        });
    }

    /// Stencil reconstructions for cells `imin..=imax` and the shifts in
    /// `shifts`.
    ///
    /// `c` is `[cells, k, n, k]` and `qr` is `[cells, k, n]`, both row-major.
    #[allow(clippy::too_many_arguments)]
    pub fn stencil_pass(
        &self,
        q: &CellAverages<'_, T>,
        imin: usize,
        imax: usize,
        shifts: ShiftRange,
        layout: Layout,
        c: &[T],
        qr: &mut [T],
    ) {
        log::trace!(
            "stencil pass: cells {}..={}, shifts {}..={}, n = {}, parallel = {}",
            imin,
            imax,
            shifts.lo,
            shifts.hi,
            layout.points,
            self.parallel
        );

        let per_cell = layout.stencils_per_cell();
        if per_cell == 0 {
            return;
        }
        let c_per_cell = layout.coefficients_per_cell();

        let rows = &mut qr[imin * per_cell..(imax + 1) * per_cell];
        for_each_cell(rows, per_cell, imin, self.parallel, |i, qr_cell| {
            let at = i * c_per_cell;
            cell_stencils(q, i, shifts, &layout, &c[at..at + c_per_cell], qr_cell);
        });
    }

    /// Weighted blend for cells `imin..=imax`.
    ///
    /// `wr` is `[cells, k]` and `qr` is `[cells, k, n]`, both row-major; `qs`
    /// may have any layout.
    pub fn blend_pass(
        &self,
        imin: usize,
        imax: usize,
        layout: Layout,
        wr: &[T],
        qr: &[T],
        mut qs: ArrayViewMut2<'_, T>,
    ) {
        log::trace!(
            "blend pass: cells {}..={}, k = {}, n = {}, parallel = {}",
            imin,
            imax,
            layout.order,
            layout.points,
            self.parallel
        );

        let k = layout.order;
        let per_cell = layout.stencils_per_cell();
        let rows = qs.slice_mut(s![imin..=imax, ..]);
        for_each_row(rows, self.parallel, |offset, qs_row| {
            let i = imin + offset;
            cell_blend(
                &wr[i * k..(i + 1) * k],
                &qr[i * per_cell..(i + 1) * per_cell],
                &layout,
                qs_row,
            );
        });
    }
}

// ============================================================================
// Scheduling
// ============================================================================

/// Apply `kernel(cell, chunk)` to consecutive `chunk`-sized pieces of `rows`,
/// the first of which belongs to cell `first`.
#[cfg(feature = "cpu")]
fn for_each_cell<T, F>(rows: &mut [T], chunk: usize, first: usize, parallel: bool, kernel: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    if parallel {
        rows.par_chunks_mut(chunk)
            .enumerate()
            .for_each(|(offset, cell)| kernel(first + offset, cell));
    } else {
        rows.chunks_mut(chunk)
            .enumerate()
            .for_each(|(offset, cell)| kernel(first + offset, cell));
    }
}

#[cfg(not(feature = "cpu"))]
fn for_each_cell<T, F>(rows: &mut [T], chunk: usize, first: usize, _parallel: bool, kernel: F)
where
    F: Fn(usize, &mut [T]),
{
    rows.chunks_mut(chunk)
        .enumerate()
        .for_each(|(offset, cell)| kernel(first + offset, cell));
}

/// Apply `kernel(offset, row)` to every row of `rows`.
#[cfg(feature = "cpu")]
fn for_each_row<T, F>(mut rows: ArrayViewMut2<'_, T>, parallel: bool, kernel: F)
where
    T: Send + Sync,
    F: Fn(usize, ArrayViewMut1<'_, T>) + Send + Sync,
{
    if parallel {
        rows.axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(offset, row)| kernel(offset, row));
    } else {
        rows.axis_iter_mut(Axis(0))
            .enumerate()
            .for_each(|(offset, row)| kernel(offset, row));
    }
}

#[cfg(not(feature = "cpu"))]
fn for_each_row<T, F>(mut rows: ArrayViewMut2<'_, T>, _parallel: bool, kernel: F)
where
    F: Fn(usize, ArrayViewMut1<'_, T>),
{
    rows.axis_iter_mut(Axis(0))
        .enumerate()
        .for_each(|(offset, row)| kernel(offset, row));
}
