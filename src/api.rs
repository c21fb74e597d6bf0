//! High-level API for WENO reconstruction.
//!
//! ## Purpose
//!
//! This module provides the user-facing entry points: free functions that
//! mirror the two WENO operations directly, and a fluent builder producing a
//! [`WenoReconstructor`] that carries a fixed configuration across time steps.
//!
//! ## Design notes
//!
//! * **All-or-nothing**: every argument is validated before any output is
//!   written. A rejected call leaves `wr`, `qr` and `qs` untouched.
//! * **Views in, nothing allocated**: arrays are borrowed as `ndarray` views;
//!   the computational path performs no allocation.
//! * **Type-Safe**: generic over `Float` types for flexible precision.
//!
//! ## Key concepts
//!
//! ### Operations
//!
//! * [`compute_weights`]: smoothness indicators + optimal weights -> `wr`
//! * [`stencil_reconstruct`]: cell averages + coefficients -> `qr`
//! * [`blend`]: `wr` + `qr` -> `qs`
//! * [`reconstruct`]: stencils and blend in one validated call
//!
//! ### Configuration Flow
//!
//! 1. Create a [`WenoBuilder`] via `WenoBuilder::new()`.
//! 2. Chain configuration methods (`.order()`, `.points()`, `.bias()`, etc.).
//! 3. Call `.build()` to validate and obtain a [`WenoReconstructor`].
//!
//! ### Ranges
//!
//! Cell ranges are closed: `[imin, imax]`. An empty range (`imin > imax`)
//! is a no-op after the array contracts are checked.
//!
//! ## Visibility
//!
//! This is the primary public API. Types re-exported here are considered
//! stable.

use core::result;

use ndarray::{
    Array4, ArrayView1, ArrayView2, ArrayView3, ArrayView4, ArrayViewMut2, ArrayViewMut3, Dimension,
};
use num_traits::Float;

use crate::engine::executor::WenoExecutor;
use crate::engine::validator::Validator;
use crate::math::coefficients::coefficients_for_points;
use crate::primitives::layout::{CellAverages, Layout};
use crate::primitives::shifts::ShiftRange;

// Publicly re-exported types
pub use crate::algorithms::weights::DEFAULT_EPSILON;
pub use crate::engine::output::WenoBuffers;
pub use crate::primitives::errors::WenoError;

/// Result type alias for WENO operations.
pub type Result<T> = result::Result<T, WenoError>;

// ============================================================================
// Free Functions
// ============================================================================

/// Compute normalized nonlinear weights `wr` for cells `imin..=imax`.
///
/// `sigma`, `w` and `wr` are `[cell, shift]` and must be row-major
/// contiguous. Only shifts in the boundary-clipped range
/// `[max(0, i-(N-k)-1), min(k-1, i)]` are written.
pub fn compute_weights<T: Float + Send + Sync>(
    imin: usize,
    imax: usize,
    sigma: ArrayView2<'_, T>,
    w: ArrayView2<'_, T>,
    wr: ArrayViewMut2<'_, T>,
) -> Result<()> {
    WenoBuilder::new().build()?.weights(imin, imax, sigma, w, wr)
}

/// Compute the order-`k` stencil reconstructions `qr` for bias `s`.
///
/// `q` may have any stride; `c` and `qr` must be row-major contiguous.
pub fn stencil_reconstruct<T: Float + Send + Sync>(
    q: ArrayView1<'_, T>,
    s: isize,
    imin: usize,
    imax: usize,
    c: ArrayView4<'_, T>,
    qr: ArrayViewMut3<'_, T>,
) -> Result<()> {
    WenoBuilder::new()
        .bias(s)
        .build()?
        .stencils(q, imin, imax, c, qr)
}

/// Blend stencil reconstructions into the final values `qs`.
///
/// `wr` and `qr` must be row-major contiguous; `qs` may have any layout.
pub fn blend<T: Float + Send + Sync>(
    wr: ArrayView2<'_, T>,
    qr: ArrayView3<'_, T>,
    imin: usize,
    imax: usize,
    qs: ArrayViewMut2<'_, T>,
) -> Result<()> {
    WenoBuilder::new().build()?.blend(wr, qr, imin, imax, qs)
}

/// Reconstruct point values `qs` from cell averages `q`.
///
/// Runs [`stencil_reconstruct`] and [`blend`] after validating the
/// arguments of both.
#[allow(clippy::too_many_arguments)]
pub fn reconstruct<T: Float + Send + Sync>(
    q: ArrayView1<'_, T>,
    s: isize,
    imin: usize,
    imax: usize,
    c: ArrayView4<'_, T>,
    wr: ArrayView2<'_, T>,
    qr: ArrayViewMut3<'_, T>,
    qs: ArrayViewMut2<'_, T>,
) -> Result<()> {
    WenoBuilder::new()
        .bias(s)
        .build()?
        .reconstruct(q, imin, imax, c, wr, qr, qs)
}

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for configuring a WENO reconstructor.
#[derive(Debug, Clone)]
pub struct WenoBuilder<T> {
    /// Expected stencil width `k`; taken from the arrays when unset.
    pub order: Option<usize>,

    /// Expected reconstruction points per cell; taken from the arrays when unset.
    pub points: Option<usize>,

    /// Regularizer of the nonlinear weights (default: 1e-5).
    pub epsilon: Option<T>,

    /// Bias restricting the computed shifts (default: 0).
    pub bias: Option<isize>,

    /// Schedule cells in parallel (default: false; needs the `cpu` feature).
    pub parallel: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation).
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for WenoBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> WenoBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            order: None,
            points: None,
            epsilon: None,
            bias: None,
            parallel: None,
            duplicate_param: None,
        }
    }

    /// Set the stencil width `k` (formal order `2k - 1`).
    pub fn order(mut self, k: usize) -> Self {
        if self.order.is_some() {
            self.duplicate_param = Some("order");
        }
        self.order = Some(k);
        self
    }

    /// Set the number of reconstruction points per cell.
    pub fn points(mut self, n: usize) -> Self {
        if self.points.is_some() {
            self.duplicate_param = Some("points");
        }
        self.points = Some(n);
        self
    }

    /// Set the regularizer of the nonlinear weights.
    pub fn epsilon(mut self, epsilon: T) -> Self {
        if self.epsilon.is_some() {
            self.duplicate_param = Some("epsilon");
        }
        self.epsilon = Some(epsilon);
        self
    }

    /// Set the bias `s`: stencil shifts `[max(0, s), min(k-1+s, k-1)]` are
    /// computed.
    pub fn bias(mut self, s: isize) -> Self {
        if self.bias.is_some() {
            self.duplicate_param = Some("bias");
        }
        self.bias = Some(s);
        self
    }

    /// Enable or disable parallel scheduling of cells.
    pub fn parallel(mut self, enabled: bool) -> Self {
        if self.parallel.is_some() {
            self.duplicate_param = Some("parallel");
        }
        self.parallel = Some(enabled);
        self
    }

    /// Validate the configuration and build the reconstructor.
    pub fn build(self) -> Result<WenoReconstructor<T>> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        if let Some(k) = self.order {
            Validator::validate_order(k)?;
        }
        if let Some(n) = self.points {
            Validator::validate_points(n)?;
        }

        let epsilon = match self.epsilon {
            Some(eps) => eps,
            None => T::from(DEFAULT_EPSILON).ok_or(WenoError::InvalidEpsilon(DEFAULT_EPSILON))?,
        };
        Validator::validate_epsilon(epsilon)?;

        let bias = self.bias.unwrap_or(0);
        if let Some(k) = self.order {
            Validator::validate_bias(bias, k)?;
        }

        let parallel = self.parallel.unwrap_or(false);
        if parallel && cfg!(not(feature = "cpu")) {
            log::warn!("parallel scheduling requested without the `cpu` feature; running sequentially");
        }

        Ok(WenoReconstructor {
            order: self.order,
            points: self.points,
            bias,
            executor: WenoExecutor { epsilon, parallel },
        })
    }
}

// ============================================================================
// Reconstructor
// ============================================================================

/// Validated WENO configuration, reusable across time steps.
#[derive(Debug, Clone, Copy)]
pub struct WenoReconstructor<T> {
    order: Option<usize>,
    points: Option<usize>,
    bias: isize,
    executor: WenoExecutor<T>,
}

impl<T: Float + Send + Sync> WenoReconstructor<T> {
    // ========================================================================
    // Accessors
    // ========================================================================

    /// Configured stencil width, if any.
    pub fn order(&self) -> Option<usize> {
        self.order
    }

    /// Configured reconstruction points per cell, if any.
    pub fn points(&self) -> Option<usize> {
        self.points
    }

    /// Bias applied by the stencil pass.
    pub fn bias(&self) -> isize {
        self.bias
    }

    /// Regularizer of the nonlinear weights.
    pub fn epsilon(&self) -> T {
        self.executor.epsilon
    }

    /// Whether cells are scheduled in parallel.
    pub fn is_parallel(&self) -> bool {
        self.executor.parallel
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Compute normalized nonlinear weights `wr` for cells `imin..=imax`.
    pub fn weights(
        &self,
        imin: usize,
        imax: usize,
        sigma: ArrayView2<'_, T>,
        w: ArrayView2<'_, T>,
        mut wr: ArrayViewMut2<'_, T>,
    ) -> Result<()> {
        let sigma_s = Validator::validate_dense(&sigma, "sigma")?;
        let w_s = Validator::validate_dense(&w, "w")?;
        let wr_dim = wr.raw_dim();
        let wr_s = Validator::validate_dense_mut(&mut wr, "wr")?;

        let Some((cells, k, allowed)) =
            self.plan_weights(imin, imax, sigma.shape(), w.shape(), wr_dim.slice(), 0)?
        else {
            return Ok(());
        };

        self.executor
            .weights_pass(imin, imax, cells, k, allowed, sigma_s, w_s, wr_s);
        Ok(())
    }

    /// Compute the order-`k` stencil reconstructions `qr` for the configured
    /// bias.
    pub fn stencils(
        &self,
        q: ArrayView1<'_, T>,
        imin: usize,
        imax: usize,
        c: ArrayView4<'_, T>,
        mut qr: ArrayViewMut3<'_, T>,
    ) -> Result<()> {
        let c_s = Validator::validate_dense(&c, "c")?;
        let qr_dim = qr.raw_dim();
        let qr_s = Validator::validate_dense_mut(&mut qr, "qr")?;

        let Some((layout, shifts)) =
            self.plan_stencils(q.len(), imin, imax, c.shape(), qr_dim.slice())?
        else {
            return Ok(());
        };

        let q = CellAverages::from_view(q);
        self.executor
            .stencil_pass(&q, imin, imax, shifts, layout, c_s, qr_s);
        Ok(())
    }

    /// Blend stencil reconstructions into the final values `qs`.
    pub fn blend(
        &self,
        wr: ArrayView2<'_, T>,
        qr: ArrayView3<'_, T>,
        imin: usize,
        imax: usize,
        qs: ArrayViewMut2<'_, T>,
    ) -> Result<()> {
        let wr_s = Validator::validate_dense(&wr, "wr")?;
        let qr_s = Validator::validate_dense(&qr, "qr")?;

        let Some(layout) = self.plan_blend(imin, imax, wr.shape(), qr.shape(), qs.shape())? else {
            return Ok(());
        };

        self.executor.blend_pass(imin, imax, layout, wr_s, qr_s, qs);
        Ok(())
    }

    /// Stencil reconstructions followed by the blend, validated up front.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstruct(
        &self,
        q: ArrayView1<'_, T>,
        imin: usize,
        imax: usize,
        c: ArrayView4<'_, T>,
        wr: ArrayView2<'_, T>,
        mut qr: ArrayViewMut3<'_, T>,
        qs: ArrayViewMut2<'_, T>,
    ) -> Result<()> {
        let c_s = Validator::validate_dense(&c, "c")?;
        let wr_s = Validator::validate_dense(&wr, "wr")?;
        let qr_dim = qr.raw_dim();
        let qr_s = Validator::validate_dense_mut(&mut qr, "qr")?;

        let stencils = self.plan_stencils(q.len(), imin, imax, c.shape(), qr_dim.slice())?;
        let Some(layout) = self.plan_blend(imin, imax, wr.shape(), qr_dim.slice(), qs.shape())?
        else {
            return Ok(());
        };

        if let Some((stencil_layout, shifts)) = stencils {
            let q = CellAverages::from_view(q);
            self.executor
                .stencil_pass(&q, imin, imax, shifts, stencil_layout, c_s, qr_s);
        }
        self.executor.blend_pass(imin, imax, layout, wr_s, qr_s, qs);
        Ok(())
    }

    /// One full evaluation into owned buffers: weights, stencils, blend.
    ///
    /// Weights are normalized over the shifts the configured bias keeps, so
    /// the blend never mixes in a stencil that was not reconstructed. Shifts
    /// dropped by the bias get zero weight.
    ///
    /// Everything is validated before `buffers` is written.
    #[allow(clippy::too_many_arguments)]
    pub fn step(
        &self,
        q: ArrayView1<'_, T>,
        imin: usize,
        imax: usize,
        sigma: ArrayView2<'_, T>,
        w: ArrayView2<'_, T>,
        c: ArrayView4<'_, T>,
        buffers: &mut WenoBuffers<T>,
    ) -> Result<()> {
        let sigma_s = Validator::validate_dense(&sigma, "sigma")?;
        let w_s = Validator::validate_dense(&w, "w")?;
        let c_s = Validator::validate_dense(&c, "c")?;

        let WenoBuffers { wr, qr, qs } = buffers;
        let wr_dim = wr.raw_dim();
        let qr_dim = qr.raw_dim();

        let weights = self.plan_weights(
            imin,
            imax,
            sigma.shape(),
            w.shape(),
            wr_dim.slice(),
            self.bias,
        )?;
        let stencils = self.plan_stencils(q.len(), imin, imax, c.shape(), qr_dim.slice())?;
        let blend = self.plan_blend(imin, imax, wr_dim.slice(), qr_dim.slice(), qs.shape())?;

        let wr_s = wr
            .as_slice_mut()
            .ok_or(WenoError::NotContiguous { argument: "wr" })?;
        let qr_s = qr
            .as_slice_mut()
            .ok_or(WenoError::NotContiguous { argument: "qr" })?;

        if let Some((cells, k, allowed)) = weights {
            self.executor
                .weights_pass(imin, imax, cells, k, allowed, sigma_s, w_s, wr_s);
        }
        if let Some((layout, shifts)) = stencils {
            let q = CellAverages::from_view(q);
            self.executor
                .stencil_pass(&q, imin, imax, shifts, layout, c_s, qr_s);
        }
        if let Some(layout) = blend {
            self.executor
                .blend_pass(imin, imax, layout, wr_s, qr_s, qs.view_mut());
        }
        Ok(())
    }

    // ========================================================================
    // Allocation Helpers
    // ========================================================================

    /// Allocate zeroed work buffers for `cells` cells.
    ///
    /// Requires `order` and `points` to be configured.
    pub fn buffers(&self, cells: usize) -> Result<WenoBuffers<T>> {
        let k = self
            .order
            .ok_or(WenoError::NotConfigured { parameter: "order" })?;
        let n = self
            .points
            .ok_or(WenoError::NotConfigured { parameter: "points" })?;
        Ok(WenoBuffers::new(cells, k, n))
    }

    /// Allocate and fill reconstruction coefficients for the grid with cell
    /// boundaries `x` at the cell-relative `points` (`0` left, `1` right).
    ///
    /// Requires `order` to be configured. Shifts whose stencil leaves the
    /// grid hold zeros.
    pub fn coefficients(&self, x: &[T], points: &[T]) -> Result<Array4<T>> {
        let k = self
            .order
            .ok_or(WenoError::NotConfigured { parameter: "order" })?;
        if let Some(n) = self.points {
            Validator::validate_shape("points", &[points.len()], &[n])?;
        }

        let cells = x.len().saturating_sub(1);
        let mut c = Array4::zeros((cells, k, points.len(), k));
        coefficients_for_points(x, points, c.view_mut())?;
        Ok(c)
    }

    // ========================================================================
    // Planning
    // ========================================================================

    /// Check the weights pass; `None` means there is nothing to compute.
    ///
    /// Weights are restricted to the shifts bias `s` keeps; `s = 0` keeps all.
    #[allow(clippy::too_many_arguments)]
    fn plan_weights(
        &self,
        imin: usize,
        imax: usize,
        sigma: &[usize],
        w: &[usize],
        wr: &[usize],
        s: isize,
    ) -> Result<Option<(usize, usize, ShiftRange)>> {
        Validator::validate_shape("w", w, &self.expected("w", w, &[1], &[])?)?;
        let (cells, k) = (w[0], w[1]);
        Validator::validate_order(k)?;
        Validator::validate_shape("sigma", sigma, w)?;
        Validator::validate_shape("wr", wr, w)?;
        let allowed =
            ShiftRange::biased(s, k).ok_or(WenoError::InvalidBias { bias: s, order: k })?;

        if imin > imax {
            return Ok(None);
        }
        Validator::validate_cell_index("w", imax, cells)?;
        Ok(Some((cells, k, allowed)))
    }

    /// Check the stencil pass; `None` means there is nothing to compute.
    fn plan_stencils(
        &self,
        q_len: usize,
        imin: usize,
        imax: usize,
        c: &[usize],
        qr: &[usize],
    ) -> Result<Option<(Layout, ShiftRange)>> {
        Validator::validate_shape("c", c, &self.expected("c", c, &[1, 3], &[2])?)?;
        let layout = Layout {
            cells: c[0],
            order: c[1],
            points: c[2],
        };
        Validator::validate_order(layout.order)?;
        Validator::validate_trailing("c", c, &[layout.order, layout.points, layout.order])?;
        Validator::validate_trailing("qr", qr, &[layout.order, layout.points])?;

        if imin > imax {
            return Ok(None);
        }
        Validator::validate_cell_index("c", imax, layout.cells)?;
        Validator::validate_cell_index("qr", imax, qr[0])?;

        let Some(shifts) = ShiftRange::biased(self.bias, layout.order) else {
            log::debug!(
                "bias {} leaves no shift of k = {}; stencil pass skipped",
                self.bias,
                layout.order
            );
            return Ok(None);
        };
        Validator::validate_stencil_reach(imin, imax, shifts, layout.order, q_len)?;
        Ok(Some((layout, shifts)))
    }

    /// Check the blend pass; `None` means there is nothing to compute.
    fn plan_blend(
        &self,
        imin: usize,
        imax: usize,
        wr: &[usize],
        qr: &[usize],
        qs: &[usize],
    ) -> Result<Option<Layout>> {
        Validator::validate_shape("qr", qr, &self.expected("qr", qr, &[1], &[2])?)?;
        let layout = Layout {
            cells: qr[0],
            order: qr[1],
            points: qr[2],
        };
        Validator::validate_order(layout.order)?;
        Validator::validate_trailing("wr", wr, &[layout.order])?;
        Validator::validate_trailing("qs", qs, &[layout.points])?;

        if imin > imax {
            return Ok(None);
        }
        Validator::validate_cell_index("wr", imax, wr[0])?;
        Validator::validate_cell_index("qr", imax, layout.cells)?;
        Validator::validate_cell_index("qs", imax, qs[0])?;
        Ok(Some(layout))
    }

    /// `shape` with the configured order and point count substituted on the
    /// given axes.
    fn expected(
        &self,
        argument: &'static str,
        shape: &[usize],
        order_axes: &[usize],
        point_axes: &[usize],
    ) -> Result<Vec<usize>> {
        let rank = order_axes
            .iter()
            .chain(point_axes)
            .map(|&axis| axis + 1)
            .max()
            .unwrap_or(0);
        if shape.len() < rank {
            return Err(WenoError::ShapeMismatch {
                argument,
                expected: vec![0; rank],
                got: shape.to_vec(),
            });
        }

        let mut expected = shape.to_vec();
        if let Some(k) = self.order {
            for &axis in order_axes {
                expected[axis] = k;
            }
        }
        if let Some(n) = self.points {
            for &axis in point_axes {
                expected[axis] = n;
            }
        }
        Ok(expected)
    }
}
