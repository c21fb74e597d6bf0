//! Error types for WENO weight computation and reconstruction.
//!
//! Every failure the crate reports is a validation failure detected before
//! any output buffer is written. There are no transient or partial-success
//! states: once an operation returns `Err`, its outputs are untouched.

use thiserror::Error;

/// Errors raised while validating WENO inputs and configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WenoError {
    /// An array that must be densely packed in row-major order is not.
    #[error("{argument} is not contiguous and/or aligned")]
    NotContiguous {
        /// Name of the offending argument.
        argument: &'static str,
    },

    /// An array does not have the shape implied by the other arguments.
    #[error("{argument} has shape {got:?}, expected {expected:?}")]
    ShapeMismatch {
        /// Name of the offending argument.
        argument: &'static str,
        /// Expected shape.
        expected: Vec<usize>,
        /// Actual shape.
        got: Vec<usize>,
    },

    /// A cell range or stencil reaches outside an array.
    #[error("{argument} index {index} is outside 0..{bound}")]
    IndexOutOfRange {
        /// Name of the array (or range bound) that would be overrun.
        argument: &'static str,
        /// First offending index.
        index: isize,
        /// Exclusive upper bound of valid indices.
        bound: usize,
    },

    /// Stencil width `k` must be at least 1.
    #[error("invalid stencil width k = {0}: must be at least 1")]
    InvalidOrder(usize),

    /// Number of reconstruction points per cell must be at least 1.
    #[error("invalid number of reconstruction points: {0}")]
    InvalidPoints(usize),

    /// Regularizer must be positive and finite.
    #[error("invalid epsilon {0}: must be positive and finite")]
    InvalidEpsilon(f64),

    /// Bias leaves no shift to compute.
    #[error("invalid bias {bias} for stencil width {order}: no shift remains")]
    InvalidBias {
        /// Requested bias.
        bias: isize,
        /// Stencil width.
        order: usize,
    },

    /// Cell boundaries are not strictly increasing.
    #[error("degenerate grid: cell boundaries must be strictly increasing at x[{index}]")]
    DegenerateGrid {
        /// Index of the first boundary that is not above its predecessor.
        index: usize,
    },

    /// An operation needs a builder parameter that was never set.
    #[error("parameter '{parameter}' is not configured")]
    NotConfigured {
        /// Name of the missing parameter.
        parameter: &'static str,
    },

    /// A builder parameter was set more than once.
    #[error("parameter '{parameter}' was set multiple times")]
    DuplicateParameter {
        /// Name of the duplicated parameter.
        parameter: &'static str,
    },
}
