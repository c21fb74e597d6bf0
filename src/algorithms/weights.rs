//! Nonlinear WENO weights.
//!
//! ## Purpose
//!
//! Converts smoothness indicators and optimal linear weights of one cell
//! into normalized nonlinear weights. Stencils with large smoothness
//! indicators (oscillatory data) are down-weighted; on smooth data the
//! weights fall back to the optimal linear weights.
//!
//! ## Key concepts
//!
//! ```text
//! alpha_r = w_r / (eps + sigma_r)^2
//! wr_r    = alpha_r / sum_s alpha_s
//! ```
//!
//! `eps` keeps the denominator positive and bounds `alpha_r` when a stencil
//! is perfectly smooth.
//!
//! ## Invariants
//!
//! * Over the shifts in range, the weights sum to one.
//! * Weights are non-negative when `w >= 0`.
//! * Shifts outside the range are not written.
//!
//! ## Non-goals
//!
//! * Smoothness indicators and optimal weights are inputs, not computed here.
//! * A cell whose optimal weights are all zero over the range produces NaN;
//!   drivers must not request such cells.

use num_traits::Float;

use crate::primitives::shifts::ShiftRange;

/// Regularizer used when none is configured.
pub const DEFAULT_EPSILON: f64 = 1e-5;

/// Unnormalized weight for optimal weight `w` and smoothness `sigma`.
#[inline]
pub fn alpha<T: Float>(w: T, sigma: T, epsilon: T) -> T {
    let d = epsilon + sigma;
    w / (d * d)
}

/// Compute the nonlinear weights of one cell.
///
/// `sigma`, `w` and `wr` are the cell's rows, indexed by shift.
pub fn cell_weights<T: Float>(
    sigma: &[T],
    w: &[T],
    wr: &mut [T],
    shifts: ShiftRange,
    epsilon: T,
) {
    let mut sum_alpha = T::zero();
    for r in shifts.iter() {
        let a = alpha(w[r], sigma[r], epsilon);
        wr[r] = a;
        sum_alpha = sum_alpha + a;
    }

    for r in shifts.iter() {
        wr[r] = wr[r] / sum_alpha;
    }
}
