//! Input validation for WENO configuration and arrays.
//!
//! ## Purpose
//!
//! This module checks every contract the passes rely on before any output
//! buffer is written: dense layout of the arrays accessed by flat offset,
//! consistent stencil width and point counts across arrays, and cell ranges
//! that stay inside every array they touch.
//!
//! ## Design notes
//!
//! * All validation is performed upfront; a failed check leaves outputs
//!   untouched.
//! * Validation is fail-fast: returns on the first error encountered.
//! * Contiguity is checked first, in argument order, then shapes, then
//!   index ranges.
//! * Errors name the offending argument.
//!
//! ## Validated contracts
//!
//! * **Dense arrays**: `sigma`, `w`, `wr`, `c`, `qr` must be row-major
//!   contiguous. `q` and `qs` may have any strides.
//! * **Shapes**: non-cell axes must agree on `k` and `n`.
//! * **Ranges**: `imax` must be a row of every array indexed by cell, and
//!   every stencil read must fall inside `q`.
//! * **Parameters**: `k >= 1`, `n >= 1`, `epsilon > 0` and finite, a bias
//!   that leaves at least one shift.
//!
//! ## Visibility
//!
//! Internal to the API layer; may change without notice.

use ndarray::{ArrayView, ArrayViewMut, Dimension};
use num_traits::Float;

use crate::primitives::errors::WenoError;
use crate::primitives::shifts::ShiftRange;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for WENO configuration and input arrays.
///
/// All methods return `Result<_, WenoError>` and fail fast upon identifying
/// the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Array Contracts
    // ========================================================================

    /// Borrow a read-only array as a flat row-major slice.
    pub fn validate_dense<'a, T, D: Dimension>(
        a: &ArrayView<'a, T, D>,
        argument: &'static str,
    ) -> Result<&'a [T], WenoError> {
        a.to_slice().ok_or(WenoError::NotContiguous { argument })
    }

    /// Borrow an output array as a flat row-major slice.
    pub fn validate_dense_mut<'b, T, D: Dimension>(
        a: &'b mut ArrayViewMut<'_, T, D>,
        argument: &'static str,
    ) -> Result<&'b mut [T], WenoError> {
        a.as_slice_mut().ok_or(WenoError::NotContiguous { argument })
    }

    /// Require an exact shape.
    pub fn validate_shape(
        argument: &'static str,
        got: &[usize],
        expected: &[usize],
    ) -> Result<(), WenoError> {
        if got != expected {
            return Err(WenoError::ShapeMismatch {
                argument,
                expected: expected.to_vec(),
                got: got.to_vec(),
            });
        }
        Ok(())
    }

    /// Require the axes after the cell axis to equal `trailing`.
    ///
    /// The cell axis itself is checked against the range separately.
    pub fn validate_trailing(
        argument: &'static str,
        got: &[usize],
        trailing: &[usize],
    ) -> Result<(), WenoError> {
        if got.len() != trailing.len() + 1 || got[1..] != *trailing {
            let mut expected = Vec::with_capacity(trailing.len() + 1);
            expected.push(got.first().copied().unwrap_or(0));
            expected.extend_from_slice(trailing);
            return Err(WenoError::ShapeMismatch {
                argument,
                expected,
                got: got.to_vec(),
            });
        }
        Ok(())
    }

    // ========================================================================
    // Range Contracts
    // ========================================================================

    /// Require cell `imax` to be a row of an array with `cells` rows.
    pub fn validate_cell_index(
        argument: &'static str,
        imax: usize,
        cells: usize,
    ) -> Result<(), WenoError> {
        if imax >= cells {
            return Err(WenoError::IndexOutOfRange {
                argument,
                index: imax as isize,
                bound: cells,
            });
        }
        Ok(())
    }

    /// Require every stencil `q[i - r..i - r + k]` for `i` in `[imin, imax]`
    /// and `r` in `shifts` to lie inside `0..len`.
    pub fn validate_stencil_reach(
        imin: usize,
        imax: usize,
        shifts: ShiftRange,
        k: usize,
        len: usize,
    ) -> Result<(), WenoError> {
        let lowest = imin as isize - shifts.hi as isize;
        if lowest < 0 {
            return Err(WenoError::IndexOutOfRange {
                argument: "q",
                index: lowest,
                bound: len,
            });
        }

        let highest = imax + k - 1 - shifts.lo;
        if highest >= len {
            return Err(WenoError::IndexOutOfRange {
                argument: "q",
                index: highest as isize,
                bound: len,
            });
        }
        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the stencil width `k`.
    pub fn validate_order(k: usize) -> Result<(), WenoError> {
        if k == 0 {
            return Err(WenoError::InvalidOrder(k));
        }
        Ok(())
    }

    /// Validate the number of reconstruction points per cell.
    pub fn validate_points(n: usize) -> Result<(), WenoError> {
        if n == 0 {
            return Err(WenoError::InvalidPoints(n));
        }
        Ok(())
    }

    /// Validate the regularizer of the nonlinear weights.
    pub fn validate_epsilon<T: Float>(epsilon: T) -> Result<(), WenoError> {
        if !epsilon.is_finite() || epsilon <= T::zero() {
            return Err(WenoError::InvalidEpsilon(
                epsilon.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate that bias `s` leaves at least one shift of `k`.
    pub fn validate_bias(s: isize, k: usize) -> Result<(), WenoError> {
        if ShiftRange::biased(s, k).is_none() {
            return Err(WenoError::InvalidBias { bias: s, order: k });
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), WenoError> {
        if let Some(parameter) = duplicate_param {
            return Err(WenoError::DuplicateParameter { parameter });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{s, Array2};

    #[test]
    fn transposed_view_is_not_dense() {
        let a = Array2::<f64>::zeros((3, 2));
        let t = a.t();
        assert_eq!(
            Validator::validate_dense(&t, "sigma"),
            Err(WenoError::NotContiguous { argument: "sigma" })
        );
        assert!(Validator::validate_dense(&a.view(), "sigma").is_ok());
    }

    #[test]
    fn column_slice_of_output_is_not_dense() {
        let mut a = Array2::<f64>::zeros((3, 4));
        let mut cols = a.slice_mut(s![.., ..2]);
        assert!(Validator::validate_dense_mut(&mut cols, "wr").is_err());
    }

    #[test]
    fn trailing_axes_checked() {
        assert!(Validator::validate_trailing("qr", &[7, 3, 2], &[3, 2]).is_ok());
        assert_eq!(
            Validator::validate_trailing("qr", &[7, 3, 1], &[3, 2]),
            Err(WenoError::ShapeMismatch {
                argument: "qr",
                expected: vec![7, 3, 2],
                got: vec![7, 3, 1],
            })
        );
    }

    #[test]
    fn stencil_reach_both_ends() {
        let all = ShiftRange::new(0, 2).unwrap();
        assert!(Validator::validate_stencil_reach(2, 7, all, 3, 10).is_ok());
        assert!(matches!(
            Validator::validate_stencil_reach(1, 7, all, 3, 10),
            Err(WenoError::IndexOutOfRange { index: -1, .. })
        ));
        assert!(matches!(
            Validator::validate_stencil_reach(2, 8, all, 3, 10),
            Err(WenoError::IndexOutOfRange { index: 10, .. })
        ));
    }

    #[test]
    fn parameters() {
        assert!(Validator::validate_order(0).is_err());
        assert!(Validator::validate_points(0).is_err());
        assert!(Validator::validate_epsilon(0.0).is_err());
        assert!(Validator::validate_epsilon(f64::NAN).is_err());
        assert!(Validator::validate_epsilon(1e-6).is_ok());
        assert!(Validator::validate_bias(2, 3).is_ok());
        assert!(Validator::validate_bias(-3, 3).is_err());
        assert_eq!(
            Validator::validate_no_duplicates(Some("order")),
            Err(WenoError::DuplicateParameter { parameter: "order" })
        );
    }
}
