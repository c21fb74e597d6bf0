//! Reconstruction coefficients on arbitrary 1-D grids.
//!
//! ## Purpose
//!
//! The stencil pass needs, for every cell `i`, shift `r` and reconstruction
//! point `xi`, coefficients `c_j` such that
//!
//! ```text
//! f(xi) ≈ sum_{j=0}^{k-1} c_j * q[i - r + j]
//! ```
//!
//! These depend only on the grid, so drivers compute them once and reuse
//! them across steps.
//!
//! ## Key concepts
//!
//! ### Primitive function
//!
//! With cell boundaries `x_0 < ... < x_k` of the stencil, the primitive
//! `F(x_m) = sum_{j<m} h_j q_j` is known exactly at the boundaries. The
//! reconstruction is the derivative of its Lagrange interpolant:
//!
//! ```text
//! p(xi) = sum_{m=0}^{k} F(x_m) L'_m(xi)
//!       = sum_{j=0}^{k-1} q_j * h_j * sum_{m=j+1}^{k} L'_m(xi)
//! ```
//!
//! The result is exact for polynomials of degree `k - 1` on any grid,
//! uniform or not.
//!
//! ## Non-goals
//!
//! * Optimal linear weights and smoothness indicators are not computed here.

use ndarray::ArrayViewMut4;
use num_traits::Float;

use crate::primitives::errors::WenoError;
use crate::primitives::layout::Layout;

// ============================================================================
// Single Stencil
// ============================================================================

/// Compute the reconstruction coefficients for point `xi` of cell `i` with
/// left shift `r` and stencil width `k`, storing them in `c` (length `k`).
///
/// `x` holds the cell boundaries, so cell `j` spans `[x[j], x[j + 1]]`.
pub fn reconstruction_coeffs<T: Float>(
    xi: T,
    i: usize,
    r: usize,
    k: usize,
    x: &[T],
    c: &mut [T],
) -> Result<(), WenoError> {
    if k == 0 {
        return Err(WenoError::InvalidOrder(k));
    }
    if c.len() != k {
        return Err(WenoError::ShapeMismatch {
            argument: "c",
            expected: vec![k],
            got: vec![c.len()],
        });
    }
    if r > i {
        return Err(WenoError::IndexOutOfRange {
            argument: "x",
            index: i as isize - r as isize,
            bound: x.len(),
        });
    }

    let base = i - r;
    if base + k >= x.len() {
        return Err(WenoError::IndexOutOfRange {
            argument: "x",
            index: (base + k) as isize,
            bound: x.len(),
        });
    }

    let nodes = &x[base..=base + k];
    if let Some(bad) = first_non_increasing(nodes) {
        return Err(WenoError::DegenerateGrid { index: base + bad });
    }

    fill_coeffs(xi, nodes, c);
    Ok(())
}

// ============================================================================
// Whole Grid
// ============================================================================

/// Fill `c[cell, shift, point, offset]` for every stencil that fits inside
/// the grid.
///
/// `points` are cell-relative positions: `0` is the left boundary of the
/// cell, `1` the right one. Shifts whose stencil would leave the grid are
/// left untouched.
pub fn coefficients_for_points<T: Float>(
    x: &[T],
    points: &[T],
    mut c: ArrayViewMut4<'_, T>,
) -> Result<(), WenoError> {
    let (cells, k, n, width) = c.dim();

    if k == 0 {
        return Err(WenoError::InvalidOrder(k));
    }
    if width != k || n != points.len() {
        return Err(WenoError::ShapeMismatch {
            argument: "c",
            expected: vec![cells, k, points.len(), k],
            got: vec![cells, k, n, width],
        });
    }
    if x.len() != cells + 1 {
        return Err(WenoError::ShapeMismatch {
            argument: "x",
            expected: vec![cells + 1],
            got: vec![x.len()],
        });
    }
    if let Some(bad) = first_non_increasing(x) {
        return Err(WenoError::DegenerateGrid { index: bad });
    }
    if n == 0 || cells == 0 {
        return Ok(());
    }

    let layout = Layout {
        cells,
        order: k,
        points: n,
    };
    let c = c
        .as_slice_mut()
        .ok_or(WenoError::NotContiguous { argument: "c" })?;

    for (i, cell) in c
        .chunks_exact_mut(layout.coefficients_per_cell())
        .enumerate()
    {
        let width = x[i + 1] - x[i];
        // Stencil i-r..i-r+k-1 must lie in 0..cells.
        let r_lo = (i + k).saturating_sub(cells);
        let r_hi = i.min(k - 1);
        for r in r_lo..=r_hi {
            let base = i - r;
            let nodes = &x[base..=base + k];
            for (l, &p) in points.iter().enumerate() {
                let offset = layout.coefficient_offset(r, l);
                fill_coeffs(x[i] + p * width, nodes, &mut cell[offset..offset + k]);
            }
        }
    }

    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

/// Index of the first boundary not strictly above its predecessor.
fn first_non_increasing<T: Float>(x: &[T]) -> Option<usize> {
    x.windows(2)
        .position(|pair| !(pair[1] > pair[0]))
        .map(|p| p + 1)
}

/// `c_j = h_j * sum_{m>j} L'_m(xi)`, accumulated from the right.
fn fill_coeffs<T: Float>(xi: T, nodes: &[T], c: &mut [T]) {
    let mut tail = T::zero();
    for j in (0..c.len()).rev() {
        tail = tail + lagrange_derivative(nodes, j + 1, xi);
        c[j] = (nodes[j + 1] - nodes[j]) * tail;
    }
}

/// Derivative at `xi` of the Lagrange basis polynomial for node `m`.
fn lagrange_derivative<T: Float>(nodes: &[T], m: usize, xi: T) -> T {
    let xm = nodes[m];

    let mut denom = T::one();
    for (q, &xq) in nodes.iter().enumerate() {
        if q != m {
            denom = denom * (xm - xq);
        }
    }

    let mut numer = T::zero();
    for l in (0..nodes.len()).filter(|&l| l != m) {
        let mut prod = T::one();
        for (q, &xq) in nodes.iter().enumerate() {
            if q != m && q != l {
                prod = prod * (xi - xq);
            }
        }
        numer = numer + prod;
    }

    numer / denom
}
