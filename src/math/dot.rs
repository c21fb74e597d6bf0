//! Strided dot products.
//!
//! ## Purpose
//!
//! Both reconstruction stages reduce to the same inner loop: a dense
//! coefficient (or weight) vector against a strided run of values. This is
//! the hot loop of the crate.
//!
//! ```text
//! dot(u, v, n, stride) = sum_{j=0}^{n-1} u[j] * v[j * stride]
//! ```
//!
//! * Stage 1: `u = c[i, r, l, :]`, `v = q[i - r..]`, stride 1 (or the stride
//!   of `q` when it is not contiguous).
//! * Stage 2: `u = wr[i, :]`, `v = qr[i, 0, l..]`, stride `n`.
//!
//! ## Invariants
//!
//! * Terms are accumulated in ascending `j`, so results are reproducible
//!   regardless of which pass (sequential or parallel) calls in.
//! * `n == 0` yields zero.

use ndarray::ArrayView1;
use num_traits::Float;

/// Dot product of the dense `u[..n]` with every `stride`-th element of `v`.
#[inline]
pub fn strided_dot<T: Float>(u: &[T], v: &[T], n: usize, stride: usize) -> T {
    debug_assert!(stride >= 1, "strided_dot: stride must be at least 1");
    debug_assert!(u.len() >= n, "strided_dot: u shorter than n");
    debug_assert!(
        n == 0 || (n - 1) * stride < v.len(),
        "strided_dot: v too short for n and stride"
    );

    u[..n]
        .iter()
        .zip(v.iter().step_by(stride))
        .fold(T::zero(), |acc, (&a, &b)| acc + a * b)
}

/// Dot product of the dense `u` with a view that carries its own stride.
#[inline]
pub fn view_dot<T: Float>(u: &[T], v: ArrayView1<'_, T>) -> T {
    debug_assert_eq!(u.len(), v.len(), "view_dot: length mismatch");

    u.iter()
        .zip(v.iter())
        .fold(T::zero(), |acc, (&a, &b)| acc + a * b)
}
