//! Shift ranges for WENO stencils.
//!
//! ## Purpose
//!
//! A shift `r` selects the stencil `q[i-r], ..., q[i-r+k-1]` for cell `i`.
//! This module computes which shifts take part in a given pass: the
//! boundary-clipped range used for the nonlinear weights and the biased range
//! used for the stencil reconstructions.
//!
//! ## Invariants
//!
//! * A valid range satisfies `lo <= hi <= k - 1`.
//! * Empty ranges are represented by `None`, never by `lo > hi`.

use core::ops::RangeInclusive;

/// Inclusive shift bounds `[lo, hi]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ShiftRange {
    /// Smallest shift (inclusive).
    pub lo: usize,

    /// Largest shift (inclusive).
    pub hi: usize,
}

impl ShiftRange {
    /// Create a new range if `lo <= hi`.
    #[inline]
    pub fn new(lo: usize, hi: usize) -> Option<Self> {
        if lo <= hi {
            Some(Self { lo, hi })
        } else {
            None
        }
    }

    /// Number of shifts in the range.
    #[inline]
    pub fn len(&self) -> usize {
        self.hi - self.lo + 1
    }

    /// Always `false`: empty ranges are not constructible.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over the shifts in ascending order.
    #[inline]
    pub fn iter(&self) -> RangeInclusive<usize> {
        self.lo..=self.hi
    }

    /// Shifts that receive a nonlinear weight at cell `i` of `n_cells`.
    ///
    /// ```text
    /// lo = max(0, i - (N - k) - 1)
    /// hi = min(k - 1, i)
    /// ```
    ///
    /// Returns `None` for `k == 0` or when `k > N + 1` empties the range.
    #[inline]
    pub fn clipped(i: usize, n_cells: usize, k: usize) -> Option<Self> {
        if k == 0 {
            return None;
        }
        let lo = (i + k).saturating_sub(n_cells + 1);
        let hi = (k - 1).min(i);
        Self::new(lo, hi)
    }

    /// Shifts computed by the stencil pass for bias `s`.
    ///
    /// ```text
    /// lo = max(0, s)
    /// hi = min(k - 1 + s, k - 1)
    /// ```
    ///
    /// A positive bias drops the low shifts, a negative bias the high ones.
    pub fn biased(s: isize, k: usize) -> Option<Self> {
        if k == 0 {
            return None;
        }
        let top = k as isize - 1;
        let lo = s.max(0);
        let hi = (top + s).min(top);
        if hi < lo {
            return None;
        }
        Self::new(lo as usize, hi as usize)
    }

    /// Returns `true` if `r` lies in the range.
    #[inline]
    pub fn contains(&self, r: usize) -> bool {
        self.lo <= r && r <= self.hi
    }

    /// Shifts present in both ranges.
    #[inline]
    pub fn intersect(&self, other: ShiftRange) -> Option<Self> {
        Self::new(self.lo.max(other.lo), self.hi.min(other.hi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clipped_interior_covers_all_shifts() {
        assert_eq!(ShiftRange::clipped(5, 10, 3), ShiftRange::new(0, 2));
    }

    #[test]
    fn clipped_left_boundary() {
        assert_eq!(ShiftRange::clipped(0, 10, 3), ShiftRange::new(0, 0));
        assert_eq!(ShiftRange::clipped(1, 10, 3), ShiftRange::new(0, 1));
    }

    #[test]
    fn clipped_right_boundary() {
        assert_eq!(ShiftRange::clipped(8, 10, 3), ShiftRange::new(0, 2));
        assert_eq!(ShiftRange::clipped(9, 10, 3), ShiftRange::new(1, 2));
    }

    #[test]
    fn clipped_degenerate() {
        assert_eq!(ShiftRange::clipped(0, 10, 0), None);
        assert_eq!(ShiftRange::clipped(1, 1, 4), None);
    }

    #[test]
    fn biased_ranges() {
        assert_eq!(ShiftRange::biased(0, 3), ShiftRange::new(0, 2));
        assert_eq!(ShiftRange::biased(1, 3), ShiftRange::new(1, 2));
        assert_eq!(ShiftRange::biased(-1, 3), ShiftRange::new(0, 1));
        assert_eq!(ShiftRange::biased(3, 3), None);
        assert_eq!(ShiftRange::biased(-3, 3), None);
    }

    #[test]
    fn intersection_of_clipped_and_biased() {
        let right_edge = ShiftRange::clipped(9, 10, 3).unwrap();
        let downwind = ShiftRange::biased(-1, 3).unwrap();
        assert_eq!(right_edge.intersect(downwind), ShiftRange::new(1, 1));

        let left_edge = ShiftRange::clipped(0, 10, 3).unwrap();
        let upwind = ShiftRange::biased(1, 3).unwrap();
        assert_eq!(left_edge.intersect(upwind), None);
    }

    #[test]
    fn iter_and_len_agree() {
        let range = ShiftRange::new(1, 3).unwrap();
        assert_eq!(range.len(), 3);
        assert_eq!(range.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(range.contains(2));
        assert!(!range.contains(0));
    }
}
