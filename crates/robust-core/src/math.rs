//! Mathematical utilities for histogram construction
//!
//! Percentiles here are index-based: the value at position
//! `floor(p * n)` of the ascending sequence, with no interpolation.

/// Index of the `percent`-th percentile in an ascending sequence of length `n`
///
/// Computed as `(percent * n) / 100` with integer truncation, clamped to the
/// last valid index. `n` must be non-zero.
pub fn percentile_index(n: usize, percent: usize) -> usize {
    debug_assert!(n > 0, "percentile of an empty sequence");
    debug_assert!(percent <= 100, "percent must be in [0, 100]");
    ((percent * n) / 100).min(n - 1)
}
