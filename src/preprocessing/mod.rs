//! Necessary types, helpers, and functions to pre-process the raw samples to
//! prepare them for the **analysis layer**.
//!
//! This module only operates on raw data and data streams, without interacting
//! with the outer world (I/O).

use crate::stats;
use alloc::vec::Vec;

pub mod sliding_window;

/// Removes the DC offset: subtracts the arithmetic mean of all values from
/// each value.
#[must_use]
pub fn detrend(values: &[f64]) -> Vec<f64> {
    let mean = stats::mean(values);
    values.iter().map(|value| value - mean).collect()
}

/// Centered moving average of `window_size` values.
///
/// For index `i`, the average is taken over the half-open range
/// `max(0, i - window_size / 2)..min(n, i + window_size / 2 + 1)`. Near the
/// edges the range is truncated, not zero-padded, so edge values are
/// averages of fewer values. The output has the same length as the input.
///
/// A `window_size` of `0` behaves like `1` (identity).
#[must_use]
pub fn smooth(values: &[f64], window_size: usize) -> Vec<f64> {
    let n = values.len();
    let half = window_size / 2;

    // prefix[i] = sum of values[..i]
    let mut prefix = Vec::with_capacity(n + 1);
    prefix.push(0.0);
    let mut acc = 0.0;
    for value in values {
        acc += value;
        prefix.push(acc);
    }

    (0..n)
        .map(|i| {
            let begin = i.saturating_sub(half);
            let end = (i + half + 1).min(n);
            (prefix[end] - prefix[begin]) / (end - begin) as f64
        })
        .collect()
}
