/*
MIT License

Copyright (c) 2024 Philipp Schuster

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/
//! Basic statistics over sample windows, see [`WindowStats`].
//!
//! All functions operate on plain `f64` slices and are pure.

use alloc::vec::Vec;
use core::cmp::Ordering;

/// Arithmetic mean. Returns `0.0` for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance. Returns `0.0` for an empty slice.
#[must_use]
pub fn variance(values: &[f64]) -> f64 {
    variance_around(values, mean(values))
}

/// Population variance around an already known mean.
fn variance_around(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values
        .iter()
        .map(|value| {
            let diff = value - mean;
            diff * diff
        })
        .sum::<f64>()
        / values.len() as f64
}

/// Mean of the absolute values. Returns `0.0` for an empty slice.
#[must_use]
pub fn mean_abs(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().copied().map(libm::fabs).sum::<f64>() / values.len() as f64
}

/// Median of the values. The input is left untouched; a sorted copy is
/// used. Sequences of even length yield the average of the two middle
/// values. Returns `None` for an empty slice.
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = Vec::from(values);
    // NaN can't be ordered; they end up somewhere but don't panic.
    sorted.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };
    Some(median)
}

/// Holds statistical information about a window of raw samples, e.g., the
/// mean brightness.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct WindowStats {
    mean: f64,
    variance: f64,
    std_dev: f64,
}

impl WindowStats {
    /// The arithmetic mean.
    #[inline(always)]
    #[must_use]
    pub const fn mean(&self) -> f64 {
        self.mean
    }

    /// The population variance.
    #[inline(always)]
    #[must_use]
    pub const fn variance(&self) -> f64 {
        self.variance
    }

    /// The population standard deviation.
    #[inline(always)]
    #[must_use]
    pub const fn std_dev(&self) -> f64 {
        self.std_dev
    }
}

impl From<&[f64]> for WindowStats {
    #[inline]
    fn from(values: &[f64]) -> Self {
        let mean = mean(values);
        let variance = variance_around(values, mean);
        Self {
            mean,
            variance,
            std_dev: libm::sqrt(variance),
        }
    }
}
