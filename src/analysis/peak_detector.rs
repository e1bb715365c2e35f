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
//! Detection of local maxima ("peaks") against an adaptive threshold.
//!
//! The threshold adapts to the signal: it is a multiple of either the
//! variance or the mean absolute value of the whole signal. Hence, noise on a
//! flat signal doesn't produce peaks while the pulse wave on a strong signal
//! does.
//!
//! ```text
//!        x               x               x
//! ------x-x-------------x-x-------------x-x------ threshold
//!      x   x           x   x           x   x
//! ----x-----x---------x-----x---------x-----x---- 0
//!            x       x       x       x
//!             x x x x         x x x x
//! ```

use crate::stats;
use crate::ThresholdStat;
use alloc::vec::Vec;

/// Returns the threshold a local maximum must exceed to count as peak.
#[must_use]
pub fn peak_threshold(signal: &[f64], stat: ThresholdStat, factor: f64) -> f64 {
    let base = match stat {
        ThresholdStat::Variance => stats::variance(signal),
        ThresholdStat::MeanAbs => stats::mean_abs(signal),
    };
    base * factor
}

/// Returns the ascending indices of all peaks in `signal`.
///
/// An interior index `i` (`1 <= i <= n - 2`) is a peak if its value is
/// strictly greater than both neighbours and exceeds the threshold of
/// [`peak_threshold`]. With `absolute_compare`, the absolute value is
/// compared against the threshold, otherwise the signed value.
///
/// Signals with less than three values never contain peaks.
#[must_use]
pub fn find_peaks(
    signal: &[f64],
    stat: ThresholdStat,
    factor: f64,
    absolute_compare: bool,
) -> Vec<usize> {
    if signal.len() < 3 {
        return Vec::new();
    }

    let threshold = peak_threshold(signal, stat, factor);
    let exceeds_threshold = |value: f64| {
        if absolute_compare {
            libm::fabs(value) > threshold
        } else {
            value > threshold
        }
    };

    signal
        .windows(3)
        .enumerate()
        .filter(|(_, w)| w[1] > w[0] && w[1] > w[2] && exceeds_threshold(w[1]))
        // +1: the window starts at the left neighbour
        .map(|(i, _)| i + 1)
        .collect()
}
