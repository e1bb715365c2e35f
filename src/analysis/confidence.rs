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
//! Confidence scoring of an estimate, see [`score`].

use crate::stats::{self, WindowStats};
use crate::ConfidenceStyle;

/// Number of most recent values that are compared against the whole window
/// to judge the stability of the signal.
pub const RECENT_WINDOW: usize = 30;

/// Range of resting heart rates that are considered normal.
const NORMAL_BPM_RANGE: core::ops::RangeInclusive<f64> = 60.0..=100.0;
const NORMAL_RANGE_BONUS: f64 = 1.0;
const OUT_OF_NORMAL_RANGE_BONUS: f64 = 0.7;

const SNR_WEIGHT: f64 = 0.4;
const RANGE_WEIGHT: f64 = 0.3;
const STABILITY_WEIGHT: f64 = 0.3;

/// Divisor that maps the variance of the raw window to `[0, 1]` for
/// [`ConfidenceStyle::VarianceMap`].
const VARIANCE_SCALE: f64 = 100.0;

/// Returns a confidence in `[0, 1]` for an estimate of `bpm` that was
/// derived from the raw window `values`.
///
/// `stats` must be the [`WindowStats`] of `values`. It is passed in so that
/// the caller can reuse a cached instance.
///
/// An empty window, non-finite window statistics, or a non-finite
/// intermediate result score `0.0`.
#[must_use]
pub fn score(style: ConfidenceStyle, values: &[f64], stats: &WindowStats, bpm: f64) -> f64 {
    if values.is_empty() || !stats.mean().is_finite() || !stats.variance().is_finite() {
        return 0.0;
    }

    let confidence = match style {
        ConfidenceStyle::VarianceMap => stats.variance() / VARIANCE_SCALE,
        ConfidenceStyle::Composite => composite(values, stats, bpm),
    };

    if confidence.is_finite() {
        confidence.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Weighted sum of signal-to-noise ratio, plausibility, and stability.
fn composite(values: &[f64], stats: &WindowStats, bpm: f64) -> f64 {
    let mean = stats.mean();
    let mean_abs_plus_one = libm::fabs(mean) + 1.0;

    let snr = (stats.std_dev() / mean_abs_plus_one).min(1.0);

    let range_bonus = if NORMAL_BPM_RANGE.contains(&bpm) {
        NORMAL_RANGE_BONUS
    } else {
        OUT_OF_NORMAL_RANGE_BONUS
    };

    let recent = &values[values.len() - RECENT_WINDOW.min(values.len())..];
    let recent_mean = stats::mean(recent);
    let stability = 1.0 - (libm::fabs(recent_mean - mean) / mean_abs_plus_one).min(1.0);

    SNR_WEIGHT * snr + RANGE_WEIGHT * range_bonus + STABILITY_WEIGHT * stability
}
