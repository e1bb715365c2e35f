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
//! Conversion of peak spacing into beats per minute.

use super::NoEstimate;
use crate::stats;
use alloc::vec::Vec;
use core::time::Duration;

/// Returns the distances (in samples) between consecutive peaks.
#[must_use]
pub fn intervals(peak_indices: &[usize]) -> Vec<f64> {
    peak_indices
        .windows(2)
        .map(|pair| pair[1].abs_diff(pair[0]) as f64)
        .collect()
}

/// Keeps only the intervals whose absolute deviation from the median of all
/// intervals is less than `median * factor`. The order of the surviving
/// intervals is preserved.
#[must_use]
pub fn filter_outlier_intervals(intervals: &[f64], factor: f64) -> Vec<f64> {
    let Some(median) = stats::median(intervals) else {
        return Vec::new();
    };
    let max_deviation = median * factor;
    intervals
        .iter()
        .copied()
        .filter(|interval| libm::fabs(interval - median) < max_deviation)
        .collect()
}

/// Estimates the heart rate from the peak positions.
///
/// - `peak_indices`: ascending peak indices into the window
/// - `timestamps`: timestamps of all samples of the window, oldest first
/// - `outlier_factor`: enables median-based outlier rejection of intervals
///   with the given factor, see [`filter_outlier_intervals`]
///
/// The average interval (in samples) is converted to seconds with the
/// effective sample rate of the window, i.e., the number of samples divided
/// by the time between the oldest and the newest sample.
///
/// The result is not checked against a plausible range; this is up to the
/// caller.
pub fn estimate_bpm(
    peak_indices: &[usize],
    timestamps: &[Duration],
    outlier_factor: Option<f64>,
) -> Result<f64, NoEstimate> {
    if peak_indices.len() < 2 {
        return Err(NoEstimate::TooFewPeaks(peak_indices.len()));
    }

    let mut intervals = intervals(peak_indices);
    if let Some(factor) = outlier_factor {
        intervals = filter_outlier_intervals(&intervals, factor);
        if intervals.is_empty() {
            return Err(NoEstimate::NoIntervalLeft);
        }
    }
    let avg_interval = stats::mean(&intervals);

    let time_span = match (timestamps.first(), timestamps.last()) {
        (Some(first), Some(last)) if last > first => (*last - *first).as_secs_f64(),
        _ => return Err(NoEstimate::NonPositiveTimeSpan),
    };

    let fps = timestamps.len() as f64 / time_span;
    let seconds_per_beat = avg_interval / fps;
    let bpm = 60.0 / seconds_per_beat;
    log::trace!(
        "estimate_bpm: peaks={}, avg_interval={avg_interval:.3}, fps={fps:.3}, bpm={bpm:.3}",
        peak_indices.len()
    );
    Ok(bpm)
}
