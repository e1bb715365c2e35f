//! The analysis layer focuses on the actual heart rate estimation.
//!
//! All code here requires that all data was properly processed by the
//! [preprocessing layer]. Here live peak detection, the conversion of peak
//! spacing into beats per minute, and the confidence scoring.
//!
//! [preprocessing layer]: crate::preprocessing

use thiserror::Error;

pub mod confidence;
pub mod interval_estimator;
pub mod peak_detector;

/// Reasons why no estimate could be produced from the current window.
///
/// None of these is a failure that requires recovery. They all mean "try
/// again with more samples".
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum NoEstimate {
    /// The window doesn't hold enough samples yet.
    #[error("not enough samples: {len} < {required}")]
    NotEnoughSamples { len: usize, required: usize },
    /// Less than two peaks were found; there is no interval.
    #[error("found {0} peaks but need at least two")]
    TooFewPeaks(usize),
    /// All intervals were rejected as outliers.
    #[error("all intervals were rejected as outliers")]
    NoIntervalLeft,
    /// The samples don't span a positive amount of time.
    #[error("the samples don't span a positive amount of time")]
    NonPositiveTimeSpan,
    /// The estimate is outside the plausible range.
    #[error("{bpm} BPM is out of the plausible range {min}..={max}")]
    OutOfRange { bpm: f64, min: f64, max: f64 },
}
