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
//! Module for [`Estimator`], the heart rate estimation facade.

use crate::analysis::confidence;
use crate::analysis::interval_estimator::estimate_bpm;
use crate::analysis::peak_detector::find_peaks;
use crate::analysis::NoEstimate;
use crate::preprocessing::sliding_window::SlidingWindow;
use crate::preprocessing::{detrend, smooth};
use crate::stats::WindowStats;
use crate::{Clock, ConfigError, Preset, Sample};
use alloc::vec::Vec;
use core::fmt::{Display, Formatter};
use core::time::Duration;

/// Result of a successful estimation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EstimationResult {
    /// Estimated heart rate in beats per minute.
    pub bpm: u32,
    /// Trust in the estimate in range `[0, 1]`.
    pub confidence: f64,
    /// Timestamp of the newest sample the estimate is based on.
    pub timestamp: Duration,
}

/// The phases of an [`Estimator`].
///
/// ```text
///        first sample           min_samples reached
/// Idle ----------------> Filling -------------------> Ready
///   ^                       |                           |
///   +------------- reset() -+---------------------------+
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EstimatorState {
    /// No samples since construction or the last reset.
    Idle,
    /// Collecting samples; not enough for an estimation yet.
    Filling,
    /// Enough samples to attempt an estimation.
    Ready,
}

impl Display for EstimatorState {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Filling => "filling",
            Self::Ready => "ready",
        };
        f.write_str(name)
    }
}

/// Heart rate estimator following the properties described in the
/// [module description].
///
/// The estimator owns a sliding window of the most recent samples and an
/// immutable [`Preset`]. Feed it with [`Estimator::process_sample`] and
/// regularly ask for an estimate with [`Estimator::try_estimate`]. The
/// cadence of both is up to the caller.
///
/// ## Example with a camera at a fixed frame rate
/// ```rust
/// use core::time::Duration;
/// use heartbeat_detector::{Estimator, ManualClock, PresetKind};
///
/// let clock = ManualClock::default();
/// let mut estimator = Estimator::with_clock(PresetKind::Robust.preset(), &clock).unwrap();
///
/// // Let's pretend these are the average intensities of camera frames.
/// let frames = [128.0, 129.5, 131.2, 129.8 /*, ... */];
/// for intensity in frames {
///     estimator.process_sample(intensity);
///     clock.advance(Duration::from_millis(33));
/// }
///
/// // Not enough samples yet.
/// assert!(!estimator.has_enough_samples());
/// assert_eq!(estimator.try_estimate(), None);
/// ```
///
/// [module description]: crate
#[derive(Debug)]
pub struct Estimator<C: Clock> {
    // read-only fields
    preset: Preset,
    clock: C,

    // mutable fields
    window: SlidingWindow,
    /// Statistics of the raw window. Invalidated by every new sample.
    cached_stats: Option<WindowStats>,
}

#[cfg(feature = "std")]
impl Estimator<crate::StdClock> {
    /// Creates a new estimator that timestamps samples with the monotonic
    /// system clock.
    ///
    /// Fails if the preset is invalid, see [`Preset::validate`].
    pub fn new(preset: Preset) -> Result<Self, ConfigError> {
        Self::with_clock(preset, crate::StdClock::new())
    }
}

impl<C: Clock> Estimator<C> {
    /// Creates a new estimator that timestamps samples with the given clock.
    ///
    /// Fails if the preset is invalid, see [`Preset::validate`].
    pub fn with_clock(preset: Preset, clock: C) -> Result<Self, ConfigError> {
        preset.validate()?;
        Ok(Self {
            window: SlidingWindow::new(preset.capacity),
            preset,
            clock,
            cached_stats: None,
        })
    }

    /// Adds a sample, timestamped with the clock of the estimator.
    ///
    /// This function is supposed to be called once per acquired sample, for
    /// example, once per camera frame. Non-finite values are dropped.
    pub fn process_sample(&mut self, value: f64) {
        let timestamp = self.clock.now();
        self.process_sample_at(value, timestamp);
    }

    /// Adds a sample with a timestamp provided by the caller. Use this if the
    /// sample source delivers its own timestamps, such as camera frames.
    ///
    /// Timestamps are expected to be monotonic. Non-finite values are
    /// dropped.
    pub fn process_sample_at(&mut self, value: f64, timestamp: Duration) {
        if !value.is_finite() {
            log::warn!("Dropping non-finite sample {value} at {timestamp:?}");
            return;
        }

        let old_state = self.state();
        self.window.push(Sample::new(value, timestamp));
        self.cached_stats = None;

        let new_state = self.state();
        if new_state != old_state {
            log::debug!(
                "Estimator: {old_state} -> {new_state} ({} samples)",
                self.window.len()
            );
        }
    }

    /// Adds multiple samples at once, all timestamped with the clock of the
    /// estimator.
    pub fn process_samples(&mut self, values: impl IntoIterator<Item = f64>) {
        for value in values {
            self.process_sample(value);
        }
    }

    /// Clears all samples and cached values. The preset is kept.
    pub fn reset(&mut self) {
        log::debug!(
            "Estimator: reset in state {} ({} samples)",
            self.state(),
            self.window.len()
        );
        self.window.reset();
        self.cached_stats = None;
    }

    /// Returns the current phase.
    #[must_use]
    pub fn state(&self) -> EstimatorState {
        match self.window.len() {
            0 => EstimatorState::Idle,
            len if len < self.preset.min_samples => EstimatorState::Filling,
            _ => EstimatorState::Ready,
        }
    }

    /// Whether enough samples were collected to attempt an estimation.
    #[must_use]
    pub fn has_enough_samples(&self) -> bool {
        self.state() == EstimatorState::Ready
    }

    /// Tries to estimate the heart rate from the current window.
    ///
    /// Returns `None` if no plausible estimate can be derived from the
    /// current window. This is not an error; it means "try again later with
    /// more samples". See [`Estimator::estimate`] for the reason.
    ///
    /// Calling this repeatedly without adding samples yields the same
    /// result.
    pub fn try_estimate(&mut self) -> Option<EstimationResult> {
        match self.estimate() {
            Ok(result) => Some(result),
            Err(reason) => {
                log::debug!("Estimator: no estimate: {reason}");
                None
            }
        }
    }

    /// Like [`Estimator::try_estimate`] but tells why there is no estimate.
    pub fn estimate(&mut self) -> Result<EstimationResult, NoEstimate> {
        if !self.has_enough_samples() {
            return Err(NoEstimate::NotEnoughSamples {
                len: self.window.len(),
                required: self.preset.min_samples.max(1),
            });
        }

        let snapshot = self.window.snapshot();
        let values = snapshot.iter().map(|s| s.value).collect::<Vec<_>>();
        let timestamps = snapshot.iter().map(|s| s.timestamp).collect::<Vec<_>>();

        let signal = smooth(&detrend(&values), self.preset.smooth_window);
        let peaks = find_peaks(
            &signal,
            self.preset.threshold_stat,
            self.preset.threshold_factor,
            self.preset.absolute_compare,
        );
        let bpm = estimate_bpm(
            &peaks,
            &timestamps,
            self.preset.outlier_rejection_factor(),
        )?;

        if !(self.preset.min_bpm..=self.preset.max_bpm).contains(&bpm) {
            return Err(NoEstimate::OutOfRange {
                bpm,
                min: self.preset.min_bpm,
                max: self.preset.max_bpm,
            });
        }

        let stats = self.window_stats(&values);
        let confidence =
            confidence::score(self.preset.confidence_style, &values, &stats, bpm);

        let result = EstimationResult {
            bpm: libm::round(bpm) as u32,
            confidence,
            // can't be empty: state is ready
            timestamp: timestamps.last().copied().unwrap_or_default(),
        };
        log::trace!("Estimator: {result:?} from {} peaks", peaks.len());
        Ok(result)
    }

    /// Returns the statistics of the raw window. Computed lazily and cached
    /// until the next sample arrives or the estimator is reset.
    fn window_stats(&mut self, values: &[f64]) -> WindowStats {
        *self
            .cached_stats
            .get_or_insert_with(|| WindowStats::from(values))
    }

    /// The immutable preset of this estimator.
    #[must_use]
    pub const fn preset(&self) -> &Preset {
        &self.preset
    }

    /// The clock used to timestamp samples.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Read access to the sliding window.
    #[must_use]
    pub const fn window(&self) -> &SlidingWindow {
        &self.window
    }

    /// The current samples, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Sample> {
        self.window.snapshot()
    }

    /// Number of samples in the window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Whether the window is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }
}
