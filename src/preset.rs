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
//! Module for [`Preset`], the immutable configuration of an
//! [`Estimator`], and the table of named presets, see [`PresetKind`].
//!
//! [`Estimator`]: crate::Estimator

use core::fmt::{Display, Formatter};
use core::str::FromStr;
use thiserror::Error;

/// Statistic of the smoothed signal that is used as base for the peak
/// threshold.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ThresholdStat {
    /// Population variance of the signal.
    Variance,
    /// Mean of the absolute values of the signal.
    #[default]
    MeanAbs,
}

/// Strategy to derive the confidence of an estimate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ConfidenceStyle {
    /// Maps the variance of the raw window linearly to `[0, 1]`.
    VarianceMap,
    /// Combines signal-to-noise ratio, plausibility of the BPM, and
    /// stability of the recent samples.
    #[default]
    Composite,
}

/// Possible errors when validating a [`Preset`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The window must be able to hold at least one sample.
    #[error("capacity must be greater than zero")]
    ZeroCapacity,
    /// The window can never collect enough samples.
    #[error("min_samples ({min_samples}) must not exceed capacity ({capacity})")]
    MinSamplesExceedCapacity { min_samples: usize, capacity: usize },
    /// The moving average needs at least one sample.
    #[error("smooth_window must be greater than zero")]
    ZeroSmoothWindow,
    /// The plausible BPM range is empty or not finite.
    #[error("invalid BPM range: {min}..={max}")]
    InvalidBpmRange { min: f64, max: f64 },
    /// A tuning factor is not finite or out of its valid range.
    #[error("invalid value for {name}: {value}")]
    InvalidFactor { name: &'static str, value: f64 },
}

/// Immutable bundle of tuning parameters of the estimation pipeline.
///
/// A preset is validated once when an [`Estimator`] is created and never
/// changes afterwards. Invalid values are rejected and never clamped.
///
/// ## Example
/// ```rust
/// use heartbeat_detector::{Preset, PresetKind};
///
/// let preset = PresetKind::Smoothed.preset().with_capacity(300);
/// assert!(preset.validate().is_ok());
/// ```
///
/// [`Estimator`]: crate::Estimator
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Preset {
    /// Capacity of the sliding window (number of samples).
    pub capacity: usize,
    /// Number of samples required before an estimation is attempted.
    pub min_samples: usize,
    /// Lower bound of plausible results.
    pub min_bpm: f64,
    /// Upper bound of plausible results.
    pub max_bpm: f64,
    /// Width of the centered moving average.
    pub smooth_window: usize,
    /// Base statistic of the peak threshold.
    pub threshold_stat: ThresholdStat,
    /// Multiplier applied to the base statistic to get the peak threshold.
    pub threshold_factor: f64,
    /// Whether peaks are compared against the threshold by their absolute
    /// value instead of their signed value.
    pub absolute_compare: bool,
    /// Whether implausible inter-peak intervals are discarded.
    pub outlier_rejection: bool,
    /// Maximum deviation from the median interval (as fraction of the
    /// median) before an interval counts as outlier.
    pub outlier_factor: f64,
    /// Strategy to compute the confidence.
    pub confidence_style: ConfidenceStyle,
}

impl Preset {
    /// Default window capacity: 5 s at 30 fps or 15 s at 10 fps.
    pub const DEFAULT_CAPACITY: usize = 150;
    /// Default number of samples before estimation starts.
    pub const DEFAULT_MIN_SAMPLES: usize = 60;
    /// Default lower bound of plausible results.
    pub const DEFAULT_MIN_BPM: f64 = 45.0;
    /// Default upper bound of plausible results.
    pub const DEFAULT_MAX_BPM: f64 = 200.0;
    /// Default outlier deviation fraction.
    pub const DEFAULT_OUTLIER_FACTOR: f64 = 0.5;

    /// Checks all invariants of the preset.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.min_samples > self.capacity {
            return Err(ConfigError::MinSamplesExceedCapacity {
                min_samples: self.min_samples,
                capacity: self.capacity,
            });
        }
        if self.smooth_window == 0 {
            return Err(ConfigError::ZeroSmoothWindow);
        }
        if !self.min_bpm.is_finite()
            || !self.max_bpm.is_finite()
            || self.min_bpm <= 0.0
            || self.min_bpm >= self.max_bpm
        {
            return Err(ConfigError::InvalidBpmRange {
                min: self.min_bpm,
                max: self.max_bpm,
            });
        }
        if !self.threshold_factor.is_finite() || self.threshold_factor < 0.0 {
            return Err(ConfigError::InvalidFactor {
                name: "threshold_factor",
                value: self.threshold_factor,
            });
        }
        if !self.outlier_factor.is_finite() || self.outlier_factor <= 0.0 {
            return Err(ConfigError::InvalidFactor {
                name: "outlier_factor",
                value: self.outlier_factor,
            });
        }
        Ok(())
    }

    /// Returns a copy with a different window capacity.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Returns a copy with a different number of required samples.
    #[must_use]
    pub const fn with_min_samples(mut self, min_samples: usize) -> Self {
        self.min_samples = min_samples;
        self
    }

    /// Returns a copy with a different range of plausible results.
    #[must_use]
    pub const fn with_bpm_range(mut self, min_bpm: f64, max_bpm: f64) -> Self {
        self.min_bpm = min_bpm;
        self.max_bpm = max_bpm;
        self
    }

    /// Returns a copy with a different moving-average width.
    #[must_use]
    pub const fn with_smooth_window(mut self, smooth_window: usize) -> Self {
        self.smooth_window = smooth_window;
        self
    }

    /// The outlier factor, if outlier rejection is enabled.
    #[must_use]
    pub const fn outlier_rejection_factor(&self) -> Option<f64> {
        if self.outlier_rejection {
            Some(self.outlier_factor)
        } else {
            None
        }
    }
}

impl Default for Preset {
    fn default() -> Self {
        PresetKind::default().preset()
    }
}

/// Enum that conveniently makes all named [`Preset`]s provided by this crate
/// accessible. Each kind maps 1:1 to a concrete preset.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PresetKind {
    /// Narrow smoothing, variance-based threshold compared against the
    /// absolute value, variance-mapped confidence.
    Basic,
    /// Wide smoothing, mean-absolute threshold, variance-mapped confidence.
    Smoothed,
    /// Narrow smoothing, mean-absolute threshold, median-based outlier
    /// rejection of intervals, composite confidence.
    #[default]
    Robust,
}

impl PresetKind {
    /// All available kinds.
    pub const ALL: [Self; 3] = [Self::Basic, Self::Smoothed, Self::Robust];

    /// Returns the concrete preset for this kind.
    #[must_use]
    pub const fn preset(self) -> Preset {
        let base = Preset {
            capacity: Preset::DEFAULT_CAPACITY,
            min_samples: Preset::DEFAULT_MIN_SAMPLES,
            min_bpm: Preset::DEFAULT_MIN_BPM,
            max_bpm: Preset::DEFAULT_MAX_BPM,
            smooth_window: 5,
            threshold_stat: ThresholdStat::MeanAbs,
            threshold_factor: 0.3,
            absolute_compare: false,
            outlier_rejection: false,
            outlier_factor: Preset::DEFAULT_OUTLIER_FACTOR,
            confidence_style: ConfidenceStyle::VarianceMap,
        };
        match self {
            Self::Basic => Preset {
                threshold_stat: ThresholdStat::Variance,
                absolute_compare: true,
                ..base
            },
            Self::Smoothed => Preset {
                smooth_window: 7,
                threshold_factor: 0.45,
                ..base
            },
            Self::Robust => Preset {
                outlier_rejection: true,
                confidence_style: ConfidenceStyle::Composite,
                ..base
            },
        }
    }

    /// Returns the name of the kind, as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Smoothed => "smoothed",
            Self::Robust => "robust",
        }
    }
}

impl Display for PresetKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// The name doesn't refer to a known [`PresetKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown preset name; expected one of: basic, smoothed, robust")]
pub struct UnknownPresetError;

impl FromStr for PresetKind {
    type Err = UnknownPresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or(UnknownPresetError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;

    #[test]
    fn all_named_presets_are_valid() {
        for kind in PresetKind::ALL {
            check!(kind.preset().validate() == Ok(()), "kind={kind}");
        }
        check!(Preset::default() == PresetKind::Robust.preset());
    }

    #[test]
    fn named_preset_table() {
        let basic = PresetKind::Basic.preset();
        check!(basic.smooth_window == 5);
        check!(basic.threshold_stat == ThresholdStat::Variance);
        check!(basic.absolute_compare);
        check!(basic.outlier_rejection_factor() == None);

        let smoothed = PresetKind::Smoothed.preset();
        check!(smoothed.smooth_window == 7);
        check!(smoothed.threshold_factor == 0.45);
        check!(!smoothed.absolute_compare);

        let robust = PresetKind::Robust.preset();
        check!(robust.outlier_rejection_factor() == Some(0.5));
        check!(robust.confidence_style == ConfidenceStyle::Composite);

        for kind in PresetKind::ALL {
            let preset = kind.preset();
            check!(preset.capacity == 150);
            check!(preset.min_samples == 60);
            check!(preset.min_bpm == 45.0);
            check!(preset.max_bpm == 200.0);
        }
    }

    #[test]
    fn invalid_presets_are_rejected() {
        let preset = Preset::default();

        check!(preset.with_capacity(0).validate() == Err(ConfigError::ZeroCapacity));
        check!(
            preset.with_min_samples(151).validate()
                == Err(ConfigError::MinSamplesExceedCapacity {
                    min_samples: 151,
                    capacity: 150
                })
        );
        check!(preset.with_smooth_window(0).validate() == Err(ConfigError::ZeroSmoothWindow));
        check!(
            preset.with_bpm_range(120.0, 120.0).validate()
                == Err(ConfigError::InvalidBpmRange {
                    min: 120.0,
                    max: 120.0
                })
        );
        check!(preset.with_bpm_range(200.0, 45.0).validate().is_err());
        check!(preset.with_bpm_range(f64::NAN, 45.0).validate().is_err());
        check!(preset.with_bpm_range(0.0, 45.0).validate().is_err());

        let preset_nan_threshold = Preset {
            threshold_factor: f64::NAN,
            ..preset
        };
        check!(matches!(
            preset_nan_threshold.validate(),
            Err(ConfigError::InvalidFactor {
                name: "threshold_factor",
                ..
            })
        ));

        let preset_zero_outlier = Preset {
            outlier_factor: 0.0,
            ..preset
        };
        check!(
            preset_zero_outlier.validate()
                == Err(ConfigError::InvalidFactor {
                    name: "outlier_factor",
                    value: 0.0
                })
        );

        // the boundary is fine
        check!(preset.with_min_samples(150).validate() == Ok(()));
    }

    #[test]
    fn config_error_messages() {
        check!(ConfigError::ZeroCapacity.to_string() == "capacity must be greater than zero");
        check!(
            ConfigError::MinSamplesExceedCapacity {
                min_samples: 61,
                capacity: 60
            }
            .to_string()
                == "min_samples (61) must not exceed capacity (60)"
        );
    }

    #[test]
    fn preset_kind_from_str() {
        check!("robust".parse::<PresetKind>() == Ok(PresetKind::Robust));
        check!(" Basic ".parse::<PresetKind>() == Ok(PresetKind::Basic));
        check!("SMOOTHED".parse::<PresetKind>() == Ok(PresetKind::Smoothed));
        check!("fancy".parse::<PresetKind>() == Err(UnknownPresetError));

        for kind in PresetKind::ALL {
            check!(kind.to_string().parse::<PresetKind>() == Ok(kind));
        }
    }
}
