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
//! heartbeat-detector estimates the heart rate in beats per minute (BPM)
//! from a stream of brightness samples of a light sensor placed against skin,
//! i.e., a photoplethysmography-like (PPG) signal. A typical source is the
//! average intensity of each camera frame while a finger covers the lens and
//! the flashlight. Acquiring these samples is up to you; this crate only does
//! the number crunching. It is `no_std`-compatible but needs `alloc`.
//!
//! ## Pipeline
//!
//! Every call to [`Estimator::try_estimate`] takes a snapshot of the sliding
//! window of the most recent samples and runs it through:
//!
//! ```text
//!            +---------+   +--------+   +------------+   +--------------+
//! window --> | detrend |-->| smooth |-->| find_peaks |-->| estimate_bpm |--> bpm
//!    |       +---------+   +--------+   +------------+   +--------------+
//!    |                                                                 |
//!    +------------------------> confidence::score <--------------------+
//! ```
//!
//! All tuning knobs live in an immutable [`Preset`]. [`PresetKind`] gives
//! access to a small table of named presets.
//!
//! ## Example
//! ```rust
//! use heartbeat_detector::{Estimator, Preset};
//!
//! let mut estimator = Estimator::new(Preset::default()).unwrap();
//!
//! // Regularly feed the estimator, e.g., once per camera frame.
//! estimator.process_sample(128.3);
//!
//! // And regularly ask for an estimate, e.g., once per second.
//! if let Some(result) = estimator.try_estimate() {
//!     println!("{} BPM (confidence {:.2})", result.bpm, result.confidence);
//! }
//! ```
//!
//! ## Concurrency
//!
//! The estimator is purely synchronous. All mutating operations take
//! `&mut self`, so multiple producers have to funnel their samples through a
//! single owner, for example a thread or a mutex.
//!
//! ## Logging
//!
//! This crate uses the [`log`] facade. It never installs a logger itself.

#![no_std]

extern crate alloc;

#[cfg_attr(test, macro_use)]
#[cfg(any(test, feature = "std"))]
extern crate std;

#[cfg(test)]
#[macro_use]
extern crate assert2;
#[cfg(test)]
#[macro_use]
extern crate float_cmp;

pub mod analysis;
pub mod clock;
mod estimator;
pub mod preprocessing;
mod preset;
mod sample;
pub mod stats;

#[cfg(test)]
mod test_utils;

pub use clock::{Clock, ManualClock};
#[cfg(feature = "std")]
pub use clock::StdClock;
pub use estimator::{EstimationResult, Estimator, EstimatorState};
pub use preset::{
    ConfidenceStyle, ConfigError, Preset, PresetKind, ThresholdStat, UnknownPresetError,
};
pub use sample::Sample;
