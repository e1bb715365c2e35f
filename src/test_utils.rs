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
//! Synthetic PPG-like signals for tests.
//!
//! A finger on a camera lens yields an average brightness with a large DC
//! offset and a small pulsatile component. We model it as a sine wave on top
//! of a baseline plus uniform noise. The noise is generated from a fixed seed
//! so that all tests are deterministic.

use crate::Sample;
use core::f64::consts::PI;
use core::time::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::vec::Vec;

/// Typical average brightness of a camera frame (8-bit channel).
pub const BASELINE: f64 = 128.0;
/// Typical amplitude of the pulse wave.
pub const AMPLITUDE: f64 = 15.0;

const SEED: u64 = 0x5EED_B0B;

/// Returns `n` samples of a pulse with `bpm` beats per minute, sampled at
/// `sample_rate_hz`, with uniform noise in `-noise..=noise`. Timestamps start
/// at zero.
pub fn synthetic_pulse(bpm: f64, sample_rate_hz: f64, n: usize, noise: f64) -> Vec<Sample> {
    synthetic_pulse_with_amplitude(bpm, sample_rate_hz, n, noise, AMPLITUDE)
}

/// Like [`synthetic_pulse`] but with a custom amplitude.
pub fn synthetic_pulse_with_amplitude(
    bpm: f64,
    sample_rate_hz: f64,
    n: usize,
    noise: f64,
    amplitude: f64,
) -> Vec<Sample> {
    let mut rng = StdRng::seed_from_u64(SEED);
    let beat_hz = bpm / 60.0;
    (0..n)
        .map(|i| {
            let t = i as f64 / sample_rate_hz;
            let value = BASELINE
                + amplitude * libm::sin(2.0 * PI * beat_hz * t)
                + rng.random_range(-noise..=noise);
            Sample::new(value, Duration::from_secs_f64(t))
        })
        .collect()
}

/// Returns `n` samples with the same value, sampled at `sample_rate_hz`.
pub fn constant(value: f64, sample_rate_hz: f64, n: usize) -> Vec<Sample> {
    (0..n)
        .map(|i| Sample::new(value, Duration::from_secs_f64(i as f64 / sample_rate_hz)))
        .collect()
}

#[test]
fn synthetic_pulse_is_deterministic_and_bounded() {
    let a = synthetic_pulse(75.0, 10.0, 150, 0.5);
    let b = synthetic_pulse(75.0, 10.0, 150, 0.5);
    assert_eq!(a, b);
    assert_eq!(a.len(), 150);
    assert_eq!(a[149].timestamp, Duration::from_secs_f64(14.9));
    assert!(a
        .iter()
        .all(|s| (BASELINE - AMPLITUDE - 0.5..=BASELINE + AMPLITUDE + 0.5).contains(&s.value)));
}
