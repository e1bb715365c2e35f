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
//! Module for [`Sample`].

use core::cmp::Ordering;
use core::time::Duration;

/// A single brightness sample with time context.
///
/// The unit of `value` is opaque to this crate. For camera input, this is
/// typically the average intensity of the red channel of one frame.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Sample {
    /// The raw value of the sample.
    pub value: f64,
    /// Monotonic timestamp of the sample, relative to the epoch of the
    /// [`Clock`] that recorded it.
    ///
    /// [`Clock`]: crate::Clock
    pub timestamp: Duration,
}

impl Sample {
    /// Creates a new sample.
    #[must_use]
    pub const fn new(value: f64, timestamp: Duration) -> Self {
        Self { value, timestamp }
    }
}

impl PartialOrd for Sample {
    /// Samples are ordered by their timestamp first.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.timestamp.cmp(&other.timestamp) {
            Ordering::Equal => self.value.partial_cmp(&other.value),
            ordering => Some(ordering),
        }
    }
}
