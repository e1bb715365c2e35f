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
//! Time sources for timestamping incoming samples.
//!
//! The estimation math only needs monotonic, relative timestamps. Where they
//! come from is abstracted by the [`Clock`] trait so that the crate stays
//! usable in `no_std` environments and in deterministic tests.

use core::cell::Cell;
use core::fmt::Debug;
use core::time::Duration;

/// A monotonic time source.
///
/// [`Clock::now`] returns the time passed since an arbitrary but fixed epoch
/// of the clock. Subsequent calls must never return a smaller value.
pub trait Clock: Debug {
    /// Returns the current monotonic timestamp.
    fn now(&self) -> Duration;
}

/// Clock backed by [`std::time::Instant`]. The epoch is the creation of the
/// clock.
#[cfg(feature = "std")]
#[derive(Copy, Clone, Debug)]
pub struct StdClock {
    epoch: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    /// Creates a new clock with its epoch set to now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            epoch: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    #[inline]
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }
}

/// Clock that only moves when it is told to. Useful if samples arrive with
/// a known, fixed rate (e.g., a camera at a stable frame rate) or for tests.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    /// Creates a new clock starting at `start`.
    #[must_use]
    pub const fn new(start: Duration) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        self.now.set(self.now.get() + delta);
    }

    /// Sets the clock to `timestamp`. Timestamps in the past are ignored to
    /// keep the clock monotonic.
    pub fn set(&self, timestamp: Duration) {
        if timestamp > self.now.get() {
            self.now.set(timestamp);
        }
    }
}

impl Clock for ManualClock {
    #[inline]
    fn now(&self) -> Duration {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now(&self) -> Duration {
        (**self).now()
    }
}
