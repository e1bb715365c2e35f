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
//! Helpers for sample history bookkeeping.
//!
//! We need to get new samples as we go but keep the most recent ones for
//! analysis. See [`SlidingWindow`].

use crate::Sample;
use alloc::vec::Vec;
use ringbuffer::{AllocRingBuffer, RingBuffer};

/// Fixed-capacity, timestamped sample buffer with FIFO eviction.
///
/// Once the window is full, every new sample evicts the oldest one. The
/// capacity is fixed at construction.
#[derive(Debug)]
pub struct SlidingWindow {
    buffer: AllocRingBuffer<Sample>,
    total_pushed: usize,
}

impl SlidingWindow {
    /// Creates a new empty window.
    ///
    /// # Panics
    /// Panics if `capacity` is zero. [`Preset::validate`] rejects such
    /// configurations before a window is created.
    ///
    /// [`Preset::validate`]: crate::Preset::validate
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be greater than zero");
        Self {
            buffer: AllocRingBuffer::new(capacity),
            total_pushed: 0,
        }
    }

    /// Appends a sample. If the window is full, the oldest sample is evicted
    /// first.
    #[inline]
    pub fn push(&mut self, sample: Sample) {
        self.buffer.push(sample);
        self.total_pushed += 1;
    }

    /// Returns the current content, oldest to newest, without modifying the
    /// window.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Sample> {
        self.buffer.iter().copied().collect()
    }

    /// Returns the values of the current content, oldest to newest.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.buffer.iter().map(|sample| sample.value).collect()
    }

    /// Iterates the current content, oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Sample> + '_ {
        self.buffer.iter()
    }

    /// The oldest sample.
    #[must_use]
    pub fn first(&self) -> Option<&Sample> {
        self.buffer.front()
    }

    /// The newest sample.
    #[must_use]
    pub fn last(&self) -> Option<&Sample> {
        self.buffer.back()
    }

    /// Removes all samples and clears the bookkeeping.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.total_pushed = 0;
    }

    /// Number of samples currently in the window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the window holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Whether the next push evicts a sample.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.buffer.is_full()
    }

    /// The fixed capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Total number of samples pushed since creation or the last reset.
    #[must_use]
    pub const fn total_pushed(&self) -> usize {
        self.total_pushed
    }

    /// Returns the amount of evicted samples, i.e., samples that are not in
    /// the underlying ringbuffer anymore.
    #[must_use]
    pub fn evicted(&self) -> usize {
        self.total_pushed.saturating_sub(self.capacity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::time::Duration;
    use itertools::Itertools;

    fn sample(i: usize) -> Sample {
        Sample::new(i as f64, Duration::from_millis(i as u64 * 100))
    }

    #[test]
    fn push_and_snapshot() {
        let mut window = SlidingWindow::new(4);
        check!(window.is_empty());
        check!(window.snapshot().is_empty());
        check!(window.first() == None);

        window.push(sample(0));
        window.push(sample(1));
        check!(window.len() == 2);
        check!(window.values() == [0.0, 1.0]);
        check!(window.first() == Some(&sample(0)));
        check!(window.last() == Some(&sample(1)));

        // snapshot doesn't mutate
        let _ = window.snapshot();
        check!(window.len() == 2);
    }

    #[test]
    fn eviction_keeps_the_most_recent_samples() {
        const CAPACITY: usize = 150;

        for k in [0, 1, 7, CAPACITY, 3 * CAPACITY + 11] {
            let mut window = SlidingWindow::new(CAPACITY);
            let input = (0..CAPACITY + k).map(sample).collect::<std::vec::Vec<_>>();
            input.iter().copied().for_each(|s| window.push(s));

            let snapshot = window.snapshot();
            check!(snapshot.len() == CAPACITY, "k={k}");
            check!(snapshot[..] == input[k..], "k={k}");
            check!(window.evicted() == k);
            check!(window.total_pushed() == CAPACITY + k);
            check!(window.is_full());

            // oldest to newest
            check!(snapshot
                .iter()
                .tuple_windows()
                .all(|(a, b)| a.timestamp < b.timestamp));
        }
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut window = SlidingWindow::new(3);
        for i in 0..10 {
            window.push(sample(i));
            check!(window.len() == (i + 1).min(3));
            check!(window.capacity() == 3);
        }
        check!(window.values() == [7.0, 8.0, 9.0]);
    }

    #[test]
    fn reset_empties_the_window() {
        let mut window = SlidingWindow::new(3);
        (0..5).map(sample).for_each(|s| window.push(s));
        window.reset();

        check!(window.is_empty());
        check!(window.total_pushed() == 0);
        check!(window.evicted() == 0);
        check!(window.capacity() == 3);

        window.push(sample(42));
        check!(window.values() == [42.0]);
    }

    #[test]
    #[should_panic]
    fn zero_capacity_panics() {
        let _ = SlidingWindow::new(0);
    }
}
