// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Speed estimation along a single axis.
//!
//! [`AxisVelocityCalculator`] records `(time, position)` samples in a
//! fixed-capacity ring buffer and estimates the current speed as the
//! displacement over elapsed time across the recent samples. Samples older
//! than [`AGE_OLDEST_SAMPLE`] milliseconds relative to the newest one are
//! ignored, so a gesture that slowed down is not credited with its earlier
//! pace.
//!
//! Timestamps come from the injected [`TimeSource`].
//!
//! ```
//! use understory_directional_drag::velocity::{AxisVelocityCalculator, MIN_SAMPLES_NEEDED};
//! use understory_timing::ManualClock;
//!
//! let clock = ManualClock::new();
//! let mut velocity = AxisVelocityCalculator::new(clock.clone());
//!
//! for pos in [0.0, 10.0, 20.0] {
//!     velocity.set_tracked_position(pos);
//!     clock.advance(10);
//! }
//! assert!(velocity.num_samples() >= MIN_SAMPLES_NEEDED);
//! // 20 units over 20 ms.
//! assert_eq!(velocity.calculate(), 1.0);
//! ```

use understory_timing::TimeSource;

/// Capacity of the sample window.
pub const MAX_SAMPLES: usize = 50;

/// Number of samples [`AxisVelocityCalculator::calculate`] needs before it
/// produces a meaningful value.
pub const MIN_SAMPLES_NEEDED: usize = 3;

/// Samples older than this many milliseconds, relative to the newest sample,
/// do not contribute to the estimate.
pub const AGE_OLDEST_SAMPLE: i64 = 100;

#[derive(Copy, Clone, Debug, Default)]
struct Sample {
    time: i64,
    pos: f64,
}

/// Bounded window of axis positions with a speed estimate.
#[derive(Clone, Debug)]
pub struct AxisVelocityCalculator<C> {
    time_source: C,
    samples: [Sample; MAX_SAMPLES],
    /// Index of the oldest retained sample.
    head: usize,
    len: usize,
    /// Samples recorded since the last reset, including evicted ones.
    received: u64,
}

impl<C: TimeSource> AxisVelocityCalculator<C> {
    /// Creates an empty calculator stamping samples with `time_source`.
    #[must_use]
    pub fn new(time_source: C) -> Self {
        Self {
            time_source,
            samples: [Sample::default(); MAX_SAMPLES],
            head: 0,
            len: 0,
            received: 0,
        }
    }

    /// Records `pos` at the current time, evicting the oldest sample when full.
    pub fn set_tracked_position(&mut self, pos: f64) {
        let sample = Sample {
            time: self.time_source.now_ms(),
            pos,
        };
        if self.len < MAX_SAMPLES {
            self.samples[(self.head + self.len) % MAX_SAMPLES] = sample;
            self.len += 1;
        } else {
            self.samples[self.head] = sample;
            self.head = (self.head + 1) % MAX_SAMPLES;
        }
        self.received += 1;
    }

    /// Discards every sample.
    pub fn reset(&mut self) {
        self.head = 0;
        self.len = 0;
        self.received = 0;
    }

    /// Returns the number of samples currently retained.
    #[must_use]
    pub fn num_samples(&self) -> usize {
        self.len
    }

    /// Returns how many samples were recorded since the last reset.
    ///
    /// Unlike [`num_samples`](Self::num_samples) this keeps counting once the
    /// window is full, so it tells whether anything arrived between two reads.
    #[must_use]
    pub fn received(&self) -> u64 {
        self.received
    }

    /// Estimates the speed in position units per millisecond.
    ///
    /// The sign follows the axis: positive when positions grow. Returns `0.0`
    /// with fewer than [`MIN_SAMPLES_NEEDED`] samples or when the considered
    /// samples share a timestamp.
    #[must_use]
    pub fn calculate(&self) -> f64 {
        if self.len < MIN_SAMPLES_NEEDED {
            return 0.0;
        }
        let newest = self.sample(self.len - 1);
        let Some(oldest) = (0..self.len)
            .map(|i| self.sample(i))
            .find(|s| newest.time - s.time <= AGE_OLDEST_SAMPLE)
        else {
            return 0.0;
        };
        let elapsed = newest.time - oldest.time;
        if elapsed <= 0 {
            return 0.0;
        }
        (newest.pos - oldest.pos) / elapsed as f64
    }

    /// Returns the clock used to stamp samples.
    pub fn time_source(&self) -> &C {
        &self.time_source
    }

    /// Replaces the clock used to stamp future samples.
    pub fn set_time_source(&mut self, time_source: C) {
        self.time_source = time_source;
    }

    /// Returns the `i`-th retained sample, oldest first.
    fn sample(&self, i: usize) -> Sample {
        self.samples[(self.head + i) % MAX_SAMPLES]
    }
}
