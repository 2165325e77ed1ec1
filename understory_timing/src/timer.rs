// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Periodic timers pumped by the host.
//!
//! A [`Timer`] only counts timeouts; it never invokes callbacks. Whoever owns
//! the timer drains elapsed timeouts with [`Timer::take_timeouts`] and reacts
//! to each of them in order.
//!
//! Two implementations are provided:
//!
//! - [`ManualTimer`]: timeouts happen only when [`ManualTimer::fire`] is called.
//! - [`IntervalTimer`]: timeouts are derived from a [`TimeSource`] and the
//!   configured interval.

use crate::clock::TimeSource;

/// A periodic timeout source.
pub trait Timer {
    /// Returns the period in milliseconds.
    fn interval(&self) -> u32;

    /// Sets the period in milliseconds.
    ///
    /// A running timer restarts its current period.
    fn set_interval(&mut self, interval_ms: u32);

    /// Starts the timer, or restarts the current period if already running.
    ///
    /// Timeouts that were pending before the call are discarded.
    fn start(&mut self);

    /// Stops the timer and discards pending timeouts.
    fn stop(&mut self);

    /// Returns `true` while the timer is running.
    fn is_running(&self) -> bool;

    /// Returns and consumes the number of timeouts elapsed since the last call.
    ///
    /// Always returns `0` while stopped.
    fn take_timeouts(&mut self) -> u32;
}

/// A timer whose timeouts are triggered explicitly.
///
/// ```rust
/// use understory_timing::{ManualTimer, Timer};
///
/// let mut timer = ManualTimer::with_interval(60);
/// assert!(!timer.fire(), "stopped timers ignore fire()");
///
/// timer.start();
/// assert!(timer.fire());
/// assert!(timer.fire());
/// assert_eq!(timer.take_timeouts(), 2);
/// assert_eq!(timer.take_timeouts(), 0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualTimer {
    interval: u32,
    running: bool,
    pending: u32,
}

impl ManualTimer {
    /// Creates a stopped timer with a zero interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a stopped timer with the given interval.
    #[must_use]
    pub fn with_interval(interval_ms: u32) -> Self {
        Self {
            interval: interval_ms,
            ..Self::default()
        }
    }

    /// Queues one timeout if the timer is running.
    ///
    /// Returns `true` if a timeout was queued.
    pub fn fire(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.pending = self.pending.saturating_add(1);
        true
    }
}

impl Timer for ManualTimer {
    fn interval(&self) -> u32 {
        self.interval
    }

    fn set_interval(&mut self, interval_ms: u32) {
        self.interval = interval_ms;
    }

    fn start(&mut self) {
        self.running = true;
        self.pending = 0;
    }

    fn stop(&mut self) {
        self.running = false;
        self.pending = 0;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn take_timeouts(&mut self) -> u32 {
        core::mem::take(&mut self.pending)
    }
}

/// A timer that derives its timeouts from elapsed clock time.
///
/// Each call to [`Timer::take_timeouts`] reports how many whole intervals have
/// passed since the timer was started or since the last reported timeout. A
/// zero interval never times out.
#[derive(Clone, Debug)]
pub struct IntervalTimer<C> {
    clock: C,
    interval: u32,
    /// Start of the current period, `None` while stopped.
    anchor: Option<i64>,
}

impl<C: TimeSource> IntervalTimer<C> {
    /// Creates a stopped timer reading time from `clock`.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            interval: 0,
            anchor: None,
        }
    }

    /// Returns the clock driving this timer.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Replaces the clock. A running timer restarts its current period.
    pub fn set_clock(&mut self, clock: C) {
        self.clock = clock;
        if self.anchor.is_some() {
            self.anchor = Some(self.clock.now_ms());
        }
    }
}

impl<C: TimeSource> Timer for IntervalTimer<C> {
    fn interval(&self) -> u32 {
        self.interval
    }

    fn set_interval(&mut self, interval_ms: u32) {
        self.interval = interval_ms;
        if self.anchor.is_some() {
            self.anchor = Some(self.clock.now_ms());
        }
    }

    fn start(&mut self) {
        self.anchor = Some(self.clock.now_ms());
    }

    fn stop(&mut self) {
        self.anchor = None;
    }

    fn is_running(&self) -> bool {
        self.anchor.is_some()
    }

    fn take_timeouts(&mut self) -> u32 {
        let Some(anchor) = self.anchor else {
            return 0;
        };
        if self.interval == 0 {
            return 0;
        }
        let interval = i64::from(self.interval);
        let elapsed = self.clock.now_ms() - anchor;
        if elapsed < interval {
            return 0;
        }
        let periods = elapsed / interval;
        self.anchor = Some(anchor + periods * interval);
        u32::try_from(periods).unwrap_or(u32::MAX)
    }
}
