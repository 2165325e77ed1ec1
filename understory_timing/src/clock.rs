// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotonic millisecond clocks.
//!
//! [`TimeSource`] is the only way recognition code learns the current time.
//! Implementations must be monotonic: successive calls never go backwards.

use alloc::rc::Rc;
use core::cell::Cell;

/// A monotonic clock reporting milliseconds since an arbitrary reference point.
pub trait TimeSource {
    /// Returns the number of milliseconds elapsed since this clock's reference point.
    fn now_ms(&self) -> i64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now_ms(&self) -> i64 {
        (**self).now_ms()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Rc<T> {
    fn now_ms(&self) -> i64 {
        (**self).now_ms()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying time, so one handle can be given to the
/// code under test while the test keeps another to advance it.
///
/// ```rust
/// use understory_timing::{ManualClock, TimeSource};
///
/// let clock = ManualClock::new();
/// let observer = clock.clone();
///
/// clock.advance(30);
/// assert_eq!(observer.now_ms(), 30);
///
/// clock.set(100);
/// assert_eq!(observer.now_ms(), 100);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<i64>>,
}

impl ManualClock {
    /// Creates a clock reading zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clock reading `now_ms`.
    #[must_use]
    pub fn starting_at(now_ms: i64) -> Self {
        Self {
            now: Rc::new(Cell::new(now_ms)),
        }
    }

    /// Sets the current time.
    ///
    /// Setting a time earlier than the current one breaks the monotonic
    /// contract and is rejected in debug builds.
    pub fn set(&self, now_ms: i64) {
        debug_assert!(
            now_ms >= self.now.get(),
            "ManualClock must not go backwards ({} -> {now_ms})",
            self.now.get()
        );
        self.now.set(now_ms);
    }

    /// Advances the current time by `delta_ms`.
    pub fn advance(&self, delta_ms: u32) {
        self.now.set(self.now.get() + i64::from(delta_ms));
    }
}

impl TimeSource for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.get()
    }
}

/// A monotonic clock backed by [`std::time::Instant`].
///
/// The reference point is the moment the clock was created. Copies share that
/// reference point and therefore agree on the time.
#[cfg(feature = "std")]
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    reference: std::time::Instant,
}

#[cfg(feature = "std")]
impl SystemClock {
    /// Creates a clock whose reference point is now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            reference: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl TimeSource for SystemClock {
    fn now_ms(&self) -> i64 {
        i64::try_from(self.reference.elapsed().as_millis()).unwrap_or(i64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_starts_at_zero() {
        let clock = ManualClock::new();
        assert_eq!(clock.now_ms(), 0);
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::starting_at(1000);
        let other = clock.clone();

        clock.advance(25);
        assert_eq!(other.now_ms(), 1025);

        other.set(2000);
        assert_eq!(clock.now_ms(), 2000);
    }

    #[test]
    fn references_and_rc_forward_to_inner_clock() {
        let clock = ManualClock::starting_at(7);
        let by_ref: &dyn TimeSource = &clock;
        let shared: Rc<dyn TimeSource> = Rc::new(clock.clone());

        clock.advance(3);
        assert_eq!(by_ref.now_ms(), 10);
        assert_eq!(shared.now_ms(), 10);
    }

    #[cfg(feature = "std")]
    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(a >= 0);
        assert!(b >= a);
    }
}
