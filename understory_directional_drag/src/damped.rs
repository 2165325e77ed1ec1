// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Jitter damping for touch positions.
//!
//! [`DampedPoint`] keeps a filtered copy of a raw position stream. Each axis is
//! damped independently: the filtered value stays put while the raw value is
//! within `max_delta` of it, and otherwise moves just far enough to be exactly
//! `max_delta` behind the raw value. Small back-and-forth sensor noise is
//! therefore absorbed entirely, while sustained motion is tracked with a
//! bounded lag.
//!
//! A `max_delta` of zero disables damping: the filtered value follows the raw
//! value exactly.
//!
//! ```
//! use kurbo::Point;
//! use understory_directional_drag::damped::DampedPoint;
//!
//! let mut damped = DampedPoint::new(2.0);
//! damped.reset(Point::new(0.0, 0.0));
//!
//! // Jitter inside the tolerance is absorbed.
//! damped.update(Point::new(1.5, -1.0));
//! assert_eq!(damped.value(), Point::new(0.0, 0.0));
//!
//! // Larger motion is followed, lagging by at most `max_delta`.
//! damped.update(Point::new(10.0, 0.0));
//! assert_eq!(damped.value(), Point::new(8.0, 0.0));
//! ```

use kurbo::Point;

/// A position filtered per axis with a bounded deviation from its input.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DampedPoint {
    value: Point,
    max_delta: f64,
}

impl DampedPoint {
    /// Creates a filter at the origin with the given maximum deviation.
    #[must_use]
    pub fn new(max_delta: f64) -> Self {
        Self {
            value: Point::ZERO,
            max_delta,
        }
    }

    /// Jumps straight to `pos`, discarding any accumulated lag.
    pub fn reset(&mut self, pos: Point) {
        self.value = pos;
    }

    /// Feeds a raw position and returns the new filtered position.
    pub fn update(&mut self, pos: Point) -> Point {
        self.value.x = damp(self.value.x, pos.x, self.max_delta);
        self.value.y = damp(self.value.y, pos.y, self.max_delta);
        self.value
    }

    /// Returns the current filtered position.
    #[must_use]
    pub fn value(&self) -> Point {
        self.value
    }

    /// Returns the maximum deviation.
    #[must_use]
    pub fn max_delta(&self) -> f64 {
        self.max_delta
    }

    /// Changes the maximum deviation without touching the filtered position.
    pub fn set_max_delta(&mut self, max_delta: f64) {
        self.max_delta = max_delta;
    }
}

fn damp(current: f64, target: f64, max_delta: f64) -> f64 {
    let delta = target - current;
    if delta > max_delta {
        current + (delta - max_delta)
    } else if delta < -max_delta {
        current + (delta + max_delta)
    } else {
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_max_delta_follows_input() {
        let mut damped = DampedPoint::new(0.0);
        damped.reset(Point::new(5.0, 5.0));
        assert_eq!(damped.update(Point::new(7.5, -3.0)), Point::new(7.5, -3.0));
        assert_eq!(damped.update(Point::new(7.0, -3.0)), Point::new(7.0, -3.0));
    }

    #[test]
    fn small_oscillation_is_absorbed() {
        let mut damped = DampedPoint::new(3.0);
        damped.reset(Point::new(100.0, 100.0));
        for offset in [2.0, -2.5, 1.0, -3.0, 3.0] {
            damped.update(Point::new(100.0 + offset, 100.0 - offset));
        }
        assert_eq!(damped.value(), Point::new(100.0, 100.0));
    }

    #[test]
    fn sustained_motion_lags_by_max_delta() {
        let mut damped = DampedPoint::new(4.0);
        damped.reset(Point::ZERO);
        damped.update(Point::new(10.0, 0.0));
        damped.update(Point::new(20.0, 0.0));
        assert_eq!(damped.value(), Point::new(16.0, 0.0));

        // Reversing direction only moves once the slack is used up.
        damped.update(Point::new(13.0, 0.0));
        assert_eq!(damped.value(), Point::new(16.0, 0.0));
        damped.update(Point::new(10.0, 0.0));
        assert_eq!(damped.value(), Point::new(14.0, 0.0));
    }

    #[test]
    fn axes_are_damped_independently() {
        let mut damped = DampedPoint::new(1.0);
        damped.reset(Point::ZERO);
        damped.update(Point::new(0.5, -6.0));
        assert_eq!(damped.value(), Point::new(0.0, -5.0));
    }

    #[test]
    fn set_max_delta_keeps_position() {
        let mut damped = DampedPoint::new(0.0);
        damped.reset(Point::new(3.0, 4.0));
        damped.set_max_delta(10.0);
        assert_eq!(damped.max_delta(), 10.0);
        assert_eq!(damped.value(), Point::new(3.0, 4.0));
        damped.update(Point::new(8.0, 4.0));
        assert_eq!(damped.value(), Point::new(3.0, 4.0));
    }

    #[test]
    fn reset_discards_lag() {
        let mut damped = DampedPoint::new(5.0);
        damped.reset(Point::ZERO);
        damped.update(Point::new(20.0, 0.0));
        damped.reset(Point::new(-1.0, -1.0));
        assert_eq!(damped.value(), Point::new(-1.0, -1.0));
    }
}
