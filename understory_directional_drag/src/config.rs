// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recognition tolerances, bundled for hosts that configure an area in one go.

use crate::direction::Direction;

/// Default longest stretch without new samples before an undecided gesture is dropped, in ms.
pub const DEFAULT_MAX_SILENCE_TIME: u32 = 200;

/// Default composition window, in ms.
pub const DEFAULT_COMPOSITION_TIME: u32 = 60;

/// Default period of the recognition timer, in ms.
pub const DEFAULT_RECOGNITION_INTERVAL: u32 = 60;

/// Tolerances applied by [`DirectionalDragArea`](crate::area::DirectionalDragArea).
///
/// Changing a setting only affects evaluation from then on; it never
/// re-judges samples that were already processed.
///
/// ```
/// use understory_directional_drag::{Direction, DragAreaConfig};
///
/// let config = DragAreaConfig::default()
///     .with_direction(Direction::Up)
///     .with_widening_angle(20.0)
///     .with_distance_threshold(12.0);
/// assert_eq!(config.direction, Direction::Up);
/// assert_eq!(config.composition_time, 60);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragAreaConfig {
    /// Direction the drag must follow.
    pub direction: Direction,
    /// Per-axis jitter tolerance of the position damping, in scene units.
    pub max_deviation: f64,
    /// Half-angle of the acceptance cone around `direction`, in degrees.
    pub widening_angle: f64,
    /// Distance along the primary axis to cover before recognition; `0` recognizes
    /// as soon as the composition window closes.
    pub distance_threshold: f64,
    /// Slowest accepted speed, in scene units per second.
    pub min_speed: f64,
    /// Longest stretch without new samples while undecided, in ms.
    pub max_silence_time: u32,
    /// Window after a press during which another press means a multi-finger gesture, in ms.
    pub composition_time: u32,
    /// Period of the recognition timer, in ms.
    pub recognition_interval: u32,
}

impl Default for DragAreaConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Right,
            max_deviation: 0.0,
            widening_angle: 0.0,
            distance_threshold: 0.0,
            min_speed: 0.0,
            max_silence_time: DEFAULT_MAX_SILENCE_TIME,
            composition_time: DEFAULT_COMPOSITION_TIME,
            recognition_interval: DEFAULT_RECOGNITION_INTERVAL,
        }
    }
}

impl DragAreaConfig {
    /// Sets [`direction`](Self::direction).
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Sets [`max_deviation`](Self::max_deviation).
    #[must_use]
    pub fn with_max_deviation(mut self, max_deviation: f64) -> Self {
        self.max_deviation = max_deviation;
        self
    }

    /// Sets [`widening_angle`](Self::widening_angle).
    #[must_use]
    pub fn with_widening_angle(mut self, degrees: f64) -> Self {
        self.widening_angle = degrees;
        self
    }

    /// Sets [`distance_threshold`](Self::distance_threshold).
    #[must_use]
    pub fn with_distance_threshold(mut self, distance: f64) -> Self {
        self.distance_threshold = distance;
        self
    }

    /// Sets [`min_speed`](Self::min_speed).
    #[must_use]
    pub fn with_min_speed(mut self, units_per_second: f64) -> Self {
        self.min_speed = units_per_second;
        self
    }

    /// Sets [`max_silence_time`](Self::max_silence_time).
    #[must_use]
    pub fn with_max_silence_time(mut self, ms: u32) -> Self {
        self.max_silence_time = ms;
        self
    }

    /// Sets [`composition_time`](Self::composition_time).
    #[must_use]
    pub fn with_composition_time(mut self, ms: u32) -> Self {
        self.composition_time = ms;
        self
    }

    /// Sets [`recognition_interval`](Self::recognition_interval).
    #[must_use]
    pub fn with_recognition_interval(mut self, ms: u32) -> Self {
        self.recognition_interval = ms;
        self
    }
}
