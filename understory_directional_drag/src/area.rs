// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Directional drag recognition: the gesture state machine.
//!
//! A [`DirectionalDragArea`] watches touch batches and decides whether a single
//! finger is performing a swipe along its configured [`Direction`].
//!
//! ## States
//!
//! - [`Status::WaitingForTouch`]: no candidate. A batch with exactly one press,
//!   arriving while no other touch is inside its composition window, adopts
//!   that press as the candidate and moves to `Undecided`.
//! - [`Status::Undecided`]: every sample of the candidate must stay inside the
//!   acceptance cone and keep moving along the direction. Once the composition
//!   window has closed and the distance threshold is exceeded, the gesture is
//!   `Recognized`. Releasing, a second press inside the composition window, a
//!   timer tick observing too low a speed or too long a silence all reset to
//!   `WaitingForTouch`.
//! - [`Status::Recognized`]: the candidate is tracked until it is released.
//!
//! ## Driving the area
//!
//! The host feeds every input frame to [`touch_event`](DirectionalDragArea::touch_event)
//! and pumps the recognition timer with
//! [`poll_timer`](DirectionalDragArea::poll_timer) (or calls
//! [`timer_tick`](DirectionalDragArea::timer_tick) once per timeout it
//! observed itself). Observable changes are queued and drained with
//! [`take_events`](DirectionalDragArea::take_events).
//!
//! ```
//! use kurbo::Point;
//! use understory_directional_drag::{
//!     DirectionalDragArea, DragAreaConfig, Status, TouchBatch, TouchId, TouchPhase, TouchPoint,
//! };
//! use understory_timing::{ManualClock, ManualTimer};
//!
//! let clock = ManualClock::new();
//! let mut area = DirectionalDragArea::new(clock.clone(), ManualTimer::new())
//!     .with_config(DragAreaConfig::default().with_distance_threshold(10.0).with_composition_time(20));
//!
//! let press = TouchPoint::new(TouchId(1), Point::new(0.0, 0.0), TouchPhase::Pressed);
//! area.touch_event(&TouchBatch::new().with_point(press)).unwrap();
//! assert_eq!(area.status(), Status::Undecided);
//!
//! clock.advance(30);
//! let moved = TouchPoint::new(TouchId(1), Point::new(15.0, 0.0), TouchPhase::Moved);
//! area.touch_event(&TouchBatch::new().with_point(moved)).unwrap();
//! assert_eq!(area.status(), Status::Recognized);
//! assert_eq!(area.distance(), 15.0);
//! ```

use alloc::vec::Vec;
use core::fmt;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `tan`
use kurbo::Point;
use understory_timing::{TimeSource, Timer};

use crate::active_touches::{ActiveTouches, UnknownTouchError};
use crate::config::{DEFAULT_RECOGNITION_INTERVAL, DragAreaConfig};
use crate::damped::DampedPoint;
use crate::direction::Direction;
use crate::event::DragEvent;
use crate::touch::{TouchBatch, TouchId, TouchPhase, TouchPhases, TouchPoint};
use crate::velocity::{AxisVelocityCalculator, MIN_SAMPLES_NEEDED};

/// Recognition status of a [`DirectionalDragArea`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Status {
    /// No touch is being evaluated.
    #[default]
    WaitingForTouch,
    /// A candidate touch is being evaluated.
    Undecided,
    /// The candidate touch was recognized as a directional drag.
    Recognized,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::WaitingForTouch => "WaitingForTouch",
            Self::Undecided => "Undecided",
            Self::Recognized => "Recognized",
        })
    }
}

/// Recognizes single-finger drags along one direction.
///
/// `C` is the clock used to stamp samples and presses, `T` the recognition
/// timer. The clock is cloned into the velocity calculator and the active
/// touch registry, so it should be a cheap shared handle.
#[derive(Debug)]
pub struct DirectionalDragArea<C, T> {
    status: Status,
    enabled: bool,
    touch_id: Option<TouchId>,

    direction: Direction,
    widening_angle: f64,
    widening_factor: f64,
    distance_threshold: f64,
    min_speed: f64,
    max_silence_time: u32,
    composition_time: u32,

    silence_time: u32,
    samples_on_last_speed_check: u64,

    start_pos: Point,
    start_scene_pos: Point,
    previous_pos: Point,
    previous_scene_pos: Point,
    distance: f64,
    scene_distance: f64,
    damped_scene_pos: DampedPoint,
    previous_damped_scene_pos: Point,

    time_source: C,
    velocity: AxisVelocityCalculator<C>,
    active_touches: ActiveTouches<C>,
    timer: T,

    events: Vec<DragEvent>,
}

impl<C: TimeSource + Clone, T: Timer> DirectionalDragArea<C, T> {
    /// Creates an enabled area with the default configuration.
    ///
    /// The timer's interval is set to the default recognition interval and
    /// the timer is stopped.
    #[must_use]
    pub fn new(time_source: C, mut timer: T) -> Self {
        timer.stop();
        timer.set_interval(DEFAULT_RECOGNITION_INTERVAL);
        let defaults = DragAreaConfig::default();
        Self {
            status: Status::WaitingForTouch,
            enabled: true,
            touch_id: None,
            direction: defaults.direction,
            widening_angle: defaults.widening_angle,
            widening_factor: widening_factor(defaults.widening_angle),
            distance_threshold: defaults.distance_threshold,
            min_speed: defaults.min_speed,
            max_silence_time: defaults.max_silence_time,
            composition_time: defaults.composition_time,
            silence_time: 0,
            samples_on_last_speed_check: 0,
            start_pos: Point::ZERO,
            start_scene_pos: Point::ZERO,
            previous_pos: Point::ZERO,
            previous_scene_pos: Point::ZERO,
            distance: 0.0,
            scene_distance: 0.0,
            damped_scene_pos: DampedPoint::new(defaults.max_deviation),
            previous_damped_scene_pos: Point::ZERO,
            velocity: AxisVelocityCalculator::new(time_source.clone()),
            active_touches: ActiveTouches::new(time_source.clone()),
            time_source,
            timer,
            events: Vec::new(),
        }
    }

    /// Builder-style [`apply_config`](Self::apply_config).
    #[must_use]
    pub fn with_config(mut self, config: DragAreaConfig) -> Self {
        self.apply_config(&config);
        self
    }

    /// Applies every setting in `config` through the individual setters.
    ///
    /// Only settings that differ from the current ones produce events.
    pub fn apply_config(&mut self, config: &DragAreaConfig) {
        self.set_direction(config.direction);
        self.set_max_deviation(config.max_deviation);
        self.set_widening_angle(config.widening_angle);
        self.set_distance_threshold(config.distance_threshold);
        self.set_min_speed(config.min_speed);
        self.set_max_silence_time(config.max_silence_time);
        self.set_composition_time(config.composition_time);
        self.set_recognition_interval(config.recognition_interval);
    }

    /// Returns the current settings.
    #[must_use]
    pub fn config(&self) -> DragAreaConfig {
        DragAreaConfig {
            direction: self.direction,
            max_deviation: self.damped_scene_pos.max_delta(),
            widening_angle: self.widening_angle,
            distance_threshold: self.distance_threshold,
            min_speed: self.min_speed,
            max_silence_time: self.max_silence_time,
            composition_time: self.composition_time,
            recognition_interval: self.timer.interval(),
        }
    }

    // --- Configuration ---

    /// Returns the direction a drag must follow.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Sets the direction a drag must follow.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.direction == direction {
            return;
        }
        self.direction = direction;
        self.emit(DragEvent::DirectionChanged(direction));
        self.update_distances();
    }

    /// Returns the per-axis damping tolerance.
    #[must_use]
    pub fn max_deviation(&self) -> f64 {
        self.damped_scene_pos.max_delta()
    }

    /// Sets the per-axis damping tolerance, keeping the current damped position.
    pub fn set_max_deviation(&mut self, value: f64) {
        if self.damped_scene_pos.max_delta() == value {
            return;
        }
        self.damped_scene_pos.set_max_delta(value);
        self.emit(DragEvent::MaxDeviationChanged(value));
    }

    /// Returns the half-angle of the acceptance cone, in degrees.
    #[must_use]
    pub fn widening_angle(&self) -> f64 {
        self.widening_angle
    }

    /// Returns `tan(widening_angle)`, the tolerated off-axis slope.
    #[must_use]
    pub fn widening_factor(&self) -> f64 {
        self.widening_factor
    }

    /// Sets the half-angle of the acceptance cone, in degrees.
    ///
    /// Zero demands perfectly axis-aligned movement.
    pub fn set_widening_angle(&mut self, degrees: f64) {
        if self.widening_angle == degrees {
            return;
        }
        self.widening_angle = degrees;
        self.widening_factor = widening_factor(degrees);
        self.emit(DragEvent::WideningAngleChanged(degrees));
    }

    /// Returns the distance to cover before recognition.
    #[must_use]
    pub fn distance_threshold(&self) -> f64 {
        self.distance_threshold
    }

    /// Sets the distance to cover before recognition.
    pub fn set_distance_threshold(&mut self, value: f64) {
        if self.distance_threshold == value {
            return;
        }
        self.distance_threshold = value;
        self.emit(DragEvent::DistanceThresholdChanged(value));
    }

    /// Returns the slowest accepted speed, in units per second.
    #[must_use]
    pub fn min_speed(&self) -> f64 {
        self.min_speed
    }

    /// Sets the slowest accepted speed, in units per second.
    pub fn set_min_speed(&mut self, value: f64) {
        if self.min_speed == value {
            return;
        }
        self.min_speed = value;
        self.emit(DragEvent::MinSpeedChanged(value));
    }

    /// Returns the longest stretch without new samples while undecided, in ms.
    #[must_use]
    pub fn max_silence_time(&self) -> u32 {
        self.max_silence_time
    }

    /// Sets the longest stretch without new samples while undecided, in ms.
    pub fn set_max_silence_time(&mut self, ms: u32) {
        if self.max_silence_time == ms {
            return;
        }
        self.max_silence_time = ms;
        self.emit(DragEvent::MaxSilenceTimeChanged(ms));
    }

    /// Returns the composition window, in ms.
    #[must_use]
    pub fn composition_time(&self) -> u32 {
        self.composition_time
    }

    /// Sets the composition window, in ms.
    pub fn set_composition_time(&mut self, ms: u32) {
        if self.composition_time == ms {
            return;
        }
        self.composition_time = ms;
        self.emit(DragEvent::CompositionTimeChanged(ms));
    }

    /// Returns the recognition timer period, in ms.
    #[must_use]
    pub fn recognition_interval(&self) -> u32 {
        self.timer.interval()
    }

    /// Sets the recognition timer period, in ms.
    pub fn set_recognition_interval(&mut self, ms: u32) {
        if self.timer.interval() == ms {
            return;
        }
        self.timer.set_interval(ms);
        self.emit(DragEvent::TimerIntervalChanged(ms));
    }

    /// Returns `true` if touch batches are processed.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables processing of touch batches.
    ///
    /// A disabled area ignores batches entirely, including the bookkeeping of
    /// active touches. The current status is left as is.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        self.emit(DragEvent::EnabledChanged(enabled));
    }

    /// Returns the recognition timer.
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Returns the recognition timer mutably, for hosts and tests that drive it.
    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    /// Replaces the recognition timer and returns the previous one, stopped.
    ///
    /// The new timer takes over the previous interval, and is started if the
    /// previous one was running.
    pub fn set_recognition_timer(&mut self, mut timer: T) -> T {
        let interval = self.timer.interval();
        let was_running = self.timer.is_running();
        self.timer.stop();
        timer.set_interval(interval);
        if was_running {
            timer.start();
        }
        core::mem::replace(&mut self.timer, timer)
    }

    /// Returns the clock.
    pub fn time_source(&self) -> &C {
        &self.time_source
    }

    /// Replaces the clock used to stamp samples and presses.
    ///
    /// The recognition timer is left alone: a clock-driven timer such as
    /// [`IntervalTimer`](understory_timing::IntervalTimer) keeps reading its
    /// own clock until it is given a new one with
    /// [`IntervalTimer::set_clock`](understory_timing::IntervalTimer::set_clock)
    /// through [`timer_mut`](Self::timer_mut).
    pub fn set_time_source(&mut self, time_source: C) {
        self.velocity.set_time_source(time_source.clone());
        self.active_touches.set_time_source(time_source.clone());
        self.time_source = time_source;
    }

    // --- Read-outs ---

    /// Returns the recognition status.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns `true` while a candidate is undecided or recognized.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.status != Status::WaitingForTouch
    }

    /// Returns the identifier of the touch being evaluated, if any.
    #[must_use]
    pub fn touch_id(&self) -> Option<TouchId> {
        self.touch_id
    }

    /// Returns the signed local distance from the start along the primary axis.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Returns the signed scene distance from the start along the primary axis.
    #[must_use]
    pub fn scene_distance(&self) -> f64 {
        self.scene_distance
    }

    /// Returns the local X of the last processed sample of the candidate.
    #[must_use]
    pub fn touch_x(&self) -> f64 {
        self.previous_pos.x
    }

    /// Returns the local Y of the last processed sample of the candidate.
    #[must_use]
    pub fn touch_y(&self) -> f64 {
        self.previous_pos.y
    }

    /// Returns the scene X of the last processed sample of the candidate.
    #[must_use]
    pub fn touch_scene_x(&self) -> f64 {
        self.previous_scene_pos.x
    }

    /// Returns the scene Y of the last processed sample of the candidate.
    #[must_use]
    pub fn touch_scene_y(&self) -> f64 {
        self.previous_scene_pos.y
    }

    /// Returns the damped scene position used by the geometric tests.
    #[must_use]
    pub fn damped_scene_pos(&self) -> Point {
        self.damped_scene_pos.value()
    }

    /// Returns the registry of touches currently down.
    pub fn active_touches(&self) -> &ActiveTouches<C> {
        &self.active_touches
    }

    /// Returns the velocity calculator tracking the candidate.
    pub fn velocity(&self) -> &AxisVelocityCalculator<C> {
        &self.velocity
    }

    /// Drains the queued change notifications, oldest first.
    pub fn take_events(&mut self) -> Vec<DragEvent> {
        core::mem::take(&mut self.events)
    }

    /// Returns the queued change notifications without draining them.
    #[must_use]
    pub fn pending_events(&self) -> &[DragEvent] {
        &self.events
    }

    // --- Input ---

    /// Processes one batch of touch points.
    ///
    /// The state machine acts on the batch first; the registry of active
    /// touches is updated afterwards, so composition-window checks made while
    /// handling a batch do not yet count that batch's presses.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownTouchError`] if the batch releases a touch that was
    /// never pressed. This means the host broke the press/release contract;
    /// the state machine has still processed the batch, but the registry of
    /// active touches can no longer be trusted.
    pub fn touch_event(&mut self, batch: &TouchBatch) -> Result<(), UnknownTouchError> {
        let now = self.time_source.now_ms();
        log::trace!("DirectionalDragArea: {now} {batch:?}");

        if !self.enabled {
            return Ok(());
        }

        match self.status {
            Status::WaitingForTouch => self.touch_event_absent(batch),
            Status::Undecided => self.touch_event_undecided(batch),
            Status::Recognized => self.touch_event_recognized(batch),
        }

        self.active_touches.update(batch)
    }

    /// Re-evaluates speed and silence once, as if the timer timed out.
    ///
    /// Has no effect unless the status is [`Status::Undecided`] and the
    /// timer is running.
    pub fn timer_tick(&mut self) {
        if self.status == Status::Undecided && self.timer.is_running() {
            self.check_speed();
        }
    }

    /// Drains the timer's elapsed timeouts and handles each of them.
    ///
    /// Stops early if a timeout ends the undecided phase.
    pub fn poll_timer(&mut self) {
        let timeouts = self.timer.take_timeouts();
        for _ in 0..timeouts {
            if self.status != Status::Undecided {
                break;
            }
            self.check_speed();
        }
    }

    fn touch_event_absent(&mut self, batch: &TouchBatch) {
        if !batch.phases().contains(TouchPhases::PRESSED) {
            return;
        }

        if self.is_within_composition_window() {
            // Too close to the last press to be told apart from it.
            log::debug!(
                "DirectionalDragArea: new touch within composition window of another, ignoring it"
            );
            return;
        }

        let mut pressed = batch.pressed();
        let (Some(&candidate), None) = (pressed.next(), pressed.next()) else {
            log::debug!("DirectionalDragArea: more than one touch started in one batch");
            return;
        };

        self.touch_id = Some(candidate.id);
        self.start_pos = candidate.pos;
        self.start_scene_pos = candidate.scene_pos;
        self.damped_scene_pos.reset(candidate.scene_pos);
        self.previous_damped_scene_pos = candidate.scene_pos;
        self.velocity.reset();
        self.samples_on_last_speed_check = 0;
        self.silence_time = 0;
        self.set_previous_positions(candidate.pos, candidate.scene_pos);

        self.set_status(Status::Undecided);
    }

    fn touch_event_undecided(&mut self, batch: &TouchBatch) {
        let Some(point) = self.candidate_point(batch) else {
            self.set_status(Status::WaitingForTouch);
            return;
        };

        if point.phase == TouchPhase::Released {
            log::debug!("DirectionalDragArea: touch ended before recognition concluded");
            self.set_status(Status::WaitingForTouch);
            return;
        }

        if batch.phases().contains(TouchPhases::PRESSED) && self.is_within_composition_window() {
            log::debug!("DirectionalDragArea: multi-finger drags are not accepted");
            self.set_status(Status::WaitingForTouch);
            return;
        }

        self.previous_damped_scene_pos = self.damped_scene_pos.value();
        self.damped_scene_pos.update(point.scene_pos);
        let axis_pos = self.direction.axis_value(point.scene_pos);
        self.velocity.set_tracked_position(axis_pos);

        if !self.point_inside_allowed_area() {
            log::debug!("DirectionalDragArea: touch point left the allowed area");
            self.set_status(Status::WaitingForTouch);
            return;
        }

        if !self.moving_in_right_direction() {
            log::debug!("DirectionalDragArea: touch point moved in the wrong direction");
            self.set_status(Status::WaitingForTouch);
            return;
        }

        self.set_previous_positions(point.pos, point.scene_pos);

        if self.is_within_composition_window() {
            // Another press could still show up and turn this into a multi-finger gesture.
            log::debug!("DirectionalDragArea: still within composition window, waiting");
            return;
        }

        if self.moved_far_enough(point.scene_pos) {
            self.set_status(Status::Recognized);
        } else {
            log::debug!("DirectionalDragArea: not far enough yet, waiting");
        }
    }

    fn touch_event_recognized(&mut self, batch: &TouchBatch) {
        let Some(point) = self.candidate_point(batch) else {
            self.set_status(Status::WaitingForTouch);
            return;
        };

        self.set_previous_positions(point.pos, point.scene_pos);

        if point.phase == TouchPhase::Released {
            self.set_status(Status::WaitingForTouch);
        }
    }

    /// Finds the candidate in `batch`, logging when it vanished without a release.
    fn candidate_point(&self, batch: &TouchBatch) -> Option<TouchPoint> {
        let id = self.touch_id?;
        let point = batch.find(id).copied();
        if point.is_none() {
            log::error!(
                "DirectionalDragArea[status={}]: touch {id} missing from batch without first \
                 being released. Considering it as released.",
                self.status
            );
        }
        point
    }

    /// Whether the damped position is inside the cone opening from the start
    /// position along the direction.
    fn point_inside_allowed_area(&self) -> bool {
        let damped = self.damped_scene_pos.value();
        let dx = damped.x - self.start_scene_pos.x;
        let dy = damped.y - self.start_scene_pos.y;
        let factor = self.widening_factor;

        match self.direction {
            Direction::Up => dy <= 0.0 && dx.abs() <= dy.abs() * factor,
            Direction::Down => dy >= 0.0 && dx.abs() <= dy * factor,
            Direction::Left => dx <= 0.0 && dy.abs() <= dx.abs() * factor,
            Direction::Right => dx >= 0.0 && dy.abs() <= dx * factor,
        }
    }

    fn moving_in_right_direction(&self) -> bool {
        let current = self.damped_scene_pos.value();
        let previous = self.previous_damped_scene_pos;

        match self.direction {
            Direction::Up => current.y <= previous.y,
            Direction::Down => current.y >= previous.y,
            Direction::Left => current.x <= previous.x,
            Direction::Right => current.x >= previous.x,
        }
    }

    fn moved_far_enough(&self, scene_pos: Point) -> bool {
        if self.distance_threshold <= 0.0 {
            return true;
        }
        let travelled =
            self.direction.axis_value(scene_pos) - self.direction.axis_value(self.start_scene_pos);
        travelled.abs() > self.distance_threshold
    }

    fn check_speed(&mut self) {
        if self.velocity.num_samples() >= MIN_SAMPLES_NEEDED {
            let speed = self.velocity.calculate().abs();
            // `min_speed` is per second, the calculator reports per millisecond.
            let min_speed_per_ms = self.min_speed / 1000.0;
            if speed < min_speed_per_ms {
                log::debug!("DirectionalDragArea: below minimum speed");
                self.set_status(Status::WaitingForTouch);
            }
        }

        let received = self.velocity.received();
        if received == self.samples_on_last_speed_check {
            self.silence_time = self.silence_time.saturating_add(self.timer.interval());
            if self.silence_time > self.max_silence_time {
                log::debug!("DirectionalDragArea: maximum silence time exceeded");
                self.set_status(Status::WaitingForTouch);
            }
        } else {
            self.silence_time = 0;
        }
        self.samples_on_last_speed_check = received;
    }

    fn is_within_composition_window(&self) -> bool {
        self.active_touches
            .is_within_composition_window(self.composition_time)
    }

    fn set_status(&mut self, status: Status) {
        if self.status == status {
            return;
        }
        let old = self.status;
        if old == Status::Undecided {
            self.timer.stop();
        }

        self.status = status;
        self.emit(DragEvent::StatusChanged(status));
        log::debug!("DirectionalDragArea: {old} -> {status}");

        match status {
            Status::WaitingForTouch => {
                self.touch_id = None;
                self.emit(DragEvent::DraggingChanged(false));
            }
            Status::Undecided => {
                self.timer.start();
                self.emit(DragEvent::DraggingChanged(true));
            }
            Status::Recognized => {
                if old == Status::WaitingForTouch {
                    self.emit(DragEvent::DraggingChanged(true));
                }
            }
        }
    }

    /// Records the latest sample of the candidate and notifies what changed.
    fn set_previous_positions(&mut self, pos: Point, scene_pos: Point) {
        let old = self.previous_pos;
        self.previous_pos = pos;
        if old.x != pos.x {
            self.emit(DragEvent::TouchXChanged(pos.x));
        }
        if old.y != pos.y {
            self.emit(DragEvent::TouchYChanged(pos.y));
        }

        let old = self.previous_scene_pos;
        self.previous_scene_pos = scene_pos;
        if old.x != scene_pos.x {
            self.emit(DragEvent::TouchSceneXChanged(scene_pos.x));
        }
        if old.y != scene_pos.y {
            self.emit(DragEvent::TouchSceneYChanged(scene_pos.y));
        }

        self.update_distances();
    }

    /// Recomputes the distance read-outs and notifies the ones that changed.
    fn update_distances(&mut self) {
        let direction = self.direction;
        let axis = |p: Point| direction.axis_value(p);
        let distance = axis(self.previous_pos) - axis(self.start_pos);
        let scene_distance = axis(self.previous_scene_pos) - axis(self.start_scene_pos);

        if self.distance != distance {
            self.distance = distance;
            self.emit(DragEvent::DistanceChanged(distance));
        }
        if self.scene_distance != scene_distance {
            self.scene_distance = scene_distance;
            self.emit(DragEvent::SceneDistanceChanged(scene_distance));
        }
    }

    fn emit(&mut self, event: DragEvent) {
        self.events.push(event);
    }
}

fn widening_factor(degrees: f64) -> f64 {
    (degrees * core::f64::consts::PI / 180.0).tan()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use understory_timing::{ManualClock, ManualTimer};

    type Area = DirectionalDragArea<ManualClock, ManualTimer>;

    fn area() -> (ManualClock, Area) {
        let clock = ManualClock::new();
        let area = DirectionalDragArea::new(clock.clone(), ManualTimer::new());
        (clock, area)
    }

    fn single(id: u64, x: f64, y: f64, phase: TouchPhase) -> TouchBatch {
        TouchBatch::new().with_point(TouchPoint::new(TouchId(id), Point::new(x, y), phase))
    }

    fn feed(area: &mut Area, batch: TouchBatch) {
        area.touch_event(&batch).unwrap();
    }

    #[test]
    fn defaults() {
        let (_, area) = area();
        assert_eq!(area.status(), Status::WaitingForTouch);
        assert!(!area.is_dragging());
        assert!(area.is_enabled());
        assert_eq!(area.config(), DragAreaConfig::default());
        assert_eq!(area.recognition_interval(), 60);
        assert!(!area.timer().is_running());
        assert!(area.pending_events().is_empty());
    }

    #[test]
    fn widening_factor_is_tangent_of_angle() {
        let (_, mut area) = area();
        area.set_widening_angle(45.0);
        assert!((area.widening_factor() - 1.0).abs() < 1e-12);
        area.set_widening_angle(0.0);
        assert_eq!(area.widening_factor(), 0.0);
    }

    #[test]
    fn setters_notify_only_on_change() {
        let (_, mut area) = area();
        area.set_direction(Direction::Right);
        area.set_max_deviation(0.0);
        area.set_widening_angle(0.0);
        area.set_distance_threshold(0.0);
        area.set_min_speed(0.0);
        area.set_max_silence_time(200);
        area.set_composition_time(60);
        area.set_recognition_interval(60);
        area.set_enabled(true);
        assert!(area.take_events().is_empty());

        area.set_direction(Direction::Up);
        area.set_max_deviation(2.0);
        area.set_widening_angle(10.0);
        area.set_distance_threshold(5.0);
        area.set_min_speed(100.0);
        area.set_max_silence_time(300);
        area.set_composition_time(30);
        area.set_recognition_interval(16);
        area.set_enabled(false);
        assert_eq!(
            area.take_events(),
            vec![
                DragEvent::DirectionChanged(Direction::Up),
                DragEvent::MaxDeviationChanged(2.0),
                DragEvent::WideningAngleChanged(10.0),
                DragEvent::DistanceThresholdChanged(5.0),
                DragEvent::MinSpeedChanged(100.0),
                DragEvent::MaxSilenceTimeChanged(300),
                DragEvent::CompositionTimeChanged(30),
                DragEvent::TimerIntervalChanged(16),
                DragEvent::EnabledChanged(false),
            ]
        );
        assert_eq!(area.timer().interval(), 16);
    }

    #[test]
    fn press_emits_status_dragging_and_position() {
        let (_, mut area) = area();
        feed(&mut area, single(1, 3.0, 4.0, TouchPhase::Pressed));
        assert_eq!(
            area.take_events(),
            vec![
                DragEvent::TouchXChanged(3.0),
                DragEvent::TouchYChanged(4.0),
                DragEvent::TouchSceneXChanged(3.0),
                DragEvent::TouchSceneYChanged(4.0),
                DragEvent::StatusChanged(Status::Undecided),
                DragEvent::DraggingChanged(true),
            ]
        );
        assert!(area.timer().is_running());
        assert_eq!(area.touch_id(), Some(TouchId(1)));
    }

    #[test]
    fn distance_events_follow_primary_axis_only() {
        let (clock, mut area) = area();
        area.set_widening_angle(45.0);
        feed(&mut area, single(1, 0.0, 0.0, TouchPhase::Pressed));
        area.take_events();

        clock.advance(10);
        feed(&mut area, single(1, 5.0, 2.0, TouchPhase::Moved));
        let events = area.take_events();
        assert!(events.contains(&DragEvent::DistanceChanged(5.0)));
        assert!(events.contains(&DragEvent::SceneDistanceChanged(5.0)));

        // Off-axis movement only changes Y.
        clock.advance(10);
        feed(&mut area, single(1, 5.0, 3.0, TouchPhase::Moved));
        let events = area.take_events();
        assert_eq!(
            events,
            vec![
                DragEvent::TouchYChanged(3.0),
                DragEvent::TouchSceneYChanged(3.0),
            ]
        );
    }

    #[test]
    fn changing_direction_recomputes_distances() {
        let (clock, mut area) = area();
        area.set_widening_angle(80.0);
        feed(&mut area, single(1, 0.0, 0.0, TouchPhase::Pressed));
        clock.advance(10);
        feed(&mut area, single(1, 4.0, 3.0, TouchPhase::Moved));
        area.take_events();

        area.set_direction(Direction::Down);
        assert_eq!(area.distance(), 3.0);
        assert_eq!(
            area.take_events(),
            vec![
                DragEvent::DirectionChanged(Direction::Down),
                DragEvent::DistanceChanged(3.0),
                DragEvent::SceneDistanceChanged(3.0),
            ]
        );
    }

    #[test]
    fn timer_tick_outside_undecided_is_ignored() {
        let (_, mut area) = area();
        area.set_max_silence_time(0);
        area.timer_tick();
        assert_eq!(area.status(), Status::WaitingForTouch);
    }

    #[test]
    fn timer_tick_counts_one_period_of_silence() {
        let (_, mut area) = area();
        area.set_max_silence_time(59);
        feed(&mut area, single(1, 0.0, 0.0, TouchPhase::Pressed));
        area.timer_tick();
        assert_eq!(area.status(), Status::WaitingForTouch);
        assert!(!area.timer().is_running());
    }

    #[test]
    fn set_recognition_timer_transfers_interval_and_running_state() {
        let (_, mut area) = area();
        area.set_recognition_interval(25);
        feed(&mut area, single(1, 0.0, 0.0, TouchPhase::Pressed));
        assert!(area.timer().is_running());

        let old = area.set_recognition_timer(ManualTimer::with_interval(999));
        assert!(!old.is_running());
        assert_eq!(area.timer().interval(), 25);
        assert!(area.timer().is_running());
    }

    #[test]
    fn set_time_source_reaches_registry_and_velocity() {
        let (_, mut area) = area();
        let other = ManualClock::starting_at(5000);
        area.set_time_source(other.clone());
        feed(&mut area, single(1, 0.0, 0.0, TouchPhase::Pressed));
        assert_eq!(area.active_touches().most_recent_start_time(), Some(5000));
        assert_eq!(area.velocity().time_source().now_ms(), 5000);
        assert_eq!(area.time_source().now_ms(), 5000);
    }

    #[test]
    fn set_time_source_leaves_timer_clock_alone() {
        let old = ManualClock::new();
        let timer = understory_timing::IntervalTimer::new(old.clone());
        let mut area = DirectionalDragArea::new(old, timer);

        let new = ManualClock::starting_at(1000);
        area.set_time_source(new.clone());
        assert_eq!(area.timer().clock().now_ms(), 0);

        area.timer_mut().set_clock(new);
        assert_eq!(area.timer().clock().now_ms(), 1000);
    }

    #[test]
    fn disabled_area_ignores_batches() {
        let (_, mut area) = area();
        area.set_enabled(false);
        feed(&mut area, single(1, 0.0, 0.0, TouchPhase::Pressed));
        assert_eq!(area.status(), Status::WaitingForTouch);
        assert!(area.active_touches().is_empty());
    }

    #[test]
    fn status_display() {
        assert_eq!(alloc::format!("{}", Status::Undecided), "Undecided");
    }
}
