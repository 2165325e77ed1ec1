// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry of every touch currently down, with press timestamps.
//!
//! The recognizer uses this to arbitrate the *composition window*: if any
//! touch pressed less than `composition_time` ago, a new press is considered
//! simultaneous with it and the pair can never form a single-finger gesture.
//!
//! The registry tracks all touches on the surface, not only the gesture
//! candidate, and is updated once per batch after the recognizer has acted on
//! that batch.

use core::fmt;

use smallvec::SmallVec;
use understory_timing::TimeSource;

use crate::touch::{TouchBatch, TouchId, TouchPhase, TouchPhases};

/// Error returned when a batch releases a touch that was never pressed.
///
/// This means the host broke its press/release delivery contract; there is no
/// meaningful way to continue tracking touches after it.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct UnknownTouchError {
    /// The released identifier that had no matching press.
    pub id: TouchId,
}

impl fmt::Debug for UnknownTouchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnknownTouchError {{ id: {:?} }}", self.id)
    }
}

impl fmt::Display for UnknownTouchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "touch {} was released without being pressed", self.id)
    }
}

impl core::error::Error for UnknownTouchError {}

/// A touch that is currently down.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ActiveTouch {
    /// Contact identifier.
    pub id: TouchId,
    /// Time the contact was pressed, in milliseconds.
    pub start_time: i64,
}

/// Touches currently down, in press order.
#[derive(Clone, Debug)]
pub struct ActiveTouches<C> {
    time_source: C,
    // Ten concurrent contacts covers every touchscreen we know of; more spill to the heap.
    touches: SmallVec<[ActiveTouch; 10]>,
}

impl<C: TimeSource> ActiveTouches<C> {
    /// Creates an empty registry stamping presses with `time_source`.
    #[must_use]
    pub fn new(time_source: C) -> Self {
        Self {
            time_source,
            touches: SmallVec::new(),
        }
    }

    /// Registers presses and removes releases found in `batch`.
    ///
    /// Every pressed point is stamped with the current time. A press for an
    /// identifier that is already registered restarts its timestamp instead
    /// of adding a duplicate.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownTouchError`] for the first released identifier that is
    /// not registered. Points before it in the batch have been applied; points
    /// after it have not.
    pub fn update(&mut self, batch: &TouchBatch) -> Result<(), UnknownTouchError> {
        let bookkeeping = TouchPhases::PRESSED | TouchPhases::RELEASED;
        if !batch.phases().intersects(bookkeeping) {
            return Ok(());
        }
        for point in batch.points() {
            match point.phase {
                TouchPhase::Pressed => self.add(point.id),
                TouchPhase::Released => self.remove(point.id)?,
                TouchPhase::Moved | TouchPhase::Stationary => {}
            }
        }
        Ok(())
    }

    fn add(&mut self, id: TouchId) {
        let start_time = self.time_source.now_ms();
        if let Some(pos) = self.touches.iter().position(|t| t.id == id) {
            // Re-pressing an id restarts it; keep press order by moving it last.
            self.touches.remove(pos);
        }
        self.touches.push(ActiveTouch { id, start_time });
    }

    fn remove(&mut self, id: TouchId) -> Result<(), UnknownTouchError> {
        let pos = self
            .touches
            .iter()
            .position(|t| t.id == id)
            .ok_or(UnknownTouchError { id })?;
        self.touches.remove(pos);
        Ok(())
    }

    /// Returns `true` if no touch is down.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.touches.is_empty()
    }

    /// Returns the number of touches down.
    #[must_use]
    pub fn len(&self) -> usize {
        self.touches.len()
    }

    /// Returns the registered touches in press order.
    #[must_use]
    pub fn touches(&self) -> &[ActiveTouch] {
        &self.touches
    }

    /// Returns `true` if `id` is registered.
    #[must_use]
    pub fn contains(&self, id: TouchId) -> bool {
        self.touches.iter().any(|t| t.id == id)
    }

    /// Returns the press time of the most recently pressed touch.
    #[must_use]
    pub fn most_recent_start_time(&self) -> Option<i64> {
        self.touches.iter().map(|t| t.start_time).max()
    }

    /// Returns `true` if some touch pressed no more than `composition_time`
    /// milliseconds ago (inclusive).
    #[must_use]
    pub fn is_within_composition_window(&self, composition_time: u32) -> bool {
        self.most_recent_start_time().is_some_and(|start| {
            self.time_source.now_ms() <= start + i64::from(composition_time)
        })
    }

    /// Returns the clock used to stamp presses.
    pub fn time_source(&self) -> &C {
        &self.time_source
    }

    /// Replaces the clock used to stamp future presses.
    pub fn set_time_source(&mut self, time_source: C) {
        self.time_source = time_source;
    }
}
