// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch input as delivered by the host: one [`TouchBatch`] per input frame.
//!
//! A batch holds every touch point the host reports for that frame, each
//! tagged with the [`TouchPhase`] it is in. The batch also keeps an aggregate
//! [`TouchPhases`] summary, kept in sync as points are added, so callers can
//! cheaply ask "did anything press in this frame?".
//!
//! ```
//! use kurbo::Point;
//! use understory_directional_drag::touch::{TouchBatch, TouchId, TouchPhase, TouchPhases, TouchPoint};
//!
//! let batch: TouchBatch = [
//!     TouchPoint::new(TouchId(1), Point::new(10.0, 10.0), TouchPhase::Moved),
//!     TouchPoint::new(TouchId(2), Point::new(50.0, 10.0), TouchPhase::Pressed),
//! ]
//! .into_iter()
//! .collect();
//!
//! assert!(batch.phases().contains(TouchPhases::PRESSED | TouchPhases::MOVED));
//! assert_eq!(batch.pressed().count(), 1);
//! assert_eq!(batch.find(TouchId(1)).map(|p| p.phase), Some(TouchPhase::Moved));
//! ```

use core::fmt;

use kurbo::Point;
use smallvec::SmallVec;

/// Identifier of a physical contact, stable for the contact's lifetime.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TouchId(pub u64);

impl fmt::Display for TouchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle phase of a touch point within one batch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// The contact started in this frame.
    Pressed,
    /// The contact moved since the previous frame.
    Moved,
    /// The contact is still down but did not move.
    Stationary,
    /// The contact ended in this frame.
    Released,
}

impl TouchPhase {
    /// Returns the flag corresponding to this phase.
    #[must_use]
    pub const fn flag(self) -> TouchPhases {
        match self {
            Self::Pressed => TouchPhases::PRESSED,
            Self::Moved => TouchPhases::MOVED,
            Self::Stationary => TouchPhases::STATIONARY,
            Self::Released => TouchPhases::RELEASED,
        }
    }
}

impl fmt::Display for TouchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pressed => "pressed",
            Self::Moved => "moved",
            Self::Stationary => "stationary",
            Self::Released => "released",
        })
    }
}

bitflags::bitflags! {
    /// Set of phases present in a batch.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TouchPhases: u8 {
        /// At least one point is [`TouchPhase::Pressed`].
        const PRESSED    = 0b0000_0001;
        /// At least one point is [`TouchPhase::Moved`].
        const MOVED      = 0b0000_0010;
        /// At least one point is [`TouchPhase::Stationary`].
        const STATIONARY = 0b0000_0100;
        /// At least one point is [`TouchPhase::Released`].
        const RELEASED   = 0b0000_1000;
    }
}

/// A single touch sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchPoint {
    /// Contact identifier.
    pub id: TouchId,
    /// Position in the recognizer's local coordinates.
    pub pos: Point,
    /// Position in scene (global) coordinates.
    pub scene_pos: Point,
    /// Phase of the contact in this batch.
    pub phase: TouchPhase,
}

impl TouchPoint {
    /// Creates a touch point whose local and scene positions coincide.
    #[must_use]
    pub const fn new(id: TouchId, pos: Point, phase: TouchPhase) -> Self {
        Self {
            id,
            pos,
            scene_pos: pos,
            phase,
        }
    }

    /// Returns this point with a different scene position.
    #[must_use]
    pub const fn with_scene_pos(mut self, scene_pos: Point) -> Self {
        self.scene_pos = scene_pos;
        self
    }
}

/// Touch points reported together in one input frame.
#[derive(Clone, Default, PartialEq)]
pub struct TouchBatch {
    points: SmallVec<[TouchPoint; 4]>,
    phases: TouchPhases,
}

impl TouchBatch {
    /// Creates an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a point and records its phase in the summary.
    pub fn push(&mut self, point: TouchPoint) {
        self.phases |= point.phase.flag();
        self.points.push(point);
    }

    /// Builder-style [`push`](Self::push).
    #[must_use]
    pub fn with_point(mut self, point: TouchPoint) -> Self {
        self.push(point);
        self
    }

    /// Returns the points in delivery order.
    #[must_use]
    pub fn points(&self) -> &[TouchPoint] {
        &self.points
    }

    /// Returns the set of phases present in this batch.
    #[must_use]
    pub fn phases(&self) -> TouchPhases {
        self.phases
    }

    /// Returns `true` if the batch holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the point with identifier `id`, if present.
    #[must_use]
    pub fn find(&self, id: TouchId) -> Option<&TouchPoint> {
        self.points.iter().find(|p| p.id == id)
    }

    /// Iterates over the points that started in this batch.
    pub fn pressed(&self) -> impl Iterator<Item = &TouchPoint> + '_ {
        self.points
            .iter()
            .filter(|p| p.phase == TouchPhase::Pressed)
    }
}

impl FromIterator<TouchPoint> for TouchBatch {
    fn from_iter<I: IntoIterator<Item = TouchPoint>>(iter: I) -> Self {
        let mut batch = Self::new();
        for point in iter {
            batch.push(point);
        }
        batch
    }
}

impl Extend<TouchPoint> for TouchBatch {
    fn extend<I: IntoIterator<Item = TouchPoint>>(&mut self, iter: I) {
        for point in iter {
            self.push(point);
        }
    }
}

impl fmt::Debug for TouchBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TouchBatch [")?;
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(
                f,
                "{} {} @ ({}, {})",
                p.id, p.phase, p.scene_pos.x, p.scene_pos.y
            )?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    fn pt(id: u64, phase: TouchPhase) -> TouchPoint {
        TouchPoint::new(TouchId(id), Point::new(id as f64, 0.0), phase)
    }

    #[test]
    fn empty_batch_has_no_phases() {
        let batch = TouchBatch::new();
        assert!(batch.is_empty());
        assert!(batch.phases().is_empty());
        assert_eq!(batch.pressed().count(), 0);
    }

    #[test]
    fn phases_accumulate_as_points_are_pushed() {
        let mut batch = TouchBatch::new();
        batch.push(pt(1, TouchPhase::Stationary));
        assert_eq!(batch.phases(), TouchPhases::STATIONARY);

        batch.push(pt(2, TouchPhase::Released));
        assert_eq!(
            batch.phases(),
            TouchPhases::STATIONARY | TouchPhases::RELEASED
        );
        assert!(!batch.phases().contains(TouchPhases::PRESSED));
    }

    #[test]
    fn extend_keeps_summary_in_sync() {
        let mut batch = TouchBatch::new().with_point(pt(1, TouchPhase::Moved));
        batch.extend([pt(2, TouchPhase::Pressed), pt(3, TouchPhase::Pressed)]);
        assert!(batch.phases().contains(TouchPhases::PRESSED));
        assert_eq!(batch.pressed().count(), 2);
        assert_eq!(batch.points().len(), 3);
    }

    #[test]
    fn find_returns_matching_point() {
        let batch: TouchBatch = [pt(4, TouchPhase::Moved), pt(9, TouchPhase::Released)]
            .into_iter()
            .collect();
        assert_eq!(batch.find(TouchId(9)).map(|p| p.phase), Some(TouchPhase::Released));
        assert!(batch.find(TouchId(5)).is_none());
    }

    #[test]
    fn scene_position_defaults_to_local() {
        let p = TouchPoint::new(TouchId(1), Point::new(1.0, 2.0), TouchPhase::Pressed);
        assert_eq!(p.scene_pos, p.pos);
        let p = p.with_scene_pos(Point::new(11.0, 12.0));
        assert_eq!(p.scene_pos, Point::new(11.0, 12.0));
        assert_eq!(p.pos, Point::new(1.0, 2.0));
    }

    #[test]
    fn debug_lists_points() {
        let batch = TouchBatch::new().with_point(pt(1, TouchPhase::Pressed));
        assert_eq!(format!("{batch:?}"), "TouchBatch [#1 pressed @ (1, 0)]");
    }
}
