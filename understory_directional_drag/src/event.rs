// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change notifications emitted by a drag area.

use crate::area::Status;
use crate::direction::Direction;

/// An observable value of a [`DirectionalDragArea`](crate::area::DirectionalDragArea) changed.
///
/// Each variant carries the new value. Events are queued in the order the
/// changes happened and drained with
/// [`take_events`](crate::area::DirectionalDragArea::take_events). Setting a
/// value to what it already is never produces an event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DragEvent {
    /// Recognition status changed.
    StatusChanged(Status),
    /// A gesture started being tracked (`true`) or ended (`false`).
    DraggingChanged(bool),
    /// Configured direction changed.
    DirectionChanged(Direction),
    /// Damping tolerance changed.
    MaxDeviationChanged(f64),
    /// Cone half-angle changed, in degrees.
    WideningAngleChanged(f64),
    /// Distance threshold changed.
    DistanceThresholdChanged(f64),
    /// Minimum speed changed, in units per second.
    MinSpeedChanged(f64),
    /// Maximum silence time changed, in ms.
    MaxSilenceTimeChanged(u32),
    /// Composition window changed, in ms.
    CompositionTimeChanged(u32),
    /// Recognition timer period changed, in ms.
    TimerIntervalChanged(u32),
    /// The area was enabled or disabled.
    EnabledChanged(bool),
    /// Local distance from the start along the primary axis changed.
    DistanceChanged(f64),
    /// Scene distance from the start along the primary axis changed.
    SceneDistanceChanged(f64),
    /// Local X of the tracked touch changed.
    TouchXChanged(f64),
    /// Local Y of the tracked touch changed.
    TouchYChanged(f64),
    /// Scene X of the tracked touch changed.
    TouchSceneXChanged(f64),
    /// Scene Y of the tracked touch changed.
    TouchSceneYChanged(f64),
}
