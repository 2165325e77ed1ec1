// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_directional_drag --heading-base-level=0

//! Understory Directional Drag: single-finger swipe recognition from multi-touch input.
//!
//! This crate decides, under timing and spatial tolerances, whether a touch is
//! an intentional drag along one of four directions rather than a tap, a
//! multi-finger gesture, a slow drift or a movement the wrong way. A gesture's
//! validity is only known in hindsight, so recognition is a small state
//! machine fed with touch batches and periodic timer ticks:
//!
//! - [`area`]: the [`DirectionalDragArea`] state machine and its [`Status`].
//! - [`damped`]: per-axis jitter damping of the tracked position.
//! - [`velocity`]: windowed speed estimation along the primary axis.
//! - [`active_touches`]: every touch currently down, for composition-window
//!   arbitration between near-simultaneous presses.
//! - [`touch`]: the input model, [`TouchPoint`] and [`TouchBatch`].
//! - [`config`]: tolerances and their defaults.
//! - [`event`]: change notifications drained by the host.
//!
//! ## Recognition rules
//!
//! A candidate is recognized when all of these hold:
//!
//! - It was the only press in its batch, and no other touch pressed within
//!   the composition window before it.
//! - No other touch pressed while the composition window was still open.
//! - Its damped scene position stayed inside a cone opening from the start
//!   position along the direction, with half-angle `widening_angle`.
//! - It never moved backwards along the direction.
//! - It travelled further than `distance_threshold` along the primary axis.
//! - At every timer tick it was faster than `min_speed` and had produced a
//!   sample within `max_silence_time`.
//!
//! ## Host integration
//!
//! The crate does not assume any UI framework. The host:
//!
//! 1) delivers each input frame as a [`TouchBatch`] to
//!    [`DirectionalDragArea::touch_event`],
//! 2) pumps the recognition timer with [`DirectionalDragArea::poll_timer`],
//! 3) drains [`DragEvent`]s with [`DirectionalDragArea::take_events`] and
//!    forwards them to its property/notification layer.
//!
//! Time comes from an injected [`TimeSource`](understory_timing::TimeSource)
//! and the timer is any [`Timer`](understory_timing::Timer), so tests can
//! replay gestures deterministically with
//! [`ManualClock`](understory_timing::ManualClock) and
//! [`ManualTimer`](understory_timing::ManualTimer).
//!
//! ```rust
//! use kurbo::Point;
//! use understory_directional_drag::{
//!     Direction, DirectionalDragArea, DragAreaConfig, DragEvent, Status, TouchBatch, TouchId,
//!     TouchPhase, TouchPoint,
//! };
//! use understory_timing::{ManualClock, ManualTimer};
//!
//! let clock = ManualClock::new();
//! let mut area = DirectionalDragArea::new(clock.clone(), ManualTimer::new()).with_config(
//!     DragAreaConfig::default()
//!         .with_direction(Direction::Up)
//!         .with_max_silence_time(100),
//! );
//!
//! let press = TouchPoint::new(TouchId(7), Point::new(50.0, 200.0), TouchPhase::Pressed);
//! area.touch_event(&TouchBatch::new().with_point(press)).unwrap();
//! assert_eq!(area.status(), Status::Undecided);
//!
//! // The finger rests: two timer periods without samples exceed 100 ms of silence.
//! area.timer_mut().fire();
//! area.timer_mut().fire();
//! area.poll_timer();
//! assert_eq!(area.status(), Status::WaitingForTouch);
//! assert!(area.take_events().contains(&DragEvent::DraggingChanged(false)));
//! ```
//!
//! ## Features
//!
//! - `std` (default): build Kurbo and `understory_timing` with `std`.
//! - `libm`: use `libm` for float math in `no_std` builds.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod active_touches;
pub mod area;
pub mod config;
pub mod damped;
pub mod direction;
pub mod event;
pub mod touch;
pub mod velocity;

pub use active_touches::{ActiveTouches, UnknownTouchError};
pub use area::{DirectionalDragArea, Status};
pub use config::DragAreaConfig;
pub use direction::Direction;
pub use event::DragEvent;
pub use touch::{TouchBatch, TouchId, TouchPhase, TouchPhases, TouchPoint};
