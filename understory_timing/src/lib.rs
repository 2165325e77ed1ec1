// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic clocks and periodic timers.
//!
//! Gesture recognizers need two time-related capabilities that a UI host
//! normally owns: a monotonic clock to stamp input samples, and a periodic
//! timeout that forces re-evaluation while no input arrives. This crate models
//! both as narrow traits so recognition logic never reads a wall clock
//! directly and can be replayed deterministically in tests.
//!
//! - [`clock`]: the [`TimeSource`] trait, a shared [`ManualClock`] and (with
//!   the `std` feature) a [`SystemClock`].
//! - [`timer`]: the [`Timer`] trait, a test-controlled [`ManualTimer`] and a
//!   clock-driven [`IntervalTimer`].
//!
//! ## Pumping timers
//!
//! Timers never call back on their own. The host asks a running timer how many
//! timeouts have elapsed with [`Timer::take_timeouts`] and dispatches that many
//! ticks to whoever owns the timer. This keeps everything single-threaded and
//! lets the host decide where in its frame loop timeouts are processed.
//!
//! ```rust
//! use understory_timing::{IntervalTimer, ManualClock, Timer};
//!
//! let clock = ManualClock::new();
//! let mut timer = IntervalTimer::new(clock.clone());
//! timer.set_interval(60);
//! timer.start();
//!
//! clock.advance(59);
//! assert_eq!(timer.take_timeouts(), 0);
//!
//! clock.advance(70);
//! assert_eq!(timer.take_timeouts(), 2);
//!
//! timer.stop();
//! clock.advance(500);
//! assert_eq!(timer.take_timeouts(), 0);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables [`SystemClock`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod clock;
pub mod timer;

#[cfg(feature = "std")]
pub use clock::SystemClock;
pub use clock::{ManualClock, TimeSource};
pub use timer::{IntervalTimer, ManualTimer, Timer};
