// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_touch --heading-base-level=0

//! Understory Touch: single-finger swipe and drag recognition for UI elements.
//!
//! ## Overview
//!
//! This crate turns raw touch press, move, and release events into two gestures:
//!
//! - **Swipe**: reported once at release when the finger travelled further than a threshold on
//!   either axis (60 by default) within a time limit (600 ms by default).
//! - **Drag**: reported on every move, with the element optionally repositioned live on the
//!   horizontal axis, the vertical axis, both, or neither ("manual" mode).
//!
//! It does not own an event loop or a layout engine.
//! The toolkit implements the [`Host`](crate::host::Host) traits and forwards events.
//!
//! ## Listeners
//!
//! The gesture layer asks the host to bind explicit [`Listener`](crate::types::Listener) records:
//!
//! - A base listener (press and release) on each element with at least one enabled feature.
//! - A transient listener (move and release) on the drag's catcher, only while a drag is in
//!   flight. The catcher defaults to the document so a fast finger that leaves the element is
//!   still tracked.
//!
//! The host hands events back through [`Gestures::handle`](crate::gestures::Gestures::handle),
//! which returns an [`Outcome`](crate::types::Outcome): consumed moves and releases should stop
//! propagating and have their default action prevented (for example, page scrolling).
//!
//! ## Edge cases
//!
//! - Events with more than one contact point are ignored; multi-touch is out of scope.
//! - Moves and releases without a running session are ignored.
//! - A distance exactly at the threshold is not a swipe.
//! - A long but slow release fires no swipe callback but is still consumed, unless bubbling is
//!   on. Bubbling is shared by both gestures: the last `enable_swipe` or `enable_drag` sets it
//!   and any disable clears it.
//! - Failed position writes are logged and ignored; the drag callback always runs.
//!
//! ## Example
//!
//! ```
//! use core::time::Duration;
//! use kurbo::{Point, Vec2};
//! use understory_touch::gestures::Gestures;
//! use understory_touch::host::{Clock, Layout, Listeners, PositionError};
//! use understory_touch::types::{EventKind, Listener, Outcome, TouchEvent};
//!
//! #[derive(Default)]
//! struct Page {
//!     bound: Vec<Listener<u32>>,
//!     now: Duration,
//! }
//!
//! impl Listeners<u32> for Page {
//!     fn attach(&mut self, listener: Listener<u32>) {
//!         self.bound.push(listener);
//!     }
//!     fn detach(&mut self, listener: &Listener<u32>) {
//!         self.bound.retain(|l| l != listener);
//!     }
//! }
//!
//! impl Layout<u32> for Page {
//!     fn position(&self, _: &u32) -> Point {
//!         Point::ZERO
//!     }
//!     fn set_left(&mut self, _: &u32, _: f64) -> Result<(), PositionError> {
//!         Ok(())
//!     }
//!     fn set_top(&mut self, _: &u32, _: f64) -> Result<(), PositionError> {
//!         Ok(())
//!     }
//! }
//!
//! impl Clock for Page {
//!     fn now(&self) -> Duration {
//!         self.now
//!     }
//! }
//!
//! let mut page = Page::default();
//! let mut gestures = Gestures::new();
//! gestures.enable_swipe(
//!     &mut page,
//!     1,
//!     Some(Box::new(|_: &TouchEvent, delta: Vec2| {
//!         assert_eq!(delta, Vec2::new(0.0, 70.0));
//!     })),
//!     false,
//! );
//!
//! // One base listener is now bound on element 1.
//! let base = page.bound[0];
//! let press = TouchEvent::single(EventKind::Press, Point::new(100.0, 100.0));
//! assert_eq!(gestures.handle(&mut page, &base, &press), Outcome::Continue);
//!
//! page.now = Duration::from_millis(100);
//! let release = TouchEvent::single(EventKind::Release, Point::new(100.0, 170.0));
//! assert_eq!(gestures.handle(&mut page, &base, &release), Outcome::Consume);
//! ```
//!
//! ## Logging
//!
//! Listener binding and swipe classification are logged through the [`log`] facade at
//! `debug` and `trace` level.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod gestures;
pub mod host;
pub mod registry;
pub mod session;
pub mod tracker;
pub mod types;

#[cfg(test)]
mod testing;

pub use gestures::Gestures;
