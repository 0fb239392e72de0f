// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host collaborators: listener binding, element layout, and time.
//!
//! The gesture layer does not own an event loop or a layout engine.
//! A toolkit implements these traits and passes itself into the
//! [`Gestures`](crate::gestures::Gestures) operations.

use core::fmt;
use core::time::Duration;

use kurbo::Point;

use crate::types::Listener;

/// Binds and unbinds listener records on the host's event targets.
pub trait Listeners<K> {
    /// Bind `listener` for each of [`Listener::kinds`] on [`Listener::target`].
    fn attach(&mut self, listener: Listener<K>);
    /// Unbind a listener previously passed to [`Listeners::attach`].
    fn detach(&mut self, listener: &Listener<K>);
}

/// Reads and writes an element's on-screen position.
pub trait Layout<K> {
    /// Current `(left, top)` of `element` relative to its positioning parent.
    fn position(&self, element: &K) -> Point;
    /// Write the horizontal position of `element`.
    fn set_left(&mut self, element: &K, left: f64) -> Result<(), PositionError>;
    /// Write the vertical position of `element`.
    fn set_top(&mut self, element: &K, top: f64) -> Result<(), PositionError>;
}

/// Timestamp source.
pub trait Clock {
    /// Time since an arbitrary, fixed origin. Must not go backwards within one gesture.
    fn now(&self) -> Duration;
}

/// Everything the gesture layer needs from a toolkit.
///
/// Implemented automatically for any type implementing [`Listeners`], [`Layout`], and [`Clock`].
pub trait Host<K>: Listeners<K> + Layout<K> + Clock {}

impl<K, T: Listeners<K> + Layout<K> + Clock + ?Sized> Host<K> for T {}

/// Failure to write an element position.
///
/// Drag handling swallows these; a failed write never stops the other axis or the
/// drag callback.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PositionError {
    /// The element is no longer part of the document.
    Detached,
    /// The element cannot be positioned (for example, it is statically laid out).
    NotPositionable,
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detached => f.write_str("element is detached from the document"),
            Self::NotPositionable => f.write_str("element is not positionable"),
        }
    }
}

impl core::error::Error for PositionError {}
