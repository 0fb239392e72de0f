// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: listener records, touch events, outcomes, and flag sets.
//!
//! ## Overview
//!
//! These types describe what the gesture layer asks of a host toolkit and what it hands back.
//! They are referenced by [`Gestures`](crate::gestures::Gestures) and by the host traits in
//! [`host`](crate::host).

use alloc::vec::Vec;

use kurbo::{Point, Vec2};

/// Where a listener is bound.
///
/// Base listeners are always bound on the tracked element itself.
/// Transient drag listeners are bound on the drag's catcher, which defaults to the document.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Target<K> {
    /// The root document (page-wide listeners).
    Document,
    /// A specific element.
    Element(K),
}

impl<K> Default for Target<K> {
    fn default() -> Self {
        Self::Document
    }
}

/// What a bound listener is for.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Role {
    /// Press and release listeners on the tracked element, bound while any feature is enabled.
    Base,
    /// Move and release listeners on a catcher, bound for the duration of one drag.
    Transient,
}

/// An explicit listener record.
///
/// The host binds one of these through [`Listeners::attach`](crate::host::Listeners::attach)
/// for every kind in [`Listener::kinds`] on [`Listener::target`], and hands it back to
/// [`Gestures::handle`](crate::gestures::Gestures::handle) whenever a matching event fires.
/// Routing is decided by [`Listener::role`]; there is no captured closure state.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Listener<K> {
    /// Element whose gesture state this listener drives.
    pub owner: K,
    /// Where the listener is bound.
    pub target: Target<K>,
    /// Base or transient.
    pub role: Role,
}

impl<K: Copy> Listener<K> {
    /// Press/release listener bound on `owner` itself.
    pub fn base(owner: K) -> Self {
        Self {
            owner,
            target: Target::Element(owner),
            role: Role::Base,
        }
    }

    /// Move/release listener for a drag of `owner`, bound on `catcher`.
    pub fn transient(owner: K, catcher: Target<K>) -> Self {
        Self {
            owner,
            target: catcher,
            role: Role::Transient,
        }
    }

    /// Event kinds the host should deliver to this listener.
    pub fn kinds(&self) -> EventKinds {
        match self.role {
            Role::Base => EventKinds::PRESS | EventKinds::RELEASE,
            Role::Transient => EventKinds::MOVE | EventKinds::RELEASE,
        }
    }
}

/// Kind of a raw touch pointer event.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EventKind {
    /// A finger touched down.
    Press,
    /// A finger moved.
    Move,
    /// A finger lifted.
    Release,
}

impl EventKind {
    /// The single-bit [`EventKinds`] set for this kind.
    pub const fn flag(self) -> EventKinds {
        match self {
            Self::Press => EventKinds::PRESS,
            Self::Move => EventKinds::MOVE,
            Self::Release => EventKinds::RELEASE,
        }
    }
}

bitflags::bitflags! {
    /// Set of event kinds a listener is bound for.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EventKinds: u8 {
        /// Touch start.
        const PRESS   = 0b0000_0001;
        /// Touch move.
        const MOVE    = 0b0000_0010;
        /// Touch end.
        const RELEASE = 0b0000_0100;
    }
}

bitflags::bitflags! {
    /// Axes a drag repositions its element on.
    ///
    /// Both set is free dragging; neither set is manual mode, where deltas are only
    /// reported to the drag callback.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Axes: u8 {
        /// Horizontal (`left`).
        const X = 0b01;
        /// Vertical (`top`).
        const Y = 0b10;
    }
}

impl Axes {
    /// Parse an axis string such as `"x"`, `"y"`, `"xy"`, or `""`.
    ///
    /// Any string containing `x` enables the horizontal axis and any string containing `y`
    /// enables the vertical one; other characters are ignored.
    ///
    /// ```
    /// use understory_touch::types::Axes;
    /// assert_eq!(Axes::parse("xy"), Axes::all());
    /// assert_eq!(Axes::parse("y"), Axes::Y);
    /// assert!(Axes::parse("").is_empty());
    /// ```
    pub fn parse(axis: &str) -> Self {
        let mut axes = Self::empty();
        if axis.contains('x') {
            axes |= Self::X;
        }
        if axis.contains('y') {
            axes |= Self::Y;
        }
        axes
    }
}

impl Default for Axes {
    fn default() -> Self {
        Self::all()
    }
}

bitflags::bitflags! {
    /// Gesture features enabled on an element.
    ///
    /// Base listeners stay bound while this set is non-empty.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Features: u8 {
        /// Swipe detection.
        const SWIPE = 0b01;
        /// Touch dragging.
        const DRAG  = 0b10;
    }
}

/// A raw touch pointer event as delivered by the host.
///
/// Contact points are in page coordinates.
/// Release events usually carry no active touches, only the lifted finger in
/// `changed_touches`; [`TouchEvent::contacts`] picks whichever list is populated.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchEvent {
    /// Event kind.
    pub kind: EventKind,
    /// Contacts currently on the surface.
    pub touches: Vec<Point>,
    /// Contacts that changed in this event.
    pub changed_touches: Vec<Point>,
}

impl TouchEvent {
    /// Create an event with the given active touches and no changed touches.
    pub fn new(kind: EventKind, touches: Vec<Point>) -> Self {
        Self {
            kind,
            touches,
            changed_touches: Vec::new(),
        }
    }

    /// Create a single-contact event at `point`.
    pub fn single(kind: EventKind, point: Point) -> Self {
        Self::new(kind, alloc::vec![point])
    }

    /// Replace the changed-touch list.
    #[must_use]
    pub fn with_changed_touches(mut self, changed_touches: Vec<Point>) -> Self {
        self.changed_touches = changed_touches;
        self
    }

    /// The contact list gestures are computed from: active touches if any, otherwise the
    /// changed touches.
    pub fn contacts(&self) -> &[Point] {
        if self.touches.is_empty() {
            &self.changed_touches
        } else {
            &self.touches
        }
    }
}

/// What the host should do with an event after the gesture layer handled it.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Let the event propagate and run its default action.
    Continue,
    /// Stop propagation and prevent the default action.
    Consume,
}

impl Outcome {
    /// Combine outcomes from several listeners; any consume wins.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match (self, other) {
            (Self::Continue, Self::Continue) => Self::Continue,
            _ => Self::Consume,
        }
    }
}

/// Dominant direction of a swipe delta.
///
/// Page coordinates grow downward, so a positive vertical delta is [`SwipeDirection::Down`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SwipeDirection {
    /// Negative horizontal delta.
    Left,
    /// Positive horizontal delta.
    Right,
    /// Negative vertical delta.
    Up,
    /// Positive vertical delta.
    Down,
}

impl SwipeDirection {
    /// Classify `delta` by its larger component. Horizontal wins ties.
    ///
    /// Returns `None` for a zero delta.
    pub fn of(delta: Vec2) -> Option<Self> {
        if delta.x == 0.0 && delta.y == 0.0 {
            return None;
        }
        let horizontal = delta.x.abs() >= delta.y.abs();
        Some(match (horizontal, delta.x < 0.0, delta.y < 0.0) {
            (true, true, _) => Self::Left,
            (true, false, _) => Self::Right,
            (false, _, true) => Self::Up,
            (false, _, false) => Self::Down,
        })
    }
}
