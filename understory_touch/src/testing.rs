// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording host shared by the unit tests.

use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;
use core::time::Duration;

use kurbo::Point;

use crate::gestures::Gestures;
use crate::host::{Clock, Layout, Listeners, PositionError};
use crate::types::{EventKind, Listener, Outcome, Target, TouchEvent};

/// A host-side operation, in the order the gesture layer requested it.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Op {
    Attach(Listener<u32>),
    Detach(Listener<u32>),
    Left(u32, f64),
    Top(u32, f64),
}

#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    pub(crate) bound: Vec<Listener<u32>>,
    pub(crate) ops: Vec<Op>,
    pub(crate) positions: BTreeMap<u32, Point>,
    pub(crate) broken_left: bool,
    pub(crate) broken_top: bool,
    pub(crate) now: Duration,
}

impl RecordingHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn place(&mut self, element: u32, left: f64, top: f64) {
        self.positions.insert(element, Point::new(left, top));
    }

    pub(crate) fn at(&mut self, ms: u64) {
        self.now = Duration::from_millis(ms);
    }

    pub(crate) fn bound_on(&self, target: Target<u32>) -> Vec<Listener<u32>> {
        self.bound
            .iter()
            .filter(|l| l.target == target)
            .copied()
            .collect()
    }

    pub(crate) fn take_ops(&mut self) -> Vec<Op> {
        core::mem::take(&mut self.ops)
    }
}

impl Listeners<u32> for RecordingHost {
    fn attach(&mut self, listener: Listener<u32>) {
        self.ops.push(Op::Attach(listener));
        self.bound.push(listener);
    }

    fn detach(&mut self, listener: &Listener<u32>) {
        self.ops.push(Op::Detach(*listener));
        self.bound.retain(|l| l != listener);
    }
}

impl Layout<u32> for RecordingHost {
    fn position(&self, element: &u32) -> Point {
        self.positions.get(element).copied().unwrap_or(Point::ZERO)
    }

    fn set_left(&mut self, element: &u32, left: f64) -> Result<(), PositionError> {
        if self.broken_left {
            return Err(PositionError::Detached);
        }
        self.positions.entry(*element).or_insert(Point::ZERO).x = left;
        self.ops.push(Op::Left(*element, left));
        Ok(())
    }

    fn set_top(&mut self, element: &u32, top: f64) -> Result<(), PositionError> {
        if self.broken_top {
            return Err(PositionError::NotPositionable);
        }
        self.positions.entry(*element).or_insert(Point::ZERO).y = top;
        self.ops.push(Op::Top(*element, top));
        Ok(())
    }
}

impl Clock for RecordingHost {
    fn now(&self) -> Duration {
        self.now
    }
}

/// Deliver `event` to every listener bound on `target` for its kind, the way a toolkit would.
///
/// The listener set is snapshotted before delivery.
pub(crate) fn fire(
    gestures: &mut Gestures<u32>,
    host: &mut RecordingHost,
    target: Target<u32>,
    event: &TouchEvent,
) -> Outcome {
    let listeners: Vec<Listener<u32>> = host
        .bound
        .iter()
        .filter(|l| l.target == target && l.kinds().contains(event.kind.flag()))
        .copied()
        .collect();
    listeners.iter().fold(Outcome::Continue, |acc, l| {
        acc.or(gestures.handle(host, l, event))
    })
}

pub(crate) fn press(x: f64, y: f64) -> TouchEvent {
    TouchEvent::single(EventKind::Press, Point::new(x, y))
}

pub(crate) fn moved(x: f64, y: f64) -> TouchEvent {
    TouchEvent::single(EventKind::Move, Point::new(x, y))
}

/// A release as toolkits report it: no active touches, the lifted finger in the changed list.
pub(crate) fn release(x: f64, y: f64) -> TouchEvent {
    TouchEvent::new(EventKind::Release, vec![]).with_changed_touches(vec![Point::new(x, y)])
}

pub(crate) fn two_fingers(kind: EventKind) -> TouchEvent {
    TouchEvent::new(kind, vec![Point::new(0.0, 0.0), Point::new(200.0, 200.0)])
}
