// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal dragging of a slider thumb.
//!
//! The thumb tracks moves on the document, so the finger may leave the thumb without losing
//! the drag. Only the horizontal axis is repositioned; the callback still sees both deltas.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example touch_drag`

use std::collections::BTreeMap;
use std::time::Duration;

use kurbo::{Point, Vec2};
use understory_touch::Gestures;
use understory_touch::host::{Clock, Layout, Listeners, PositionError};
use understory_touch::registry::DragOptions;
use understory_touch::types::{Axes, EventKind, Listener, Outcome, Target, TouchEvent};

const THUMB: u32 = 3;

#[derive(Default)]
struct Page {
    bound: Vec<Listener<u32>>,
    positions: BTreeMap<u32, Point>,
    now: Duration,
}

impl Listeners<u32> for Page {
    fn attach(&mut self, listener: Listener<u32>) {
        println!("  bind {:?} on {:?}", listener.role, listener.target);
        self.bound.push(listener);
    }
    fn detach(&mut self, listener: &Listener<u32>) {
        println!("  unbind {:?} on {:?}", listener.role, listener.target);
        self.bound.retain(|l| l != listener);
    }
}

impl Layout<u32> for Page {
    fn position(&self, element: &u32) -> Point {
        self.positions.get(element).copied().unwrap_or(Point::ZERO)
    }
    fn set_left(&mut self, element: &u32, left: f64) -> Result<(), PositionError> {
        let pos = self
            .positions
            .get_mut(element)
            .ok_or(PositionError::Detached)?;
        pos.x = left;
        Ok(())
    }
    fn set_top(&mut self, element: &u32, top: f64) -> Result<(), PositionError> {
        let pos = self
            .positions
            .get_mut(element)
            .ok_or(PositionError::Detached)?;
        pos.y = top;
        Ok(())
    }
}

impl Clock for Page {
    fn now(&self) -> Duration {
        self.now
    }
}

fn deliver(
    gestures: &mut Gestures<u32>,
    page: &mut Page,
    target: Target<u32>,
    event: &TouchEvent,
) -> Outcome {
    let listeners: Vec<_> = page
        .bound
        .iter()
        .filter(|l| l.target == target && l.kinds().contains(event.kind.flag()))
        .copied()
        .collect();
    listeners
        .iter()
        .fold(Outcome::Continue, |acc, l| acc.or(gestures.handle(page, l, event)))
}

fn main() {
    env_logger::init();

    let mut page = Page::default();
    page.positions.insert(THUMB, Point::new(40.0, 8.0));

    let mut gestures = Gestures::new();
    println!("== Enable drag (x only) ==");
    gestures.enable_drag(
        &mut page,
        THUMB,
        Some(Box::new(|_: &TouchEvent, delta: Vec2, start: Point| {
            println!("  drag {delta:?} from {start:?}");
        })),
        DragOptions {
            catcher: Target::Document,
            axes: Axes::parse("x"),
        },
    );

    println!("== Press on thumb ==");
    deliver(
        &mut gestures,
        &mut page,
        Target::Element(THUMB),
        &TouchEvent::single(EventKind::Press, Point::new(50.0, 20.0)),
    );

    println!("== Move across the document ==");
    for (i, x) in [60.0, 85.0, 130.0].into_iter().enumerate() {
        page.now += Duration::from_millis(16);
        let y = 20.0 + 5.0 * i as f64;
        let outcome = deliver(
            &mut gestures,
            &mut page,
            Target::Document,
            &TouchEvent::single(EventKind::Move, Point::new(x, y)),
        );
        println!("  thumb at {:?} ({outcome:?})", page.position(&THUMB));
    }

    println!("== Release ==");
    let lifted = TouchEvent::new(EventKind::Release, vec![])
        .with_changed_touches(vec![Point::new(130.0, 30.0)]);
    deliver(&mut gestures, &mut page, Target::Element(THUMB), &lifted);
    deliver(&mut gestures, &mut page, Target::Document, &lifted);

    assert_eq!(page.position(&THUMB), Point::new(120.0, 8.0));
    assert!(!gestures.is_tracking(&THUMB));
    assert_eq!(page.bound, vec![Listener::base(THUMB)]);

    println!("== Disable ==");
    gestures.disable_drag(&mut page, THUMB);
    assert!(page.bound.is_empty());
}
