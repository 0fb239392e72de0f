// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swipe detection on a carousel.
//!
//! This example drives three touch sequences through a tiny simulated page: a quick swipe, a
//! slow drag of the same length, and a tap. Only the first fires the callback; the first two
//! are consumed so the page does not scroll.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_demos --example touch_swipe`

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use kurbo::{Point, Vec2};
use understory_touch::Gestures;
use understory_touch::host::{Clock, Layout, Listeners, PositionError};
use understory_touch::types::{
    EventKind, Listener, Outcome, SwipeDirection, Target, TouchEvent,
};

const CAROUSEL: u32 = 1;

/// A flat page: every element's parent is the document.
#[derive(Default)]
struct Page {
    bound: Vec<Listener<u32>>,
    now: Duration,
}

impl Listeners<u32> for Page {
    fn attach(&mut self, listener: Listener<u32>) {
        self.bound.push(listener);
    }
    fn detach(&mut self, listener: &Listener<u32>) {
        self.bound.retain(|l| l != listener);
    }
}

impl Layout<u32> for Page {
    fn position(&self, _: &u32) -> Point {
        Point::ZERO
    }
    fn set_left(&mut self, _: &u32, _: f64) -> Result<(), PositionError> {
        Err(PositionError::NotPositionable)
    }
    fn set_top(&mut self, _: &u32, _: f64) -> Result<(), PositionError> {
        Err(PositionError::NotPositionable)
    }
}

impl Clock for Page {
    fn now(&self) -> Duration {
        self.now
    }
}

/// Deliver `event` at `target`, then bubble to the document unless consumed.
fn dispatch(
    gestures: &mut Gestures<u32>,
    page: &mut Page,
    target: Target<u32>,
    event: &TouchEvent,
) -> Outcome {
    let path = match target {
        Target::Element(_) => vec![target, Target::Document],
        Target::Document => vec![Target::Document],
    };
    for hop in path {
        let listeners: Vec<_> = page
            .bound
            .iter()
            .filter(|l| l.target == hop && l.kinds().contains(event.kind.flag()))
            .copied()
            .collect();
        let outcome = listeners
            .iter()
            .fold(Outcome::Continue, |acc, l| acc.or(gestures.handle(page, l, event)));
        if outcome == Outcome::Consume {
            return Outcome::Consume;
        }
    }
    Outcome::Continue
}

fn gesture(
    gestures: &mut Gestures<u32>,
    page: &mut Page,
    from: Point,
    to: Point,
    duration: Duration,
) -> Outcome {
    dispatch(
        gestures,
        page,
        Target::Element(CAROUSEL),
        &TouchEvent::single(EventKind::Press, from),
    );
    page.now += duration;
    let lifted = TouchEvent::new(EventKind::Release, vec![]).with_changed_touches(vec![to]);
    let outcome = dispatch(gestures, page, Target::Element(CAROUSEL), &lifted);
    page.now += Duration::from_secs(1);
    outcome
}

fn main() {
    env_logger::init();

    let mut page = Page::default();
    let mut gestures = Gestures::new();
    let swipes: Rc<RefCell<Vec<Vec2>>> = Rc::default();
    let sink = swipes.clone();
    gestures.enable_swipe(
        &mut page,
        CAROUSEL,
        Some(Box::new(move |_: &TouchEvent, delta: Vec2| {
            println!("  swipe {:?} by {delta:?}", SwipeDirection::of(delta));
            sink.borrow_mut().push(delta);
        })),
        false,
    );

    println!("== Quick swipe left ==");
    let quick = gesture(
        &mut gestures,
        &mut page,
        Point::new(300.0, 200.0),
        Point::new(150.0, 210.0),
        Duration::from_millis(120),
    );
    println!("  release: {quick:?}");

    println!("== Slow drag left ==");
    let slow = gesture(
        &mut gestures,
        &mut page,
        Point::new(300.0, 200.0),
        Point::new(150.0, 210.0),
        Duration::from_millis(900),
    );
    println!("  release: {slow:?}");

    println!("== Tap ==");
    let tap = gesture(
        &mut gestures,
        &mut page,
        Point::new(300.0, 200.0),
        Point::new(302.0, 199.0),
        Duration::from_millis(80),
    );
    println!("  release: {tap:?}");

    assert_eq!(quick, Outcome::Consume);
    assert_eq!(slow, Outcome::Consume);
    assert_eq!(tap, Outcome::Continue);
    assert_eq!(*swipes.borrow(), vec![Vec2::new(-150.0, 10.0)]);

    gestures.disable_swipe(&mut page, CAROUSEL);
    assert!(page.bound.is_empty());
}
