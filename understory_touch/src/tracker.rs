// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture tracker: per-element sessions from press to release.
//!
//! ## Overview
//!
//! The tracker turns single-finger press, move, and release events into drag updates and swipe
//! decisions. It reads registrations from, and requests transient listeners through, the
//! [`Registry`].
//!
//! - Press starts a session; with a drag registered it also records the element position and
//!   binds a transient listener on the catcher.
//! - Move reports the delta to the drag callback and repositions the element on the enabled
//!   axes. Moves of a live session are always consumed.
//! - Release classifies the session, fires the swipe callback, and tears everything down.
//!
//! Events with more than one contact point are ignored at every step.

use alloc::collections::BTreeMap;
use core::fmt;

use kurbo::Point;

use crate::host::{Host, PositionError};
use crate::registry::Registry;
use crate::session::{GestureConfig, RepressPolicy, TouchSession};
use crate::types::{Axes, Outcome, TouchEvent};

/// Per-element touch sessions.
#[derive(Debug)]
pub struct Tracker<K> {
    sessions: BTreeMap<K, TouchSession>,
    config: GestureConfig,
}

impl<K> Default for Tracker<K> {
    fn default() -> Self {
        Self {
            sessions: BTreeMap::new(),
            config: GestureConfig::default(),
        }
    }
}

impl<K: Copy + Ord + fmt::Debug> Tracker<K> {
    /// Create a tracker with no sessions.
    pub fn new(config: GestureConfig) -> Self {
        Self {
            sessions: BTreeMap::new(),
            config,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Replace the configuration. Running sessions are classified with the new values.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    /// The running session of `element`, if any.
    pub fn session(&self, element: &K) -> Option<&TouchSession> {
        self.sessions.get(element)
    }

    /// Drop the session of `element` without classifying it.
    pub fn forget(&mut self, element: &K) -> Option<TouchSession> {
        self.sessions.remove(element)
    }

    /// Handle a press on `element`.
    pub fn on_press<H: Host<K> + ?Sized>(
        &mut self,
        registry: &mut Registry<K>,
        host: &mut H,
        element: K,
        event: &TouchEvent,
    ) -> Outcome {
        let &[point] = event.contacts() else {
            return Outcome::Continue;
        };
        if self.config.repress == RepressPolicy::Ignore && self.sessions.contains_key(&element) {
            log::trace!("ignoring press on {element:?}: session already running");
            return Outcome::Continue;
        }

        let mut start_position = Point::ZERO;
        if let Some(catcher) = registry.drag(&element).map(|d| d.options.catcher) {
            start_position = host.position(&element);
            registry.attach_transient(host, element, catcher);
        }
        self.sessions
            .insert(element, TouchSession::new(point, host.now(), start_position));
        Outcome::Continue
    }

    /// Handle a move for the drag of `element`.
    pub fn on_move<H: Host<K> + ?Sized>(
        &mut self,
        registry: &mut Registry<K>,
        host: &mut H,
        element: K,
        event: &TouchEvent,
    ) -> Outcome {
        let &[point] = event.contacts() else {
            return Outcome::Continue;
        };
        let Some(session) = self.sessions.get(&element) else {
            return Outcome::Continue;
        };

        let delta = session.delta(point);
        let start = session.start_position;
        if let Some(drag) = registry.drag_mut(&element) {
            let to = start + delta;
            let axes = drag.options.axes;
            if axes.contains(Axes::X) {
                best_effort(host.set_left(&element, to.x), &element);
            }
            if axes.contains(Axes::Y) {
                best_effort(host.set_top(&element, to.y), &element);
            }
            if let Some(callback) = drag.callback.as_mut() {
                callback(event, delta, start);
            }
        }
        Outcome::Consume
    }

    /// Handle a release for `element`.
    ///
    /// Consumes the event when the displacement exceeds the swipe threshold, unless the element
    /// bubbles. The swipe callback additionally requires the time limit to be met.
    pub fn on_release<H: Host<K> + ?Sized>(
        &mut self,
        registry: &mut Registry<K>,
        host: &mut H,
        element: K,
        event: &TouchEvent,
    ) -> Outcome {
        let Some(&session) = self.sessions.get(&element) else {
            return Outcome::Continue;
        };
        let contacts = event.contacts();
        if contacts.len() > 1 {
            return Outcome::Continue;
        }

        let mut outcome = Outcome::Continue;
        if let Some(&point) = contacts.first() {
            let release = session.release(point, host.now(), &self.config);
            if release.exceeds_threshold {
                log::trace!(
                    "release on {element:?}: delta {:?} after {:?}, swipe: {}",
                    release.delta,
                    release.elapsed,
                    release.is_swipe()
                );
                if release.is_swipe()
                    && let Some(callback) = registry
                        .swipe_mut(&element)
                        .and_then(|s| s.callback.as_mut())
                {
                    callback(event, release.delta);
                }
                if !registry.bubbles(&element) {
                    outcome = Outcome::Consume;
                }
            }
        } else {
            log::trace!("release on {element:?} without contacts; ending session");
        }

        self.sessions.remove(&element);
        registry.detach_transient(host, element);
        outcome
    }
}

/// Position writes are best-effort: a failure is logged and otherwise ignored.
fn best_effort<K: fmt::Debug>(result: Result<(), PositionError>, element: &K) {
    if let Err(err) = result {
        log::debug!("could not reposition {element:?}: {err}");
    }
}
