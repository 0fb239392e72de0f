// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The gesture front end: enable/disable operations and event dispatch.
//!
//! ## Usage
//!
//! - Enable features with [`Gestures::enable_swipe`] and [`Gestures::enable_drag`].
//!   Base listeners are requested from the host on the first enabled feature.
//! - For every event fired on a bound [`Listener`], call [`Gestures::handle`] and apply the
//!   returned [`Outcome`] (stop propagation and prevent default on [`Outcome::Consume`]).
//! - Disable with [`Gestures::disable_swipe`] / [`Gestures::disable_drag`]; listeners are
//!   released once nothing needs them.

use core::fmt;

use crate::host::{Host, Listeners};
use crate::registry::{
    DragCallback, DragOptions, DragRegistration, Registry, SwipeCallback, SwipeRegistration,
};
use crate::session::{GestureConfig, TouchSession};
use crate::tracker::Tracker;
use crate::types::{EventKind, Features, Listener, Outcome, Role, TouchEvent};

/// Swipe and drag recognition for a set of elements keyed by `K`.
///
/// `K` is the host's element handle; it must be cheap to copy and totally ordered so
/// per-element state can live in ordered maps.
pub struct Gestures<K> {
    tracker: Tracker<K>,
    registry: Registry<K>,
}

impl<K: fmt::Debug> fmt::Debug for Gestures<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gestures")
            .field("tracker", &self.tracker)
            .field("registry", &self.registry)
            .finish()
    }
}

impl<K> Default for Gestures<K> {
    fn default() -> Self {
        Self {
            tracker: Tracker::default(),
            registry: Registry::default(),
        }
    }
}

impl<K: Copy + Ord + fmt::Debug> Gestures<K> {
    /// Create with the default [`GestureConfig`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with an explicit configuration.
    pub fn with_config(config: GestureConfig) -> Self {
        Self {
            tracker: Tracker::new(config),
            registry: Registry::new(),
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &GestureConfig {
        self.tracker.config()
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.tracker.set_config(config);
    }

    /// Enable swipe detection on `element`, replacing any previous swipe registration.
    ///
    /// `callback` receives `(event, delta)` for each qualifying release. Unless `bubble` is
    /// set, releases that travel past the threshold are consumed even when too slow to count.
    /// This overrides the bubbling of any drag enabled earlier on the same element.
    pub fn enable_swipe<H: Listeners<K> + ?Sized>(
        &mut self,
        host: &mut H,
        element: K,
        callback: Option<SwipeCallback>,
        bubble: bool,
    ) {
        self.registry
            .register_swipe(host, element, SwipeRegistration::new(callback, bubble));
    }

    /// Disable swipe detection on `element`. Safe to call when not enabled.
    pub fn disable_swipe<H: Listeners<K> + ?Sized>(&mut self, host: &mut H, element: K) {
        self.disable(host, element, Features::SWIPE);
    }

    /// Enable touch dragging on `element`, replacing any previous drag registration.
    ///
    /// `callback` receives `(event, delta, start_position)` on every move.
    /// Enabling a drag lets release events propagate until a later `enable_swipe` or a
    /// disable resets it.
    pub fn enable_drag<H: Listeners<K> + ?Sized>(
        &mut self,
        host: &mut H,
        element: K,
        callback: Option<DragCallback>,
        options: DragOptions<K>,
    ) {
        self.registry
            .register_drag(host, element, DragRegistration::new(callback, options));
    }

    /// Disable touch dragging on `element`. Safe to call when not enabled.
    pub fn disable_drag<H: Listeners<K> + ?Sized>(&mut self, host: &mut H, element: K) {
        self.disable(host, element, Features::DRAG);
    }

    fn disable<H: Listeners<K> + ?Sized>(&mut self, host: &mut H, element: K, feature: Features) {
        self.registry.disable_feature(host, element, feature);
        // With no base listener left, a release can never arrive to end the session.
        if self.registry.features(&element).is_empty() {
            self.tracker.forget(&element);
        }
    }

    /// Route an event fired on `listener`.
    ///
    /// Deliveries to listeners that are no longer bound, or for kinds the listener is not
    /// bound for, are ignored. A transient listener unbinds itself on release.
    pub fn handle<H: Host<K> + ?Sized>(
        &mut self,
        host: &mut H,
        listener: &Listener<K>,
        event: &TouchEvent,
    ) -> Outcome {
        if !self.registry.is_bound(listener) {
            return Outcome::Continue;
        }
        let element = listener.owner;
        let registry = &mut self.registry;
        match (listener.role, event.kind) {
            (Role::Base, EventKind::Press) => {
                self.tracker.on_press(registry, host, element, event)
            }
            (Role::Base, EventKind::Release) => {
                self.tracker.on_release(registry, host, element, event)
            }
            (Role::Transient, EventKind::Move) => {
                self.tracker.on_move(registry, host, element, event)
            }
            (Role::Transient, EventKind::Release) => {
                let outcome = self.tracker.on_release(registry, host, element, event);
                registry.detach_transient(host, element);
                outcome
            }
            (Role::Base, EventKind::Move) | (Role::Transient, EventKind::Press) => {
                Outcome::Continue
            }
        }
    }

    /// Whether a touch session is running on `element`.
    pub fn is_tracking(&self, element: &K) -> bool {
        self.tracker.session(element).is_some()
    }

    /// The running session on `element`.
    pub fn session(&self, element: &K) -> Option<&TouchSession> {
        self.tracker.session(element)
    }

    /// Features enabled on `element`.
    pub fn features(&self, element: &K) -> Features {
        self.registry.features(element)
    }

    /// The transient drag listener bound for `element`, if a drag is in flight.
    pub fn transient(&self, element: &K) -> Option<&Listener<K>> {
        self.registry.transient(element)
    }
}
