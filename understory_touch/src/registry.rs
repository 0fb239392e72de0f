// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener lifecycle: gesture registrations and the listeners derived from them.
//!
//! ## Overview
//!
//! Each element has one record holding its swipe and drag registrations, the set of enabled
//! [`Features`], and at most one transient drag listener.
//!
//! - Base listeners (press and release on the element) are bound on the first enabled
//!   feature and unbound when the last one is disabled.
//! - A transient listener (move and release on the drag catcher) is bound at press and
//!   unbound at release or on any feature teardown.
//!
//! Records are removed as soon as they hold nothing, so a disabled element leaves no state.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::fmt;

use kurbo::{Point, Vec2};

use crate::host::Listeners;
use crate::types::{Axes, Features, Listener, Role, Target, TouchEvent};

/// Swipe callback: `(event, delta)`, invoked once at release.
pub type SwipeCallback = Box<dyn FnMut(&TouchEvent, Vec2)>;

/// Drag callback: `(event, delta, start_position)`, invoked on every move.
///
/// `start_position` is the element's `(left, top)` at press.
pub type DragCallback = Box<dyn FnMut(&TouchEvent, Vec2, Point)>;

/// Swipe registration for one element.
pub struct SwipeRegistration {
    pub(crate) callback: Option<SwipeCallback>,
    pub(crate) bubble: bool,
}

impl SwipeRegistration {
    /// Create a registration. With `bubble` set, qualifying release events are not consumed.
    pub fn new(callback: Option<SwipeCallback>, bubble: bool) -> Self {
        Self { callback, bubble }
    }

    /// Whether release events are allowed to propagate.
    pub fn bubble(&self) -> bool {
        self.bubble
    }
}

impl fmt::Debug for SwipeRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwipeRegistration")
            .field("callback", &self.callback.is_some())
            .field("bubble", &self.bubble)
            .finish()
    }
}

/// Where a drag tracks movement and which axes it repositions.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DragOptions<K> {
    /// Target receiving the transient move/release listeners.
    pub catcher: Target<K>,
    /// Axes repositioned on move; empty for manual mode.
    pub axes: Axes,
}

impl<K> Default for DragOptions<K> {
    fn default() -> Self {
        Self {
            catcher: Target::Document,
            axes: Axes::all(),
        }
    }
}

/// Drag registration for one element.
pub struct DragRegistration<K> {
    pub(crate) callback: Option<DragCallback>,
    pub(crate) options: DragOptions<K>,
}

impl<K> DragRegistration<K> {
    /// Create a registration.
    pub fn new(callback: Option<DragCallback>, options: DragOptions<K>) -> Self {
        Self { callback, options }
    }

    /// Catcher and axes.
    pub fn options(&self) -> &DragOptions<K> {
        &self.options
    }
}

impl<K: fmt::Debug> fmt::Debug for DragRegistration<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragRegistration")
            .field("callback", &self.callback.is_some())
            .field("options", &self.options)
            .finish()
    }
}

struct ElementRecord<K> {
    features: Features,
    transient: Option<Listener<K>>,
    swipe: Option<SwipeRegistration>,
    drag: Option<DragRegistration<K>>,
    // Shared by both features; the most recent enable or disable decides.
    bubble: bool,
}

impl<K> ElementRecord<K> {
    fn new() -> Self {
        Self {
            features: Features::empty(),
            transient: None,
            swipe: None,
            drag: None,
            bubble: false,
        }
    }

    fn is_vacant(&self) -> bool {
        self.features.is_empty()
            && self.transient.is_none()
            && self.swipe.is_none()
            && self.drag.is_none()
    }
}

/// Per-element registrations and listener attachment records.
pub struct Registry<K> {
    records: BTreeMap<K, ElementRecord<K>>,
}

impl<K> Default for Registry<K> {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for Registry<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.records
                    .iter()
                    .map(|(k, r)| (k, (r.features, r.transient.is_some()))),
            )
            .finish()
    }
}

impl<K: Copy + Ord + fmt::Debug> Registry<K> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `feature` enabled on `element`, binding base listeners on the first one.
    pub fn enable_feature<H: Listeners<K> + ?Sized>(
        &mut self,
        host: &mut H,
        element: K,
        feature: Features,
    ) {
        let record = self.records.entry(element).or_insert_with(ElementRecord::new);
        if record.features.is_empty() {
            log::debug!("binding base touch listeners on {element:?}");
            host.attach(Listener::base(element));
        }
        record.features |= feature;
    }

    /// Disable `feature` on `element` and drop its registration.
    ///
    /// Base listeners are unbound when no feature remains.
    /// Any transient listener is torn down regardless. Safe to call repeatedly.
    pub fn disable_feature<H: Listeners<K> + ?Sized>(
        &mut self,
        host: &mut H,
        element: K,
        feature: Features,
    ) {
        if let Some(record) = self.records.get_mut(&element) {
            if feature.contains(Features::SWIPE) {
                record.swipe = None;
            }
            if feature.contains(Features::DRAG) {
                record.drag = None;
            }
            record.bubble = false;
            let was_active = !record.features.is_empty();
            record.features.remove(feature);
            if was_active && record.features.is_empty() {
                log::debug!("unbinding base touch listeners on {element:?}");
                host.detach(&Listener::base(element));
            }
        }
        self.detach_transient(host, element);
        self.prune(element);
    }

    /// Bind a transient move/release listener for `element` on `catcher`.
    ///
    /// Replaces any transient listener already bound for `element`.
    /// Does nothing for an element without a record.
    pub fn attach_transient<H: Listeners<K> + ?Sized>(
        &mut self,
        host: &mut H,
        element: K,
        catcher: Target<K>,
    ) {
        self.detach_transient(host, element);
        let Some(record) = self.records.get_mut(&element) else {
            return;
        };
        let listener = Listener::transient(element, catcher);
        log::trace!("binding transient drag listener for {element:?} on {catcher:?}");
        host.attach(listener);
        record.transient = Some(listener);
    }

    /// Unbind the transient listener of `element`, if any. Idempotent.
    pub fn detach_transient<H: Listeners<K> + ?Sized>(&mut self, host: &mut H, element: K) {
        let Some(listener) = self
            .records
            .get_mut(&element)
            .and_then(|r| r.transient.take())
        else {
            return;
        };
        log::trace!(
            "unbinding transient drag listener for {element:?} on {:?}",
            listener.target
        );
        host.detach(&listener);
    }

    /// Enabled features on `element`.
    pub fn features(&self, element: &K) -> Features {
        self.records
            .get(element)
            .map_or(Features::empty(), |r| r.features)
    }

    /// The transient listener currently bound for `element`.
    pub fn transient(&self, element: &K) -> Option<&Listener<K>> {
        self.records.get(element)?.transient.as_ref()
    }

    /// Whether `listener` is still bound according to this registry.
    ///
    /// Hosts may deliver an event to a listener that was unbound earlier in the same dispatch;
    /// such deliveries must be ignored.
    pub fn is_bound(&self, listener: &Listener<K>) -> bool {
        let Some(record) = self.records.get(&listener.owner) else {
            return false;
        };
        match listener.role {
            Role::Base => {
                !record.features.is_empty() && listener.target == Target::Element(listener.owner)
            }
            Role::Transient => record.transient.as_ref() == Some(listener),
        }
    }

    /// Install a swipe registration, replacing any previous one.
    ///
    /// The previous registration is disabled first, so a lone swipe feature rebinds its base
    /// listeners.
    pub fn register_swipe<H: Listeners<K> + ?Sized>(
        &mut self,
        host: &mut H,
        element: K,
        registration: SwipeRegistration,
    ) {
        self.disable_feature(host, element, Features::SWIPE);
        self.enable_feature(host, element, Features::SWIPE);
        if let Some(record) = self.records.get_mut(&element) {
            record.bubble = registration.bubble;
            record.swipe = Some(registration);
        }
    }

    /// Install a drag registration, replacing any previous one.
    pub fn register_drag<H: Listeners<K> + ?Sized>(
        &mut self,
        host: &mut H,
        element: K,
        registration: DragRegistration<K>,
    ) {
        self.disable_feature(host, element, Features::DRAG);
        self.enable_feature(host, element, Features::DRAG);
        if let Some(record) = self.records.get_mut(&element) {
            record.bubble = true;
            record.drag = Some(registration);
        }
    }

    /// Swipe registration of `element`.
    pub fn swipe(&self, element: &K) -> Option<&SwipeRegistration> {
        self.records.get(element)?.swipe.as_ref()
    }

    /// Drag registration of `element`.
    pub fn drag(&self, element: &K) -> Option<&DragRegistration<K>> {
        self.records.get(element)?.drag.as_ref()
    }

    pub(crate) fn swipe_mut(&mut self, element: &K) -> Option<&mut SwipeRegistration> {
        self.records.get_mut(element)?.swipe.as_mut()
    }

    pub(crate) fn drag_mut(&mut self, element: &K) -> Option<&mut DragRegistration<K>> {
        self.records.get_mut(element)?.drag.as_mut()
    }

    /// Whether qualifying release events on `element` propagate.
    ///
    /// The flag belongs to the element, not to a feature: registering a drag sets it,
    /// registering a swipe sets it to that swipe's `bubble`, and disabling either feature
    /// clears it. The last of these wins.
    pub fn bubbles(&self, element: &K) -> bool {
        self.records.get(element).is_some_and(|r| r.bubble)
    }

    fn prune(&mut self, element: K) {
        if self.records.get(&element).is_some_and(ElementRecord::is_vacant) {
            self.records.remove(&element);
        }
    }
}
