// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll/resize listener bookkeeping.
//!
//! An affix listens for `scroll` and `resize` on its container. When the
//! container is an element, it also listens on the window so page-level scrolling
//! moves the pinned node too. [`Subscriptions`] owns the resulting handles and
//! hands them back to the [`EventRegistry`] on [`Subscriptions::release`].
//!
//! The registry only records interest. Delivering an event means the host
//! calls [`Affix::update_position`](crate::Affix::update_position).

use smallvec::SmallVec;

use crate::viewport::{ScrollTarget, ViewportProvider};

/// Notifications an affix subscribes to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The target scrolled.
    Scroll,
    /// The target was resized.
    Resize,
}

/// Host capability for adding and removing event listeners.
pub trait EventRegistry: ViewportProvider {
    /// Handle identifying one listener.
    type Subscription: core::fmt::Debug;

    /// Adds a listener for `kind` on `target`.
    fn subscribe(
        &mut self,
        target: &ScrollTarget<Self::Element>,
        kind: EventKind,
    ) -> Self::Subscription;

    /// Removes a listener previously returned by [`subscribe`](Self::subscribe).
    fn unsubscribe(&mut self, subscription: Self::Subscription);
}

/// The listener handles held by one affix.
#[derive(Debug)]
pub struct Subscriptions<S> {
    handles: SmallVec<[S; 4]>,
}

impl<S> Default for Subscriptions<S> {
    fn default() -> Self {
        Self {
            handles: SmallVec::new(),
        }
    }
}

impl<S> Subscriptions<S> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no listeners are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Number of listeners held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Subscribes to `target`, releasing anything held before.
    pub fn attach<R>(&mut self, registry: &mut R, target: &ScrollTarget<R::Element>)
    where
        R: EventRegistry<Subscription = S> + ?Sized,
    {
        self.release(registry);
        self.handles.push(registry.subscribe(target, EventKind::Scroll));
        self.handles.push(registry.subscribe(target, EventKind::Resize));
        if !target.is_window() {
            self.handles
                .push(registry.subscribe(&ScrollTarget::Window, EventKind::Scroll));
            self.handles
                .push(registry.subscribe(&ScrollTarget::Window, EventKind::Resize));
        }
        tracing::debug!(listeners = self.handles.len(), "affix listeners attached");
    }

    /// Removes every held listener from `registry`.
    pub fn release<R>(&mut self, registry: &mut R)
    where
        R: EventRegistry<Subscription = S> + ?Sized,
    {
        if self.handles.is_empty() {
            return;
        }
        let count = self.handles.len();
        for handle in self.handles.drain(..) {
            registry.unsubscribe(handle);
        }
        tracing::debug!(listeners = count, "affix listeners released");
    }
}
