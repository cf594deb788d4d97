// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed event streams with explicit subscribe/unsubscribe.
//!
//! A [`Signal`] holds handlers keyed by a caller-chosen [`SubscriberId`].
//! Subscribing again with the same id replaces the previous handler, so a
//! subscriber is registered at most once; [`Signal::unsubscribe`] removes it
//! exactly once. Handlers run in subscription order.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use understory_keyboard::{Signal, SubscriberId};
//!
//! let seen = Rc::new(Cell::new(0.0));
//! let mut heights: Signal<f64> = Signal::new();
//!
//! let sink = seen.clone();
//! heights.subscribe(SubscriberId(1), move |h| sink.set(*h));
//! heights.emit(&216.0);
//! assert_eq!(seen.get(), 216.0);
//!
//! assert!(heights.unsubscribe(SubscriberId(1)));
//! assert!(!heights.unsubscribe(SubscriberId(1)));
//! heights.emit(&300.0);
//! assert_eq!(seen.get(), 216.0);
//! ```

use alloc::boxed::Box;
use smallvec::SmallVec;

/// Identity of a subscriber to a [`Signal`].
///
/// The host owns the meaning of these values; any stable per-subscriber
/// number works (for example a widget id or a counter).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(pub u64);

type Handler<T> = Box<dyn FnMut(&T)>;

/// A typed event stream.
pub struct Signal<T> {
    handlers: SmallVec<[(SubscriberId, Handler<T>); 2]>,
}

impl<T> Signal<T> {
    /// Create a signal with no subscribers.
    pub fn new() -> Self {
        Self {
            handlers: SmallVec::new(),
        }
    }

    /// Register `handler` for `id`.
    ///
    /// Returns `true` if `id` was not subscribed before. An existing handler
    /// for the same id is replaced in place and keeps its position.
    pub fn subscribe(&mut self, id: SubscriberId, handler: impl FnMut(&T) + 'static) -> bool {
        if let Some(slot) = self.handlers.iter_mut().find(|(sid, _)| *sid == id) {
            slot.1 = Box::new(handler);
            return false;
        }
        self.handlers.push((id, Box::new(handler)));
        true
    }

    /// Remove the handler for `id`. Returns `true` if one was removed.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        match self.handlers.iter().position(|(sid, _)| *sid == id) {
            Some(pos) => {
                self.handlers.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Returns `true` if `id` currently has a handler.
    pub fn is_subscribed(&self, id: SubscriberId) -> bool {
        self.handlers.iter().any(|(sid, _)| *sid == id)
    }

    /// Number of subscribers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if nobody is subscribed.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Invoke every handler with `value`.
    pub fn emit(&mut self, value: &T) {
        for (_, handler) in &mut self.handlers {
            handler(value);
        }
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> core::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.handlers.iter().map(|(id, _)| id))
            .finish()
    }
}
