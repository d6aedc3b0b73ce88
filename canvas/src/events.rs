//! Typed events published to the integrating application.
//!
//! Handlers are registered on an [`EventBus`] and receive the event payload by
//! reference. Publishing is synchronous and happens only after the gesture
//! that produced the event has completed, so handlers never observe a
//! half-applied drag.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use serde::Serialize;

use crate::doc::ItemId;

/// A palette template was dropped on the canvas. The application decides the
/// new item's identity and inserts it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementRequested {
    /// Kind of the dropped template.
    pub kind: String,
    /// Drop position in canvas-local pixels.
    pub x: f64,
    pub y: f64,
}

/// A canvas item finished a drag.
///
/// `index` is the item's position in document order at drag stop. It shifts
/// when earlier items are inserted or removed; `id` is stable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemMoved {
    pub index: usize,
    pub id: ItemId,
    /// Final position in canvas-local pixels.
    pub x: f64,
    pub y: f64,
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<E> = Box<dyn FnMut(&E)>;

/// Single-threaded publish/subscribe list for one event type.
pub struct EventBus<E> {
    handlers: Vec<(SubscriptionId, Handler<E>)>,
    next_id: u64,
}

impl<E> EventBus<E> {
    #[must_use]
    pub fn new() -> Self {
        Self { handlers: Vec::new(), next_id: 0 }
    }

    /// Register a handler. Handlers run in subscription order.
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&E) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Remove a handler. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(sid, _)| *sid != id);
        self.handlers.len() != before
    }

    /// Deliver `event` to every handler.
    pub fn publish(&mut self, event: &E) {
        tracing::trace!(subscribers = self.handlers.len(), "publishing event");
        for (_, handler) in &mut self.handlers {
            handler(event);
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }

    /// Drop all handlers.
    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}
