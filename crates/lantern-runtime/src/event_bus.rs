//! Event bus with explicit subscribe/unsubscribe contracts

use crate::event::{EventKind, MotionEvent};
use lantern_core::{IdAllocator, ListenerId};
use std::collections::HashMap;

/// Cancellation handle for one listener. Pass it back to
/// [`EventBus::unsubscribe`] to release the listener.
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription {
    id: ListenerId,
    kind: EventKind,
}

impl Subscription {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

/// A queue that the host pushes to and the frame loop drains.
///
/// Events of a kind nobody listens to are dropped at the door, so after all
/// subscriptions are released the bus accepts nothing.
pub struct EventBus {
    ids: IdAllocator,
    listeners: HashMap<ListenerId, EventKind>,
    events: Vec<MotionEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            ids: IdAllocator::new(),
            listeners: HashMap::new(),
            events: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, kind: EventKind) -> Subscription {
        let id: ListenerId = self.ids.next();
        self.listeners.insert(id, kind);
        Subscription { id, kind }
    }

    /// Release a listener. Returns `false` if it was already released.
    pub fn unsubscribe(&mut self, subscription: &Subscription) -> bool {
        self.listeners.remove(&subscription.id).is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn is_observed(&self, kind: EventKind) -> bool {
        self.listeners.values().any(|k| *k == kind)
    }

    /// Queue an event. Returns whether any listener accepted it.
    pub fn push(&mut self, event: MotionEvent) -> bool {
        if !self.is_observed(event.kind()) {
            return false;
        }
        self.events.push(event);
        true
    }

    /// Drain all events in arrival order
    pub fn drain(&mut self) -> Vec<MotionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Drop pending events and every listener
    pub fn clear(&mut self) {
        self.events.clear();
        self.listeners.clear();
    }
}
