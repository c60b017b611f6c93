//! Inbound events delivered to the motion layer

use lantern_core::{ScrollMetrics, Viewport};

/// An inbound event from the host page
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionEvent {
    PointerMoved { x: f32, y: f32 },
    Scrolled(ScrollMetrics),
    Resized(Viewport),
}

/// Discriminant used for subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerMove,
    Scroll,
    Resize,
}

impl MotionEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            MotionEvent::PointerMoved { .. } => EventKind::PointerMove,
            MotionEvent::Scrolled(_) => EventKind::Scroll,
            MotionEvent::Resized(_) => EventKind::Resize,
        }
    }
}
