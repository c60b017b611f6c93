//! Lantern Runtime - Frame loop infrastructure
//!
//! Provides the building blocks every motion component is driven by:
//! - `Scheduler` - virtual-time timeouts and intervals with cancellable handles
//! - `AnimationClock` - frame tick and the scroll-derived hero opacity
//! - `PointerTracker` - latest pointer coordinates and pointer-reactive tilt
//! - `MotionEvent` / `EventBus` - queued inbound events behind subscriptions
//! - `MotionSystem` - trait for components ticked by the frame loop

mod clock;
mod event;
mod event_bus;
mod pointer;
mod scheduler;
mod system;

pub use clock::{hero_opacity_for, AnimationClock, ClockTick};
pub use event::{EventKind, MotionEvent};
pub use event_bus::{EventBus, Subscription};
pub use pointer::{PointerState, PointerTracker, Tilt};
pub use scheduler::{Fired, Scheduler};
pub use system::{FrameContext, MotionSystem};
