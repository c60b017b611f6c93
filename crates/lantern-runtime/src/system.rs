//! Motion system trait

use crate::scheduler::{Fired, Scheduler};
use lantern_core::{Result, Viewport};

/// Per-frame state handed to each system
pub struct FrameContext<'a> {
    pub scheduler: &'a mut Scheduler,
    pub viewport: Viewport,
}

impl FrameContext<'_> {
    pub fn now(&self) -> lantern_core::Millis {
        self.scheduler.now()
    }
}

/// A component that can be driven by the frame loop
///
/// Systems are mounted in registration order. Timer firings are dispatched
/// to every system until one claims them; `update` runs once per frame.
pub trait MotionSystem {
    /// Called once at mount; arm timers here
    fn initialize(&mut self, ctx: &mut FrameContext) -> Result<()>;

    /// Offered every timer firing in chronological order. Returns `true` if
    /// the timer belongs to this system.
    fn on_timer(&mut self, fired: Fired, ctx: &mut FrameContext) -> Result<bool>;

    /// Called once per frame after timers, to advance tweens
    fn update(&mut self, ctx: &mut FrameContext) -> Result<()>;

    /// Called at teardown. Must synchronously release every timer and tween
    /// the system owns, and be safe to call more than once.
    fn shutdown(&mut self, scheduler: &mut Scheduler) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
