//! The tween capability: interpolate between two visual states over time

use crate::easing::Easing;
use lantern_core::{Millis, TweenHandle};
use serde::{Deserialize, Serialize};

/// The animatable visual properties of one element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualState {
    pub opacity: f32,
    /// Horizontal translation in pixels
    pub offset_x: f32,
    /// Vertical translation in pixels
    pub offset_y: f32,
    pub scale: f32,
}

impl Default for VisualState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl VisualState {
    /// Fully opaque, untranslated, unscaled
    pub const IDENTITY: Self = Self {
        opacity: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
        scale: 1.0,
    };

    pub const fn new(opacity: f32, offset_x: f32, offset_y: f32, scale: f32) -> Self {
        Self {
            opacity,
            offset_x,
            offset_y,
            scale,
        }
    }

    /// Component-wise linear interpolation
    pub fn lerp(&self, to: &Self, t: f32) -> Self {
        Self {
            opacity: lerp(self.opacity, to.opacity, t),
            offset_x: lerp(self.offset_x, to.offset_x, t),
            offset_y: lerp(self.offset_y, to.offset_y, t),
            scale: lerp(self.scale, to.scale, t),
        }
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Everything needed to start a tween
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSpec {
    pub from: VisualState,
    pub to: VisualState,
    pub duration_ms: Millis,
    pub ease: Easing,
}

impl TweenSpec {
    /// Durations below 1 ms are clamped so every tween has a finite end.
    pub fn new(from: VisualState, to: VisualState, duration_ms: Millis, ease: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms: duration_ms.max(1),
            ease,
        }
    }

    /// Eased state at `elapsed` ms into the tween
    pub fn sample(&self, elapsed: Millis) -> VisualState {
        let t = self.linear_progress(elapsed);
        self.from.lerp(&self.to, self.ease.apply(t))
    }

    /// Un-eased time progress in [0, 1]
    pub fn linear_progress(&self, elapsed: Millis) -> f32 {
        (elapsed as f64 / self.duration_ms.max(1) as f64).min(1.0) as f32
    }
}

/// Completion notification for one tween
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Completed {
    pub handle: TweenHandle,
    /// The tween's final state
    pub state: VisualState,
}

/// Anything that can run tweens on the shared frame loop.
///
/// Every handle names at most one in-flight tween; completed and cancelled
/// handles are released and never revived.
pub trait Animator {
    /// Start a tween at `now`, returning its cancellation handle
    fn start(&mut self, spec: TweenSpec, now: Millis) -> TweenHandle;

    /// Cancel an in-flight tween. Cancelling an unknown, completed or
    /// already-cancelled handle is a no-op returning `false`.
    fn cancel(&mut self, handle: TweenHandle) -> bool;

    /// Current state of an in-flight tween
    fn sample(&self, handle: TweenHandle, now: Millis) -> Option<VisualState>;

    /// Un-eased time progress of an in-flight tween in [0, 1]
    fn progress(&self, handle: TweenHandle, now: Millis) -> Option<f32>;

    /// Release every tween whose end time is at or before `now` and report it
    fn advance(&mut self, now: Millis) -> Vec<Completed>;

    /// Number of tweens still in flight
    fn in_flight(&self) -> usize;

    /// Cancel everything, returning how many tweens were cancelled
    fn cancel_all(&mut self) -> usize;
}
