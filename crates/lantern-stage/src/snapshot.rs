//! Outbound visual state handed to the presentation layer

use lantern_animation::{AnimationState, RevealPhase, VisualState};
use lantern_core::{ElementRef, Millis};
use lantern_runtime::{ClockTick, PointerState, Tilt};
use serde::Serialize;

/// Visual state of one reveal target
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RevealSnapshot {
    pub element: ElementRef,
    pub phase: RevealPhase,
    pub state: VisualState,
}

/// Pointer tilt of one registered card
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardTilt {
    pub element: ElementRef,
    pub tilt: Tilt,
}

/// Everything the presentation layer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub now: Millis,
    pub tick: ClockTick,
    /// Drives whether the loading overlay is shown
    pub animation_state: AnimationState,
    pub overlay_scale: f32,
    /// Drives the hero background fade
    pub hero_opacity: f32,
    pub pointer: PointerState,
    pub live_particles: usize,
    /// In registration order
    pub reveals: Vec<RevealSnapshot>,
    /// In registration order
    pub tilts: Vec<CardTilt>,
}

/// Attached resources, for leak checks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Resources {
    pub timers: usize,
    pub tweens: usize,
    pub listeners: usize,
    pub particles: usize,
}

impl Resources {
    pub fn is_empty(&self) -> bool {
        *self == Resources::default()
    }
}
