//! Animation system for the Lantern motion layer
//!
//! Provides three pieces built on one tween capability:
//! - **Tweens**: `Animator` - (from, to, duration, easing) → cancellable handle
//!   plus a completion notification; `Timeline` is the in-memory implementation
//! - **Scroll reveals**: `ScrollRevealController` plays a one-shot transition
//!   per element as it crosses viewport thresholds
//! - **Intro**: `IntroSequencer` gates the page into `Ready` exactly once

pub mod easing;
pub mod intro;
pub mod reveal;
pub mod timeline;
pub mod tween;
pub mod visibility;

pub use easing::Easing;
pub use intro::{AnimationState, IntroSequencer};
pub use reveal::{
    RevealOptions, RevealPhase, RevealSettings, RevealTarget, ScrollRevealController,
};
pub use timeline::Timeline;
pub use tween::{Animator, Completed, TweenSpec, VisualState};
pub use visibility::{DocumentLayout, Unobserved, VisibilityProvider};
