//! Lantern Core - Foundational types for the Lantern motion layer
//!
//! This crate provides the types that all other Lantern crates depend on:
//! - `ElementRef`, `ParticleId`, `TweenHandle`, `TimerId`, `ListenerId` - opaque handles
//! - `IdAllocator` - per-arena handle issuing
//! - `Viewport`, `ScrollMetrics`, `Rect` - geometry
//! - `MotionConfig` - TOML configuration
//! - Error types and Result alias

mod config;
mod error;
mod id;
mod types;

pub use config::{EntranceCue, MotionConfig, MAX_INTRO_DURATION_MS, MAX_PARTICLE_LIFETIME_MS};
pub use error::{LanternError, Result};
pub use id::{ElementRef, IdAllocator, ListenerId, ParticleId, TimerId, TweenHandle};
pub use types::{Millis, Rect, ScrollMetrics, Viewport};
