//! Lantern Particles - ambient decorative particle emitter
//!
//! Provides a self-cleaning emitter with:
//! - One particle per fixed-interval tick, spawned along the viewport's bottom edge
//! - Per-particle eased tweens that rise past the top edge while fading out
//! - Removal of each particle the moment its tween completes
//! - Instance packing for the presentation layer

pub mod emitter;
pub mod particle;
pub mod rand;

pub use emitter::{EmitterConfig, ParticleEmitter};
pub use particle::{Particle, ParticleInstance, PARTICLE_COLOR, PARTICLE_SIZE};
