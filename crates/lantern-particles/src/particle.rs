//! Particle types: simulation state and packed instance data

use bytemuck::{Pod, Zeroable};
use lantern_animation::VisualState;
use lantern_core::{Millis, ParticleId, TweenHandle};

/// Square particle edge in pixels
pub const PARTICLE_SIZE: f32 = 4.0;
/// Warm brown (#8b4513)
pub const PARTICLE_COLOR: [f32; 3] = [139.0 / 255.0, 69.0 / 255.0, 19.0 / 255.0];

/// One decorative particle. Owned by its emitter from spawn until its
/// animation completes.
#[derive(Debug, Clone)]
pub struct Particle {
    pub id: ParticleId,
    /// Horizontal spawn position, uniform over the viewport width
    pub spawn_x: f32,
    /// Vertical spawn position: the viewport's bottom edge
    pub spawn_y: f32,
    pub initial_opacity: f32,
    /// Total horizontal displacement over the lifetime
    pub horizontal_drift: f32,
    pub lifetime_ms: Millis,
    pub created_at: Millis,
    pub(crate) tween: TweenHandle,
}

impl Particle {
    pub fn expires_at(&self) -> Millis {
        self.created_at.saturating_add(self.lifetime_ms)
    }

    /// Position in viewport pixels given the particle's current visual state
    pub fn position(&self, state: &VisualState) -> (f32, f32) {
        (self.spawn_x + state.offset_x, self.spawn_y + state.offset_y)
    }
}

/// Packed instance data for the presentation layer.
/// 32 bytes, two rows of vec4.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ParticleInstance {
    /// Viewport position + size packed into vec4
    pub pos_size: [f32; 4], // xy = position, z = size, w = unused
    /// Color with current alpha
    pub color: [f32; 4], // rgba
}

impl ParticleInstance {
    pub fn from_particle(p: &Particle, state: &VisualState) -> Self {
        let (x, y) = p.position(state);
        Self {
            pos_size: [x, y, PARTICLE_SIZE * state.scale, 0.0],
            color: [
                PARTICLE_COLOR[0],
                PARTICLE_COLOR[1],
                PARTICLE_COLOR[2],
                state.opacity.clamp(0.0, 1.0),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle() -> Particle {
        Particle {
            id: ParticleId::from_raw(1),
            spawn_x: 100.0,
            spawn_y: 720.0,
            initial_opacity: 0.5,
            horizontal_drift: -20.0,
            lifetime_ms: 5000,
            created_at: 1000,
            tween: TweenHandle::from_raw(1),
        }
    }

    #[test]
    fn expiry_saturates() {
        let mut p = particle();
        assert_eq!(p.expires_at(), 6000);
        p.created_at = u64::MAX - 10;
        assert_eq!(p.expires_at(), u64::MAX);
    }

    #[test]
    fn instance_packs_offset_position() {
        let p = particle();
        let state = VisualState::new(0.25, -10.0, -400.0, 1.0);
        let inst = ParticleInstance::from_particle(&p, &state);
        assert_eq!(inst.pos_size, [90.0, 320.0, PARTICLE_SIZE, 0.0]);
        assert_eq!(inst.color[3], 0.25);
    }

    #[test]
    fn particle_instance_layout() {
        assert_eq!(std::mem::size_of::<ParticleInstance>(), 32);
        assert_eq!(std::mem::align_of::<ParticleInstance>(), 4);
        let instances = [ParticleInstance::zeroed(); 2];
        let bytes: &[u8] = bytemuck::cast_slice(&instances);
        assert_eq!(bytes.len(), 64);
    }
}
