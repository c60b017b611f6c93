//! Emitter configuration and the ambient particle emitter

use crate::particle::{Particle, ParticleInstance};
use crate::rand::ParticleRng;
use lantern_animation::{Animator, Easing, Timeline, TweenSpec, VisualState};
use lantern_core::{
    IdAllocator, Millis, MotionConfig, ParticleId, Result, TimerId, TweenHandle, Viewport,
};
use lantern_runtime::{Fired, FrameContext, MotionSystem, Scheduler};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, warn};

/// The instance buffer grows past this on demand
const MAX_PREALLOCATED_INSTANCES: usize = 1024;

/// Emitter tunables, derived from `MotionConfig`
#[derive(Debug, Clone, PartialEq)]
pub struct EmitterConfig {
    pub interval_ms: Millis,
    pub lifetime_min_ms: Millis,
    pub lifetime_max_ms: Millis,
    /// Distance travelled past the top edge
    pub overshoot_px: f32,
    /// Horizontal drift is drawn from [-drift_px, drift_px]
    pub drift_px: f32,
    pub ease: Easing,
    pub seed: u32,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            interval_ms: 100,
            lifetime_min_ms: 5000,
            lifetime_max_ms: 10_000,
            overshoot_px: 100.0,
            drift_px: 100.0,
            ease: Easing::Power2Out,
            seed: 0xDEAD_BEEF,
        }
    }
}

impl EmitterConfig {
    pub fn from_config(config: &MotionConfig) -> Result<Self> {
        let [lifetime_min_ms, lifetime_max_ms] = config.particle_lifetime_range_ms;
        Ok(Self {
            interval_ms: config.particle_interval_ms,
            lifetime_min_ms,
            lifetime_max_ms,
            overshoot_px: config.particle_overshoot_px,
            drift_px: config.particle_drift_px,
            ease: config.particle_ease.parse()?,
            seed: config.particle_seed,
        })
    }

    /// Upper bound on simultaneously live particles
    pub fn max_live(&self) -> usize {
        let interval = self.interval_ms.max(1);
        let lifetime = self.lifetime_max_ms.max(self.lifetime_min_ms);
        usize::try_from(lifetime.div_ceil(interval).saturating_add(1)).unwrap_or(usize::MAX)
    }
}

/// Spawns one particle per interval tick and retires each particle the
/// moment its animation completes.
///
/// The emitter exclusively owns its particles, their tweens and its spawn
/// timer. `teardown` releases all three synchronously.
pub struct ParticleEmitter<A: Animator = Timeline> {
    config: EmitterConfig,
    rng: ParticleRng,
    animator: A,
    ids: IdAllocator,
    particles: BTreeMap<ParticleId, Particle>,
    by_tween: HashMap<TweenHandle, ParticleId>,
    spawn_timer: Option<TimerId>,
    viewport: Viewport,
    warned_degenerate: bool,
    spawned: u64,
    removed: u64,
    peak_live: usize,
    /// Pre-allocated instance buffer for packing live particles
    instance_buffer: Vec<ParticleInstance>,
}

impl ParticleEmitter<Timeline> {
    pub fn new(config: EmitterConfig, viewport: Viewport) -> Self {
        Self::with_animator(config, viewport, Timeline::new())
    }
}

impl<A: Animator> ParticleEmitter<A> {
    pub fn with_animator(config: EmitterConfig, viewport: Viewport, animator: A) -> Self {
        let rng = ParticleRng::new(config.seed);
        let capacity = config.max_live().min(MAX_PREALLOCATED_INSTANCES);
        Self {
            config,
            rng,
            animator,
            ids: IdAllocator::new(),
            particles: BTreeMap::new(),
            by_tween: HashMap::new(),
            spawn_timer: None,
            viewport,
            warned_degenerate: false,
            spawned: 0,
            removed: 0,
            peak_live: 0,
            instance_buffer: Vec::with_capacity(capacity),
        }
    }

    /// Arm the spawn interval. Returns `false` if already running.
    pub fn start(&mut self, scheduler: &mut Scheduler) -> bool {
        if self.spawn_timer.is_some() {
            return false;
        }
        self.spawn_timer = Some(scheduler.set_interval(self.config.interval_ms));
        debug!(interval_ms = self.config.interval_ms, "particle emitter started");
        true
    }

    pub fn is_running(&self) -> bool {
        self.spawn_timer.is_some()
    }

    /// New particles use the latest viewport; live ones keep their trajectory.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Handle a timer firing. When it is the spawn tick, retire particles
    /// that finished by then and spawn exactly one new particle.
    pub fn on_fired(&mut self, fired: Fired) -> Option<ParticleId> {
        if self.spawn_timer != Some(fired.id) {
            return None;
        }
        self.update(fired.at);
        Some(self.spawn_at(fired.at))
    }

    /// Spawn one particle at `now` at the bottom edge of the viewport.
    ///
    /// Never fails: a degenerate viewport collapses spawn position and
    /// travel to zero rather than producing NaN.
    pub fn spawn_at(&mut self, now: Millis) -> ParticleId {
        let viewport = self.viewport.sanitized();
        if self.viewport.is_degenerate() && !self.warned_degenerate {
            warn!(viewport = ?self.viewport, "degenerate viewport, clamping particle geometry");
            self.warned_degenerate = true;
        }

        let spawn_x = self.rng.range(0.0, viewport.width);
        let initial_opacity = self.rng.next_f32();
        let drift = self.config.drift_px.max(0.0);
        let horizontal_drift = self.rng.range(-drift, drift);
        let lifetime_ms = self
            .rng
            .range_u64(self.config.lifetime_min_ms, self.config.lifetime_max_ms)
            .max(1);

        let from = VisualState::new(initial_opacity, 0.0, 0.0, 1.0);
        let to = VisualState::new(
            0.0,
            horizontal_drift,
            -(viewport.height + self.config.overshoot_px.max(0.0)),
            1.0,
        );
        let tween = self
            .animator
            .start(TweenSpec::new(from, to, lifetime_ms, self.config.ease), now);

        let id: ParticleId = self.ids.next();
        self.particles.insert(
            id,
            Particle {
                id,
                spawn_x,
                spawn_y: viewport.height,
                initial_opacity,
                horizontal_drift,
                lifetime_ms,
                created_at: now,
                tween,
            },
        );
        self.by_tween.insert(tween, id);
        self.spawned += 1;
        self.peak_live = self.peak_live.max(self.particles.len());
        id
    }

    /// Advance particle tweens to `now`, removing every particle whose
    /// animation completed. Returns the number removed.
    pub fn update(&mut self, now: Millis) -> usize {
        let mut removed = 0;
        for done in self.animator.advance(now) {
            let Some(id) = self.by_tween.remove(&done.handle) else {
                continue;
            };
            if self.particles.remove(&id).is_some() {
                removed += 1;
            }
        }
        self.removed += removed as u64;
        removed
    }

    /// Cancel the spawn interval and every in-flight particle tween, and
    /// drop all particles. Safe to call repeatedly. Returns the number of
    /// particles discarded.
    pub fn teardown(&mut self, scheduler: &mut Scheduler) -> usize {
        if let Some(timer) = self.spawn_timer.take() {
            scheduler.cancel(timer);
        }
        self.animator.cancel_all();
        self.by_tween.clear();
        self.instance_buffer.clear();
        let discarded = self.particles.len();
        self.particles.clear();
        discarded
    }

    pub fn live_count(&self) -> usize {
        self.particles.len()
    }

    pub fn spawned_total(&self) -> u64 {
        self.spawned
    }

    pub fn removed_total(&self) -> u64 {
        self.removed
    }

    pub fn peak_live(&self) -> usize {
        self.peak_live
    }

    pub fn in_flight(&self) -> usize {
        self.animator.in_flight()
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Live particles in spawn order
    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.values()
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(&id)
    }

    pub fn visual_state(&self, id: ParticleId, now: Millis) -> Option<VisualState> {
        let particle = self.particles.get(&id)?;
        self.animator.sample(particle.tween, now)
    }

    /// Pack every live particle into the instance buffer
    pub fn pack_instances(&mut self, now: Millis) -> &[ParticleInstance] {
        self.instance_buffer.clear();
        for particle in self.particles.values() {
            if let Some(state) = self.animator.sample(particle.tween, now) {
                self.instance_buffer
                    .push(ParticleInstance::from_particle(particle, &state));
            }
        }
        &self.instance_buffer
    }
}

impl<A: Animator> MotionSystem for ParticleEmitter<A> {
    fn initialize(&mut self, ctx: &mut FrameContext) -> Result<()> {
        self.set_viewport(ctx.viewport);
        self.start(ctx.scheduler);
        Ok(())
    }

    fn on_timer(&mut self, fired: Fired, _ctx: &mut FrameContext) -> Result<bool> {
        Ok(self.on_fired(fired).is_some())
    }

    fn update(&mut self, ctx: &mut FrameContext) -> Result<()> {
        Self::update(self, ctx.now());
        Ok(())
    }

    fn shutdown(&mut self, scheduler: &mut Scheduler) -> Result<()> {
        let discarded = self.teardown(scheduler);
        info!(
            spawned = self.spawned,
            removed = self.removed,
            discarded,
            "particle emitter shut down"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "particles"
    }
}
