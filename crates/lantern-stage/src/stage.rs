//! One mounted session: components, scheduler, listeners

use crate::snapshot::{CardTilt, FrameSnapshot, RevealSnapshot, Resources};
use lantern_animation::{
    IntroSequencer, RevealOptions, RevealSettings, ScrollRevealController, VisibilityProvider,
};
use lantern_core::{ElementRef, Millis, MotionConfig, Rect, Result, ScrollMetrics, Viewport};
use lantern_particles::{EmitterConfig, ParticleEmitter, ParticleInstance};
use lantern_runtime::{
    AnimationClock, EventBus, EventKind, FrameContext, MotionEvent, MotionSystem, PointerTracker,
    Scheduler, Subscription,
};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// A reveal target declared by the content layer
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RevealCandidate {
    pub element: ElementRef,
    #[serde(flatten)]
    pub options: RevealOptions,
}

impl RevealCandidate {
    pub fn new(element: ElementRef) -> Self {
        Self::with_options(element, RevealOptions::default())
    }

    pub fn with_options(element: ElementRef, options: RevealOptions) -> Self {
        Self { element, options }
    }

    /// One candidate per element sharing `options`, each delayed `step_ms`
    /// more than the previous one.
    pub fn stagger(elements: &[ElementRef], step_ms: Millis, options: RevealOptions) -> Vec<Self> {
        elements
            .iter()
            .zip(0u64..)
            .map(|(element, i)| {
                let delay = options
                    .delay_ms
                    .saturating_add(step_ms.saturating_mul(i));
                Self::with_options(*element, options.delay(delay))
            })
            .collect()
    }
}

/// A card whose tilt follows the pointer while hovered
#[derive(Debug, Clone, Copy, PartialEq)]
struct TiltCard {
    element: ElementRef,
    rect: Rect,
    max_deg: f32,
}

/// The whole motion layer for one browsing session.
///
/// Everything is confined to the thread that owns the stage. Inbound events
/// are queued and only take effect in [`Stage::advance_to`], in arrival
/// order. Dropping a mounted stage tears it down.
pub struct Stage {
    config: MotionConfig,
    scheduler: Scheduler,
    bus: EventBus,
    subscriptions: Vec<Subscription>,
    viewport: Viewport,
    scroll: ScrollMetrics,
    clock: AnimationClock,
    pointer: PointerTracker,
    intro: IntroSequencer,
    particles: ParticleEmitter,
    reveals: ScrollRevealController,
    cards: Vec<TiltCard>,
    mounted: bool,
}

impl Stage {
    /// Validate the config, create every component, subscribe listeners,
    /// start the intro and the particle emitter and register reveal
    /// candidates in order.
    pub fn mount(
        config: MotionConfig,
        viewport: Viewport,
        candidates: &[RevealCandidate],
        provider: Box<dyn VisibilityProvider>,
    ) -> Result<Self> {
        config.validate()?;
        let emitter_config = EmitterConfig::from_config(&config)?;
        let reveal_settings = RevealSettings::from_config(&config)?;

        let mut stage = Self {
            scheduler: Scheduler::new(),
            bus: EventBus::new(),
            subscriptions: Vec::new(),
            viewport,
            scroll: ScrollMetrics::new(0.0, viewport.height, viewport.height),
            clock: AnimationClock::new(config.hero_fade_end),
            pointer: PointerTracker::new(),
            intro: IntroSequencer::from_config(&config),
            particles: ParticleEmitter::new(emitter_config, viewport),
            reveals: ScrollRevealController::new(reveal_settings, provider),
            cards: Vec::new(),
            config,
            mounted: true,
        };

        for kind in [EventKind::PointerMove, EventKind::Scroll, EventKind::Resize] {
            let subscription = stage.bus.subscribe(kind);
            stage.subscriptions.push(subscription);
        }

        for candidate in candidates {
            if !stage.reveals.register_with(candidate.element, candidate.options) {
                debug!(element = %candidate.element, "duplicate reveal candidate ignored");
            }
        }

        let mut ctx = FrameContext {
            scheduler: &mut stage.scheduler,
            viewport: stage.viewport,
        };
        let systems: [&mut dyn MotionSystem; 3] =
            [&mut stage.intro, &mut stage.particles, &mut stage.reveals];
        for system in systems {
            system.initialize(&mut ctx)?;
        }

        // Targets already past their enter line reveal immediately
        stage.reveals.on_scroll(&stage.scroll, 0);

        info!(
            targets = stage.reveals.targets().len(),
            width = viewport.width,
            height = viewport.height,
            "stage mounted"
        );
        Ok(stage)
    }

    /// Track a card's tilt against the pointer. A repeated element moves the
    /// existing card. Returns `false` once torn down.
    pub fn register_card(&mut self, element: ElementRef, rect: Rect, max_deg: f32) -> bool {
        if !self.mounted {
            return false;
        }
        let card = TiltCard {
            element,
            rect,
            max_deg: if max_deg.is_finite() { max_deg.abs() } else { 0.0 },
        };
        match self.cards.iter_mut().find(|c| c.element == element) {
            Some(existing) => *existing = card,
            None => self.cards.push(card),
        }
        true
    }

    /// Queue a pointer move. Returns `false` once torn down.
    pub fn pointer_moved(&mut self, x: f32, y: f32) -> bool {
        self.bus.push(MotionEvent::PointerMoved { x, y })
    }

    /// Queue a scroll update. Returns `false` once torn down.
    pub fn scrolled(&mut self, metrics: ScrollMetrics) -> bool {
        self.bus.push(MotionEvent::Scrolled(metrics))
    }

    /// Queue a viewport resize. Returns `false` once torn down.
    pub fn resized(&mut self, viewport: Viewport) -> bool {
        self.bus.push(MotionEvent::Resized(viewport))
    }

    /// Run one frame ending at `to`: apply queued events in arrival order,
    /// fire due timers chronologically, then advance every tween.
    pub fn advance_to(&mut self, to: Millis) -> Result<()> {
        if !self.mounted {
            return Ok(());
        }
        let now = self.scheduler.now();
        for event in self.bus.drain() {
            self.apply(event, now);
        }

        let fired = self.scheduler.advance_to(to);
        let mut ctx = FrameContext {
            scheduler: &mut self.scheduler,
            viewport: self.viewport,
        };
        let mut systems: [&mut dyn MotionSystem; 3] =
            [&mut self.intro, &mut self.particles, &mut self.reveals];

        for timer in fired {
            let mut claimed = false;
            for system in systems.iter_mut() {
                if system.on_timer(timer, &mut ctx)? {
                    claimed = true;
                    break;
                }
            }
            if !claimed {
                debug!(timer = %timer.id, at = timer.at, "unclaimed timer firing");
            }
        }
        for system in systems {
            system.update(&mut ctx)?;
        }

        self.clock.tick_frame();
        Ok(())
    }

    fn apply(&mut self, event: MotionEvent, now: Millis) {
        match event {
            MotionEvent::PointerMoved { x, y } => self.pointer.on_pointer_move(x, y),
            MotionEvent::Scrolled(metrics) => {
                self.scroll = metrics;
                self.clock.on_scroll(&metrics);
                self.reveals.on_scroll(&metrics, now);
            }
            MotionEvent::Resized(viewport) => {
                self.viewport = viewport;
                self.particles.set_viewport(viewport);
                self.scroll.viewport_height = viewport.height;
                self.clock.on_scroll(&self.scroll);
                self.reveals.on_scroll(&self.scroll, now);
            }
        }
    }

    /// Outbound state for the current frame
    pub fn snapshot(&self) -> FrameSnapshot {
        let now = self.scheduler.now();
        let reveals = self
            .reveals
            .targets()
            .iter()
            .filter_map(|t| {
                self.reveals
                    .visual_state(t.element, now)
                    .map(|state| RevealSnapshot {
                        element: t.element,
                        phase: t.phase,
                        state,
                    })
            })
            .collect();
        let tilts = self
            .cards
            .iter()
            .map(|card| CardTilt {
                element: card.element,
                tilt: self.pointer.tilt_for(&card.rect, card.max_deg),
            })
            .collect();

        FrameSnapshot {
            now,
            tick: self.clock.tick(),
            animation_state: self.intro.state(),
            overlay_scale: self.intro.overlay_scale(now),
            hero_opacity: self.clock.hero_opacity(),
            pointer: self.pointer.latest(),
            live_particles: self.particles.live_count(),
            reveals,
            tilts,
        }
    }

    /// Packed particle instances for the current frame
    pub fn particle_instances(&mut self) -> &[ParticleInstance] {
        let now = self.scheduler.now();
        self.particles.pack_instances(now)
    }

    /// Synchronously cancel the spawn interval, the intro timer, every
    /// particle and reveal tween, and release every listener. Idempotent.
    pub fn teardown(&mut self) -> Result<()> {
        if !self.mounted {
            return Ok(());
        }
        self.mounted = false;

        let systems: [&mut dyn MotionSystem; 3] =
            [&mut self.intro, &mut self.particles, &mut self.reveals];
        for system in systems {
            system.shutdown(&mut self.scheduler)?;
            debug!(system = system.name(), "shut down");
        }

        for subscription in self.subscriptions.drain(..) {
            self.bus.unsubscribe(&subscription);
        }
        self.bus.clear();
        self.cards.clear();

        info!(
            at = self.scheduler.now(),
            leaked_timers = self.scheduler.active_count(),
            "stage torn down"
        );
        Ok(())
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Timers, tweens, listeners and particles still attached
    pub fn resources(&self) -> Resources {
        Resources {
            timers: self.scheduler.active_count(),
            tweens: self.particles.in_flight() + self.reveals.in_flight(),
            listeners: self.bus.listener_count(),
            particles: self.particles.live_count(),
        }
    }

    pub fn now(&self) -> Millis {
        self.scheduler.now()
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn intro(&self) -> &IntroSequencer {
        &self.intro
    }

    pub fn particles(&self) -> &ParticleEmitter {
        &self.particles
    }

    pub fn reveals(&self) -> &ScrollRevealController {
        &self.reveals
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }
}

impl Drop for Stage {
    fn drop(&mut self) {
        if let Err(err) = self.teardown() {
            warn!(%err, "teardown on drop failed");
        }
    }
}
