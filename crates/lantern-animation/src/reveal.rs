//! Scroll-linked one-shot reveal transitions

use crate::easing::Easing;
use crate::timeline::Timeline;
use crate::tween::{Animator, TweenSpec, VisualState};
use crate::visibility::VisibilityProvider;
use lantern_core::{ElementRef, Millis, MotionConfig, Result, ScrollMetrics, TweenHandle};
use lantern_runtime::{Fired, FrameContext, MotionSystem, Scheduler};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Where a target is in its reveal cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RevealPhase {
    Hidden,
    Revealing,
    Shown,
    Reversing,
}

/// Default state before the forward transition: transparent, 50px low, 90% scale
pub const HIDDEN_STATE: VisualState = VisualState::new(0.0, 0.0, 50.0, 0.9);
pub const SHOWN_STATE: VisualState = VisualState::IDENTITY;

/// Defaults applied to every registered target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealSettings {
    pub enter_pct: f32,
    pub exit_pct: f32,
    pub duration_ms: Millis,
    pub ease: Easing,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            enter_pct: 80.0,
            exit_pct: 20.0,
            duration_ms: 1000,
            ease: Easing::Power1Out,
        }
    }
}

impl RevealSettings {
    pub fn from_config(config: &MotionConfig) -> Result<Self> {
        Ok(Self {
            enter_pct: config.reveal_enter_pct,
            exit_pct: config.reveal_exit_pct,
            duration_ms: config.reveal_duration_ms,
            ease: config.reveal_ease.parse()?,
        })
    }
}

/// Per-target overrides of the controller settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealOptions {
    pub enter_pct: Option<f32>,
    pub exit_pct: Option<f32>,
    pub duration_ms: Option<Millis>,
    /// Wait before a reveal from rest starts moving (grid stagger)
    pub delay_ms: Millis,
    /// State the target rests in while hidden
    pub hidden: Option<VisualState>,
}

impl RevealOptions {
    pub fn thresholds(mut self, enter_pct: f32, exit_pct: f32) -> Self {
        self.enter_pct = Some(enter_pct);
        self.exit_pct = Some(exit_pct);
        self
    }

    pub fn duration(mut self, duration_ms: Millis) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn delay(mut self, delay_ms: Millis) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn hidden(mut self, state: VisualState) -> Self {
        self.hidden = Some(state);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Direction {
    Forward,
    Reverse,
}

/// The tween currently moving a target along its playhead
#[derive(Debug, Clone, Copy)]
struct Transition {
    handle: TweenHandle,
    direction: Direction,
    /// Playhead when the tween started
    from_playhead_ms: Millis,
}

/// One observed element
#[derive(Debug, Clone)]
pub struct RevealTarget {
    pub element: ElementRef,
    /// Viewport fraction (from the top) that triggers the forward transition
    pub enter_threshold: f32,
    /// Viewport fraction (from the top) that triggers the reverse transition
    pub exit_threshold: f32,
    /// Length of a full hidden-to-shown transition
    pub duration_ms: Millis,
    pub delay_ms: Millis,
    pub hidden: VisualState,
    pub phase: RevealPhase,
    transition: Option<Transition>,
    /// Position on the [0, duration] hidden-to-shown timeline while at rest
    playhead_ms: Millis,
    last_position: Option<f32>,
    /// Settled state while no tween is in flight
    state: VisualState,
}

impl RevealTarget {
    fn new(element: ElementRef, settings: &RevealSettings, options: &RevealOptions) -> Self {
        let hidden = options.hidden.unwrap_or(HIDDEN_STATE);
        Self {
            element,
            enter_threshold: pct_to_fraction(options.enter_pct.unwrap_or(settings.enter_pct)),
            exit_threshold: pct_to_fraction(options.exit_pct.unwrap_or(settings.exit_pct)),
            duration_ms: options.duration_ms.unwrap_or(settings.duration_ms).max(1),
            delay_ms: options.delay_ms,
            hidden,
            phase: RevealPhase::Hidden,
            transition: None,
            playhead_ms: 0,
            last_position: None,
            state: hidden,
        }
    }

    pub fn in_flight(&self) -> bool {
        self.transition.is_some()
    }
}

fn pct_to_fraction(pct: f32) -> f32 {
    if pct.is_nan() {
        return 0.0;
    }
    (pct / 100.0).clamp(0.0, 1.0)
}

/// Plays and reverses reveal transitions as targets cross thresholds.
///
/// Owns its target set and its tweens; phases only change in `on_scroll`
/// (transition start) and `update` (transition completion).
pub struct ScrollRevealController<A: Animator = Timeline> {
    settings: RevealSettings,
    provider: Box<dyn VisibilityProvider>,
    animator: A,
    /// Registration order is preserved for the presentation layer
    targets: Vec<RevealTarget>,
}

impl ScrollRevealController<Timeline> {
    pub fn new(settings: RevealSettings, provider: Box<dyn VisibilityProvider>) -> Self {
        Self::with_animator(settings, provider, Timeline::new())
    }
}

impl<A: Animator> ScrollRevealController<A> {
    pub fn with_animator(
        settings: RevealSettings,
        provider: Box<dyn VisibilityProvider>,
        animator: A,
    ) -> Self {
        Self {
            settings,
            provider,
            animator,
            targets: Vec::new(),
        }
    }

    /// Register an element with the controller's settings
    pub fn register(&mut self, element: ElementRef) -> bool {
        self.register_with(element, RevealOptions::default())
    }

    /// Register an element with per-target overrides. Returns `false` if
    /// already registered.
    ///
    /// Without a geometry provider the target starts `Shown` so its content
    /// can never stay invisible.
    pub fn register_with(&mut self, element: ElementRef, options: RevealOptions) -> bool {
        if self.index_of(element).is_some() {
            return false;
        }
        let mut target = RevealTarget::new(element, &self.settings, &options);
        if !self.provider.available() {
            warn!(%element, "viewport geometry unavailable, revealing immediately");
            target.phase = RevealPhase::Shown;
            target.state = SHOWN_STATE;
            target.playhead_ms = target.duration_ms;
        }
        self.targets.push(target);
        true
    }

    /// Stop observing an element, cancelling its in-flight tween
    pub fn unregister(&mut self, element: ElementRef) -> bool {
        let Some(idx) = self.index_of(element) else {
            return false;
        };
        let target = self.targets.remove(idx);
        if let Some(transition) = target.transition {
            self.animator.cancel(transition.handle);
        }
        true
    }

    /// Compare every target's new position with its last one and start
    /// transitions for threshold crossings.
    ///
    /// Forward: the position falls through the enter threshold (the first
    /// observation counts as coming from below the viewport). Reverse: the
    /// position rises through the exit threshold. A crossing while a
    /// transition is in flight cancels it and resumes from the same playhead
    /// in the new direction.
    pub fn on_scroll(&mut self, scroll: &ScrollMetrics, now: Millis) {
        if !self.provider.available() {
            return;
        }
        for target in &mut self.targets {
            let Some(position) = self.provider.position(target.element, scroll) else {
                continue;
            };
            let previous = target.last_position.unwrap_or(f32::INFINITY);
            target.last_position = Some(position);

            let entered = previous > target.enter_threshold && position <= target.enter_threshold;
            let exited = previous < target.exit_threshold && position >= target.exit_threshold;

            match (entered, exited, target.phase) {
                (true, _, RevealPhase::Hidden | RevealPhase::Reversing) => {
                    play(&mut self.animator, self.settings.ease, target, Direction::Forward, now)
                }
                (_, true, RevealPhase::Shown | RevealPhase::Revealing) => {
                    play(&mut self.animator, self.settings.ease, target, Direction::Reverse, now)
                }
                _ => {}
            }
        }
    }

    /// Advance tweens and settle targets whose transition completed
    pub fn update(&mut self, now: Millis) {
        for done in self.animator.advance(now) {
            let Some(target) = self
                .targets
                .iter_mut()
                .find(|t| t.transition.is_some_and(|tr| tr.handle == done.handle))
            else {
                continue;
            };
            target.transition = None;
            target.state = done.state;
            match target.phase {
                RevealPhase::Revealing => {
                    target.phase = RevealPhase::Shown;
                    target.playhead_ms = target.duration_ms;
                }
                RevealPhase::Reversing => {
                    target.phase = RevealPhase::Hidden;
                    target.playhead_ms = 0;
                }
                _ => {}
            }
            debug!(element = %target.element, phase = ?target.phase, "reveal settled");
        }
    }

    pub fn phase(&self, element: ElementRef) -> Option<RevealPhase> {
        self.target(element).map(|t| t.phase)
    }

    /// Current visual state of a target, mid-tween or settled
    pub fn visual_state(&self, element: ElementRef, now: Millis) -> Option<VisualState> {
        let target = self.target(element)?;
        Some(current_state(&self.animator, target, now))
    }

    /// Position of a target on its hidden-to-shown timeline, in [0, duration]
    pub fn playhead(&self, element: ElementRef, now: Millis) -> Option<Millis> {
        let target = self.target(element)?;
        Some(current_playhead(&self.animator, target, now))
    }

    pub fn target(&self, element: ElementRef) -> Option<&RevealTarget> {
        self.targets.iter().find(|t| t.element == element)
    }

    /// Targets in registration order
    pub fn targets(&self) -> &[RevealTarget] {
        &self.targets
    }

    pub fn in_flight(&self) -> usize {
        self.animator.in_flight()
    }

    /// Cancel every tween and forget every target. Safe to call repeatedly.
    pub fn teardown(&mut self) -> usize {
        let cancelled = self.animator.cancel_all();
        self.targets.clear();
        cancelled
    }

    fn index_of(&self, element: ElementRef) -> Option<usize> {
        self.targets.iter().position(|t| t.element == element)
    }
}

fn current_state<A: Animator>(animator: &A, target: &RevealTarget, now: Millis) -> VisualState {
    target
        .transition
        .and_then(|tr| animator.sample(tr.handle, now))
        .unwrap_or(target.state)
}

fn current_playhead<A: Animator>(animator: &A, target: &RevealTarget, now: Millis) -> Millis {
    let Some(tr) = target.transition else {
        return target.playhead_ms;
    };
    let covered = f64::from(animator.progress(tr.handle, now).unwrap_or(1.0));
    let start = tr.from_playhead_ms;
    match tr.direction {
        Direction::Forward => {
            let span = target.duration_ms.saturating_sub(start);
            start.saturating_add((span as f64 * covered).round() as Millis)
        }
        Direction::Reverse => start.saturating_sub((start as f64 * covered).round() as Millis),
    }
    .min(target.duration_ms)
}

/// Start a transition on `target` from its current playhead, replacing any
/// in-flight one.
fn play<A: Animator>(
    animator: &mut A,
    ease: Easing,
    target: &mut RevealTarget,
    direction: Direction,
    now: Millis,
) {
    let from = current_state(animator, target, now);
    let playhead = current_playhead(animator, target, now);
    let from_rest = target.transition.is_none() && target.phase == RevealPhase::Hidden;
    if let Some(running) = target.transition.take() {
        animator.cancel(running.handle);
    }

    let (to, phase, duration_ms, delay_ms) = match direction {
        Direction::Forward => (
            SHOWN_STATE,
            RevealPhase::Revealing,
            target.duration_ms - playhead,
            if from_rest { target.delay_ms } else { 0 },
        ),
        Direction::Reverse => (target.hidden, RevealPhase::Reversing, playhead, 0),
    };
    let spec = TweenSpec::new(from, to, duration_ms, ease);
    let handle = animator.start(spec, now.saturating_add(delay_ms));
    target.transition = Some(Transition {
        handle,
        direction,
        from_playhead_ms: playhead,
    });
    target.playhead_ms = playhead;
    target.state = from;
    target.phase = phase;
    debug!(
        element = %target.element,
        ?direction,
        playhead,
        duration_ms = spec.duration_ms,
        delay_ms,
        "reveal transition"
    );
}

impl<A: Animator> MotionSystem for ScrollRevealController<A> {
    fn initialize(&mut self, _ctx: &mut FrameContext) -> Result<()> {
        info!(targets = self.targets.len(), "reveal controller mounted");
        Ok(())
    }

    fn on_timer(&mut self, _fired: Fired, _ctx: &mut FrameContext) -> Result<bool> {
        // Reveals are driven by scroll, never by timers
        Ok(false)
    }

    fn update(&mut self, ctx: &mut FrameContext) -> Result<()> {
        let now = ctx.now();
        Self::update(self, now);
        Ok(())
    }

    fn shutdown(&mut self, _scheduler: &mut Scheduler) -> Result<()> {
        let cancelled = self.teardown();
        if cancelled > 0 {
            debug!(cancelled, "cancelled in-flight reveal tweens");
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "reveal"
    }
}
