//! Boot sequence that gates the page into its ready state

use crate::easing::Easing;
use lantern_core::{EntranceCue, Millis, MotionConfig, Result, TimerId, MAX_INTRO_DURATION_MS};
use lantern_runtime::{Fired, FrameContext, MotionSystem, Scheduler};
use serde::Serialize;
use tracing::{debug, info};

/// Whether the loading overlay is still up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnimationState {
    Loading,
    Ready,
}

/// Period of the overlay title pulse (1 → 1.05 → 1)
const PULSE_PERIOD_MS: Millis = 2000;
const PULSE_AMPLITUDE: f32 = 0.05;

/// Runs the fixed-duration intro, then flips to `Ready` exactly once.
pub struct IntroSequencer {
    duration_ms: Millis,
    state: AnimationState,
    timer: Option<TimerId>,
    started_at: Option<Millis>,
    ready_at: Option<Millis>,
    cues: Vec<EntranceCue>,
    cue_ease: Easing,
}

impl IntroSequencer {
    /// The duration is clamped to [1, MAX_INTRO_DURATION_MS] so the ready
    /// transition always happens.
    pub fn new(duration_ms: Millis) -> Self {
        Self {
            duration_ms: duration_ms.clamp(1, MAX_INTRO_DURATION_MS),
            state: AnimationState::Loading,
            timer: None,
            started_at: None,
            ready_at: None,
            cues: Vec::new(),
            cue_ease: Easing::Power1Out,
        }
    }

    pub fn from_config(config: &MotionConfig) -> Self {
        Self::new(config.intro_duration_ms).with_cues(config.entrance_cues.clone())
    }

    pub fn with_cues(mut self, cues: Vec<EntranceCue>) -> Self {
        self.cues = cues;
        self
    }

    /// Begin the intro. Only the first call has any effect; later calls
    /// while loading or after ready return `false`.
    pub fn start(&mut self, scheduler: &mut Scheduler) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        self.state = AnimationState::Loading;
        self.started_at = Some(scheduler.now());
        self.timer = Some(scheduler.set_timeout(self.duration_ms));
        debug!(duration_ms = self.duration_ms, "intro started");
        true
    }

    /// Handle a timer firing. Returns `true` if it was the intro timer.
    pub fn on_fired(&mut self, fired: Fired) -> bool {
        if self.timer != Some(fired.id) {
            return false;
        }
        self.timer = None;
        if self.state == AnimationState::Loading {
            self.state = AnimationState::Ready;
            self.ready_at = Some(fired.at);
            info!(at = fired.at, "intro complete, content ready");
        }
        true
    }

    /// Cancel a pending intro timer. Safe to call repeatedly.
    pub fn cancel(&mut self, scheduler: &mut Scheduler) -> bool {
        match self.timer.take() {
            Some(id) => scheduler.cancel(id),
            None => false,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == AnimationState::Ready
    }

    pub fn started_at(&self) -> Option<Millis> {
        self.started_at
    }

    pub fn ready_at(&self) -> Option<Millis> {
        self.ready_at
    }

    pub fn duration_ms(&self) -> Millis {
        self.duration_ms
    }

    pub fn has_pending_timer(&self) -> bool {
        self.timer.is_some()
    }

    /// Scale of the loading overlay title at `now`
    pub fn overlay_scale(&self, now: Millis) -> f32 {
        let Some(started) = self.started_at else {
            return 1.0;
        };
        if self.is_ready() {
            return 1.0;
        }
        let t = (now.saturating_sub(started) % PULSE_PERIOD_MS) as f32 / PULSE_PERIOD_MS as f32;
        let swell = 1.0 - (2.0 * t - 1.0).abs();
        1.0 + PULSE_AMPLITUDE * Easing::Power1InOut.apply(swell)
    }

    /// Eased progress of a named entrance cue, measured from intro start.
    /// `None` if no such cue exists.
    pub fn cue_progress(&self, name: &str, now: Millis) -> Option<f32> {
        let cue = self.cues.iter().find(|c| c.name == name)?;
        let Some(started) = self.started_at else {
            return Some(0.0);
        };
        let elapsed = now.saturating_sub(started.saturating_add(cue.delay_ms));
        let t = elapsed as f32 / cue.duration_ms.max(1) as f32;
        Some(self.cue_ease.apply(t))
    }

    pub fn cues(&self) -> &[EntranceCue] {
        &self.cues
    }
}

impl MotionSystem for IntroSequencer {
    fn initialize(&mut self, ctx: &mut FrameContext) -> Result<()> {
        self.start(ctx.scheduler);
        Ok(())
    }

    fn on_timer(&mut self, fired: Fired, _ctx: &mut FrameContext) -> Result<bool> {
        Ok(self.on_fired(fired))
    }

    fn update(&mut self, _ctx: &mut FrameContext) -> Result<()> {
        Ok(())
    }

    fn shutdown(&mut self, scheduler: &mut Scheduler) -> Result<()> {
        self.cancel(scheduler);
        Ok(())
    }

    fn name(&self) -> &str {
        "intro"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(intro: &mut IntroSequencer, sched: &mut Scheduler, to: Millis) {
        for fired in sched.advance_to(to) {
            intro.on_fired(fired);
        }
    }

    #[test]
    fn loading_until_duration_elapses() {
        let mut sched = Scheduler::new();
        let mut intro = IntroSequencer::new(2000);
        assert_eq!(intro.state(), AnimationState::Loading);
        assert!(intro.start(&mut sched));

        run(&mut intro, &mut sched, 1999);
        assert_eq!(intro.state(), AnimationState::Loading);

        run(&mut intro, &mut sched, 2000);
        assert_eq!(intro.state(), AnimationState::Ready);
        assert_eq!(intro.ready_at(), Some(2000));
        assert!(!intro.has_pending_timer());
        assert_eq!(sched.active_count(), 0);
    }

    #[test]
    fn redundant_starts_are_ignored() {
        let mut sched = Scheduler::new();
        let mut intro = IntroSequencer::new(2000);
        assert!(intro.start(&mut sched));
        run(&mut intro, &mut sched, 500);
        assert!(!intro.start(&mut sched));
        assert_eq!(sched.active_count(), 1);

        run(&mut intro, &mut sched, 2500);
        assert!(!intro.start(&mut sched));
        assert_eq!(intro.ready_at(), Some(2000));
        assert_eq!(sched.active_count(), 0);
    }

    #[test]
    fn foreign_timers_are_not_claimed() {
        let mut sched = Scheduler::new();
        let other = sched.set_timeout(10);
        let mut intro = IntroSequencer::new(2000);
        intro.start(&mut sched);
        assert!(!intro.on_fired(Fired { id: other, at: 10 }));
        assert!(!intro.is_ready());
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut sched = Scheduler::new();
        let mut intro = IntroSequencer::new(2000);
        intro.start(&mut sched);
        assert!(intro.cancel(&mut sched));
        assert!(!intro.cancel(&mut sched));
        assert_eq!(sched.active_count(), 0);
    }

    #[test]
    fn duration_is_bounded() {
        assert_eq!(IntroSequencer::new(0).duration_ms(), 1);
        assert_eq!(
            IntroSequencer::new(u64::MAX).duration_ms(),
            MAX_INTRO_DURATION_MS
        );
    }

    #[test]
    fn overlay_pulses_while_loading() {
        let mut sched = Scheduler::new();
        let mut intro = IntroSequencer::new(2000);
        intro.start(&mut sched);
        assert!((intro.overlay_scale(0) - 1.0).abs() < 1e-6);
        assert!((intro.overlay_scale(1000) - 1.05).abs() < 1e-6);
        let quarter = intro.overlay_scale(500);
        assert!(quarter > 1.0 && quarter < 1.05);

        run(&mut intro, &mut sched, 2000);
        assert_eq!(intro.overlay_scale(3000), 1.0);
    }

    #[test]
    fn entrance_cues_follow_intro_start() {
        let mut sched = Scheduler::new();
        let mut intro = IntroSequencer::from_config(&MotionConfig::default());
        assert_eq!(intro.cue_progress("header", 0), Some(0.0));
        intro.start(&mut sched);

        assert_eq!(intro.cue_progress("header", 1999), Some(0.0));
        let mid = intro.cue_progress("header", 2500).unwrap();
        assert!((mid - 0.75).abs() < 1e-6);
        assert_eq!(intro.cue_progress("header", 3000), Some(1.0));
        assert_eq!(intro.cue_progress("hero.cta", 4000), Some(1.0));
        assert_eq!(intro.cue_progress("footer", 4000), None);
    }
}
