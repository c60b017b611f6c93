//! Frame clock and the scroll-derived hero opacity

use lantern_core::ScrollMetrics;
use serde::Serialize;

/// Monotonically increasing frame identifier
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ClockTick(pub u64);

/// Linear, clamped map from scroll fraction [0, fade_end] to opacity [1, 0].
///
/// NaN fractions read as the top of the page.
pub fn hero_opacity_for(scroll_fraction: f32, fade_end: f32) -> f32 {
    if scroll_fraction.is_nan() {
        return 1.0;
    }
    let fade_end = if fade_end > 0.0 { fade_end } else { f32::EPSILON };
    (1.0 - scroll_fraction / fade_end).clamp(0.0, 1.0)
}

/// Single shared time source for per-frame values derived from scroll.
///
/// Holds no state beyond the last computed value and the tick counter.
pub struct AnimationClock {
    tick: ClockTick,
    fade_end: f32,
    hero_opacity: f32,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl AnimationClock {
    pub fn new(fade_end: f32) -> Self {
        Self {
            tick: ClockTick(0),
            fade_end,
            hero_opacity: 1.0,
        }
    }

    /// Recompute the hero opacity for a scroll update. Call on every scroll.
    pub fn on_scroll(&mut self, metrics: &ScrollMetrics) -> f32 {
        self.tick.0 += 1;
        self.hero_opacity = hero_opacity_for(metrics.scroll_fraction(), self.fade_end);
        self.hero_opacity
    }

    /// Advance the frame counter without a scroll change
    pub fn tick_frame(&mut self) -> ClockTick {
        self.tick.0 += 1;
        self.tick
    }

    pub fn hero_opacity(&self) -> f32 {
        self.hero_opacity
    }

    pub fn tick(&self) -> ClockTick {
        self.tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hero_opacity_endpoints() {
        assert_eq!(hero_opacity_for(0.0, 0.5), 1.0);
        assert_eq!(hero_opacity_for(0.5, 0.5), 0.0);
        assert!((hero_opacity_for(0.25, 0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_hero_opacity_clamps() {
        assert_eq!(hero_opacity_for(-0.3, 0.5), 1.0);
        assert_eq!(hero_opacity_for(0.75, 0.5), 0.0);
        assert_eq!(hero_opacity_for(1.0, 0.5), 0.0);
        assert_eq!(hero_opacity_for(f32::NAN, 0.5), 1.0);
    }

    #[test]
    fn test_hero_opacity_is_non_increasing() {
        let mut last = f32::INFINITY;
        for i in 0..=200 {
            let x = i as f32 / 100.0 - 0.5;
            let v = hero_opacity_for(x, 0.5);
            assert!(v <= last);
            last = v;
        }
    }

    #[test]
    fn test_clock_on_scroll() {
        let mut clock = AnimationClock::default();
        assert_eq!(clock.hero_opacity(), 1.0);

        // 1000px scrollable, 250px scrolled → fraction 0.25 → opacity 0.5
        let opacity = clock.on_scroll(&ScrollMetrics::new(250.0, 800.0, 1800.0));
        assert!((opacity - 0.5).abs() < 1e-6);
        assert_eq!(clock.tick(), ClockTick(1));

        clock.on_scroll(&ScrollMetrics::new(900.0, 800.0, 1800.0));
        assert_eq!(clock.hero_opacity(), 0.0);
        assert_eq!(clock.tick(), ClockTick(2));
    }

    #[test]
    fn test_tick_frame_is_monotonic() {
        let mut clock = AnimationClock::default();
        let a = clock.tick_frame();
        let b = clock.tick_frame();
        assert!(b > a);
    }
}
