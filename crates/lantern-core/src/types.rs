//! Geometry and time types shared across the motion layer

use serde::{Deserialize, Serialize};

/// Virtual time in whole milliseconds since the session was mounted
pub type Millis = u64;

/// Size of the visible viewport in CSS pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Copy with NaN, infinite and negative extents clamped to zero.
    ///
    /// A degenerate viewport (e.g. mid-resize) must never poison spawn
    /// positions or trajectories downstream.
    pub fn sanitized(&self) -> Self {
        Self {
            width: finite_non_negative(self.width),
            height: finite_non_negative(self.height),
        }
    }

    pub fn is_degenerate(&self) -> bool {
        let s = self.sanitized();
        s.width <= 0.0 || s.height <= 0.0
    }
}

/// Document scroll position at one instant
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollMetrics {
    /// Current vertical scroll offset
    pub offset: f32,
    /// Height of the visible viewport
    pub viewport_height: f32,
    /// Total document height
    pub content_height: f32,
}

impl ScrollMetrics {
    pub const fn new(offset: f32, viewport_height: f32, content_height: f32) -> Self {
        Self {
            offset,
            viewport_height,
            content_height,
        }
    }

    /// Total scrollable height (content minus one viewport)
    pub fn scrollable(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    /// Scroll offset as a fraction of the scrollable height, in [0, 1].
    ///
    /// Returns 0 when the document does not scroll.
    pub fn scroll_fraction(&self) -> f32 {
        let scrollable = self.scrollable();
        if !scrollable.is_finite() || scrollable <= 0.0 || !self.offset.is_finite() {
            return 0.0;
        }
        (self.offset / scrollable).clamp(0.0, 1.0)
    }
}

/// Axis-aligned rectangle in viewport coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Edges inclusive
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

fn finite_non_negative(v: f32) -> f32 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_sanitized() {
        let vp = Viewport::new(f32::NAN, -20.0).sanitized();
        assert_eq!(vp.width, 0.0);
        assert_eq!(vp.height, 0.0);
        assert!(Viewport::new(f32::INFINITY, 10.0).is_degenerate());
        assert!(!Viewport::new(1280.0, 720.0).is_degenerate());
    }

    #[test]
    fn test_scroll_fraction() {
        let m = ScrollMetrics::new(500.0, 1000.0, 3000.0);
        assert!((m.scroll_fraction() - 0.25).abs() < 1e-6);

        let past_end = ScrollMetrics::new(5000.0, 1000.0, 3000.0);
        assert_eq!(past_end.scroll_fraction(), 1.0);
    }

    #[test]
    fn test_scroll_fraction_without_scrollable_height() {
        let m = ScrollMetrics::new(100.0, 1000.0, 800.0);
        assert_eq!(m.scroll_fraction(), 0.0);
    }

    #[test]
    fn test_rect_center() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.center(), (60.0, 45.0));
    }

    #[test]
    fn test_rect_contains() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(r.contains(10.0, 20.0));
        assert!(r.contains(110.0, 70.0));
        assert!(!r.contains(9.0, 40.0));
        assert!(!r.contains(50.0, 71.0));
        assert!(!r.contains(f32::NAN, 40.0));
    }
}
