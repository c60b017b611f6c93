//! Pointer tracking for ambient pointer-reactive effects

use lantern_core::Rect;
use serde::Serialize;

/// Latest pointer coordinates in viewport pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

/// Card tilt angles derived from the pointer position
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Tilt {
    /// Rotation around the horizontal axis, positive tips the top away
    pub x_deg: f32,
    /// Rotation around the vertical axis, positive tips the right side away
    pub y_deg: f32,
}

/// Single writer of `PointerState`. Never schedules animation work.
#[derive(Default)]
pub struct PointerTracker {
    state: PointerState,
    moves: u64,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the pointer state. Non-finite coordinates are dropped.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        self.state = PointerState { x, y };
        self.moves += 1;
    }

    pub fn latest(&self) -> PointerState {
        self.state
    }

    /// Number of accepted pointer-move events
    pub fn move_count(&self) -> u64 {
        self.moves
    }

    /// Tilt for a card occupying `rect`, each axis proportional to the
    /// pointer's offset from the card centre and clamped to `±max_deg`.
    /// Flat unless the pointer is over the card.
    pub fn tilt_for(&self, rect: &Rect, max_deg: f32) -> Tilt {
        if rect.width <= 0.0 || rect.height <= 0.0 || self.moves == 0 {
            return Tilt::default();
        }
        if !rect.contains(self.state.x, self.state.y) {
            return Tilt::default();
        }
        let (cx, cy) = rect.center();
        let nx = ((self.state.x - cx) / (rect.width * 0.5)).clamp(-1.0, 1.0);
        let ny = ((self.state.y - cy) / (rect.height * 0.5)).clamp(-1.0, 1.0);
        Tilt {
            x_deg: -ny * max_deg,
            y_deg: nx * max_deg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_move_wins() {
        let mut tracker = PointerTracker::new();
        tracker.on_pointer_move(10.0, 20.0);
        tracker.on_pointer_move(30.0, 40.0);
        assert_eq!(tracker.latest(), PointerState { x: 30.0, y: 40.0 });
        assert_eq!(tracker.move_count(), 2);
    }

    #[test]
    fn test_non_finite_moves_are_ignored() {
        let mut tracker = PointerTracker::new();
        tracker.on_pointer_move(5.0, 5.0);
        tracker.on_pointer_move(f32::NAN, 1.0);
        assert_eq!(tracker.latest(), PointerState { x: 5.0, y: 5.0 });
        assert_eq!(tracker.move_count(), 1);
    }

    #[test]
    fn test_tilt_centre_is_flat() {
        let mut tracker = PointerTracker::new();
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        tracker.on_pointer_move(100.0, 50.0);
        assert_eq!(tracker.tilt_for(&rect, 5.0), Tilt { x_deg: 0.0, y_deg: 0.0 });
    }

    #[test]
    fn test_tilt_clamps_to_max() {
        let mut tracker = PointerTracker::new();
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        // Top-right corner
        tracker.on_pointer_move(200.0, 0.0);
        let tilt = tracker.tilt_for(&rect, 5.0);
        assert!((tilt.y_deg - 5.0).abs() < 1e-6);
        assert!((tilt.x_deg - 5.0).abs() < 1e-6);

        let tilt = tracker.tilt_for(&rect, 20.0);
        assert!((tilt.y_deg - 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_tilt_flat_off_card() {
        let mut tracker = PointerTracker::new();
        let rect = Rect::new(100.0, 100.0, 200.0, 100.0);
        // No pointer yet: the default (0, 0) must not count as a hover
        assert_eq!(tracker.tilt_for(&Rect::new(0.0, 0.0, 10.0, 10.0), 5.0), Tilt::default());

        tracker.on_pointer_move(1000.0, -1000.0);
        assert_eq!(tracker.tilt_for(&rect, 5.0), Tilt::default());

        tracker.on_pointer_move(150.0, 125.0);
        let tilt = tracker.tilt_for(&rect, 10.0);
        assert!((tilt.y_deg + 5.0).abs() < 1e-6);
        assert!((tilt.x_deg - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_tilt_empty_rect() {
        let tracker = PointerTracker::new();
        assert_eq!(tracker.tilt_for(&Rect::default(), 5.0), Tilt::default());
    }
}
