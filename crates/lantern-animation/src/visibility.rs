//! Visibility-fraction providers queried on every scroll update

use lantern_core::{ElementRef, ScrollMetrics};
use std::collections::HashMap;

/// Reports where an element sits in the viewport.
///
/// Positions are the element's anchor edge as a fraction of viewport height
/// measured from the top: 0.0 is the top edge, 1.0 the bottom edge. Values
/// outside [0, 1] mean the anchor is off-screen.
pub trait VisibilityProvider {
    /// Whether viewport geometry can be observed at all in this environment
    fn available(&self) -> bool {
        true
    }

    /// Position of `element`, or `None` if it cannot be measured
    fn position(&self, element: ElementRef, scroll: &ScrollMetrics) -> Option<f32>;
}

/// Geometry from a laid-out document: element tops in document pixels
#[derive(Debug, Clone, Default)]
pub struct DocumentLayout {
    tops: HashMap<ElementRef, f32>,
}

impl DocumentLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or move) an element's top edge in document coordinates
    pub fn place(&mut self, element: ElementRef, top: f32) {
        self.tops.insert(element, top);
    }

    pub fn with(mut self, element: ElementRef, top: f32) -> Self {
        self.place(element, top);
        self
    }

    pub fn top_of(&self, element: ElementRef) -> Option<f32> {
        self.tops.get(&element).copied()
    }
}

impl VisibilityProvider for DocumentLayout {
    fn position(&self, element: ElementRef, scroll: &ScrollMetrics) -> Option<f32> {
        let top = self.top_of(element)?;
        if !(scroll.viewport_height > 0.0) || !scroll.offset.is_finite() {
            return None;
        }
        Some((top - scroll.offset) / scroll.viewport_height)
    }
}

/// Stand-in for environments without a geometry/observation primitive
#[derive(Debug, Clone, Copy, Default)]
pub struct Unobserved;

impl VisibilityProvider for Unobserved {
    fn available(&self) -> bool {
        false
    }

    fn position(&self, _element: ElementRef, _scroll: &ScrollMetrics) -> Option<f32> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_position_tracks_scroll() {
        let el = ElementRef::from_raw(1);
        let layout = DocumentLayout::new().with(el, 1500.0);

        let at_top = ScrollMetrics::new(0.0, 1000.0, 4000.0);
        assert_eq!(layout.position(el, &at_top), Some(1.5));

        let scrolled = ScrollMetrics::new(800.0, 1000.0, 4000.0);
        assert!((layout.position(el, &scrolled).unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn layout_unknown_element_or_zero_viewport() {
        let el = ElementRef::from_raw(1);
        let layout = DocumentLayout::new().with(el, 100.0);
        assert_eq!(layout.position(ElementRef::from_raw(2), &ScrollMetrics::default()), None);
        assert_eq!(layout.position(el, &ScrollMetrics::new(0.0, 0.0, 100.0)), None);
    }

    #[test]
    fn unobserved_is_unavailable() {
        assert!(!Unobserved.available());
        assert!(DocumentLayout::new().available());
    }
}
