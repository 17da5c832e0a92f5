//! Rectangle geometry for viewport overlap and marker placement.
//!
//! All coordinates are CSS pixels relative to the viewport origin, matching
//! what a bounding-rectangle read reports: an element scrolled above the
//! viewport has a negative `y`, one scrolled left of it a negative `x`.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in viewport-relative pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle from origin and size.
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn top(&self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn left(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Clamp the origin to (0,0), keeping the original bottom/right edges.
    ///
    /// Markers must never render off the top/left of the viewport; a box
    /// that starts above or left of the origin is clipped so the marker
    /// still spans the visible portion of the element.
    #[must_use]
    pub fn clamped_to_origin(&self) -> Self {
        let top = self.top().max(0.0);
        let left = self.left().max(0.0);
        Self {
            x: left,
            y: top,
            width: self.right() - left,
            height: self.bottom() - top,
        }
    }
}

/// Viewport dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// The viewport as an area rectangle anchored at (0,0).
    ///
    /// Built once per scan and shared by every overlap test in that scan.
    #[must_use]
    pub fn area(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Check whether an element's box overlaps the target area on both axes.
///
/// Edge policy, per axis: an edge exactly at 0 or exactly at the area's far
/// edge still counts as overlapping; a box that fully spans the area
/// (starts before 0 and ends past the far edge) counts even though neither
/// edge lies inside. The area is anchored at (0,0), so only its
/// width/height participate.
#[must_use]
pub fn is_overlapping_area(element: &Rect, area: &Rect) -> bool {
    let overlaps_vertically = element.top() >= 0.0 && element.top() <= area.height
        || element.bottom() > 0.0 && element.bottom() <= area.height
        || element.top() < 0.0 && element.bottom() > area.height;

    let overlaps_horizontally = element.left() >= 0.0 && element.left() <= area.width
        || element.right() > 0.0 && element.right() <= area.width
        || element.left() < 0.0 && element.right() > area.width;

    overlaps_vertically && overlaps_horizontally
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport_area() -> Rect {
        Viewport {
            width: 1024.0,
            height: 768.0,
        }
        .area()
    }

    #[test]
    fn box_inside_viewport_overlaps() {
        let element = Rect::new(10.0, 10.0, 50.0, 20.0);
        assert!(is_overlapping_area(&element, &viewport_area()));
    }

    #[test]
    fn box_above_and_left_of_viewport_does_not_overlap() {
        let element = Rect::new(-100.0, -100.0, 10.0, 10.0);
        assert!(!is_overlapping_area(&element, &viewport_area()));
    }

    #[test]
    fn edge_exactly_at_origin_counts() {
        // Top edge at 0 is still on-screen.
        let element = Rect::new(100.0, 0.0, 50.0, 20.0);
        assert!(is_overlapping_area(&element, &viewport_area()));
    }

    #[test]
    fn edge_exactly_at_far_edge_counts() {
        // Top edge exactly at the viewport's height.
        let element = Rect::new(100.0, 768.0, 50.0, 20.0);
        assert!(is_overlapping_area(&element, &viewport_area()));
    }

    #[test]
    fn bottom_edge_at_zero_does_not_count() {
        // Bottom at exactly 0 means the box sits entirely above the fold;
        // the bottom test is strict (> 0).
        let element = Rect::new(100.0, -20.0, 50.0, 20.0);
        assert!(!is_overlapping_area(&element, &viewport_area()));
    }

    #[test]
    fn box_spanning_entire_axis_counts() {
        // Starts above the origin, ends below the far edge: neither edge is
        // inside the area, but the box covers it.
        let element = Rect::new(100.0, -50.0, 50.0, 1000.0);
        assert!(is_overlapping_area(&element, &viewport_area()));
    }

    #[test]
    fn overlap_requires_both_axes() {
        // Vertically visible, horizontally off to the left.
        let element = Rect::new(-500.0, 100.0, 50.0, 20.0);
        assert!(!is_overlapping_area(&element, &viewport_area()));
    }

    #[test]
    fn clamp_leaves_onscreen_box_unchanged() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(rect.clamped_to_origin(), rect);
    }

    #[test]
    fn clamp_moves_negative_origin_to_zero() {
        let rect = Rect::new(-30.0, -10.0, 100.0, 50.0);
        let clamped = rect.clamped_to_origin();
        assert_eq!(clamped.x, 0.0);
        assert_eq!(clamped.y, 0.0);
        // Bottom/right edges are preserved, so the size shrinks.
        assert_eq!(clamped.width, 70.0);
        assert_eq!(clamped.height, 40.0);
        assert_eq!(clamped.right(), rect.right());
        assert_eq!(clamped.bottom(), rect.bottom());
    }
}
