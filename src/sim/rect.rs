//! Axis-aligned rectangles for collision tests
//!
//! World coordinates are screen-like: x grows right, y grows down. The "top"
//! of a rectangle is its minimum y, the "bottom" its maximum y.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Build a rectangle from its centre and full size
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Overlap test. Rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Signed vertical distance between two rectangles
    ///
    /// Positive when they are separated vertically, zero when edges touch,
    /// negative when their vertical extents overlap.
    pub fn vertical_gap(&self, other: &Rect) -> f32 {
        (self.top() - other.bottom()).max(other.top() - self.bottom())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(cx: f32, cy: f32, w: f32, h: f32) -> Rect {
        Rect::from_center(Vec2::new(cx, cy), Vec2::new(w, h))
    }

    #[test]
    fn test_from_center() {
        let r = rect(50.0, 100.0, 20.0, 10.0);
        assert_eq!(r.min, Vec2::new(40.0, 95.0));
        assert_eq!(r.max, Vec2::new(60.0, 105.0));
        assert_eq!(r.center(), Vec2::new(50.0, 100.0));
        assert_eq!(r.size(), Vec2::new(20.0, 10.0));
    }

    #[test]
    fn test_intersects() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&rect(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.intersects(&rect(20.0, 0.0, 10.0, 10.0)));
        // Same column, far below
        assert!(!a.intersects(&rect(0.0, 30.0, 10.0, 10.0)));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&rect(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&rect(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_vertical_gap() {
        let player = rect(0.0, 100.0, 10.0, 10.0); // y 95..105
        let above = rect(40.0, 86.0, 10.0, 10.0); // y 81..91
        let below = rect(40.0, 112.0, 10.0, 10.0); // y 107..117
        assert!((player.vertical_gap(&above) - 4.0).abs() < 1e-5);
        assert!((player.vertical_gap(&below) - 2.0).abs() < 1e-5);
        // Symmetric
        assert!((above.vertical_gap(&player) - 4.0).abs() < 1e-5);

        let level = rect(40.0, 100.0, 10.0, 10.0);
        assert!(player.vertical_gap(&level) < 0.0);
    }
}
