//! Axis-aligned collision primitives
//!
//! The climber and the pole are boxes. Coconut hits are tested as a point
//! against the climber box.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict interior test: points on the edge do not count
    pub fn contains_point(&self, p: Vec2) -> bool {
        self.left() < p.x && p.x < self.right() && self.top() < p.y && p.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_point_interior() {
        let r = Rect::new(370.0, 200.0, 60.0, 80.0);
        assert!(r.contains_point(Vec2::new(400.0, 240.0)));
        assert!(r.contains_point(Vec2::new(370.5, 200.5)));
    }

    #[test]
    fn test_contains_point_edges_excluded() {
        let r = Rect::new(370.0, 200.0, 60.0, 80.0);
        assert!(!r.contains_point(Vec2::new(370.0, 240.0)));
        assert!(!r.contains_point(Vec2::new(430.0, 240.0)));
        assert!(!r.contains_point(Vec2::new(400.0, 200.0)));
        assert!(!r.contains_point(Vec2::new(400.0, 280.0)));
    }
}
