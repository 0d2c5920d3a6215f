#![warn(missing_docs)]
//! Physics primitives (rectangles, collisions) and the player movement resolver.

mod resolver;

use glam::DVec2;
use serde::{Deserialize, Serialize};

pub use resolver::*;

/// Axis-aligned rectangle in world units; `(x, y)` is the top-left corner and
/// y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Extent along x.
    pub w: f64,
    /// Extent along y.
    pub h: f64,
}

impl Rect {
    /// Create a new rectangle ensuring non-negative extents.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        debug_assert!(w >= 0.0 && h >= 0.0);
        Self { x, y, w, h }
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Centre point.
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Strict overlap test: rectangles that only share an edge do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Source of solid rectangles the player collides with.
pub trait SolidQuery {
    /// Return every solid rectangle strictly overlapping `area`, in a stable order.
    fn solids_overlapping(&self, area: &Rect) -> Vec<Rect>;
}

impl SolidQuery for [Rect] {
    fn solids_overlapping(&self, area: &Rect) -> Vec<Rect> {
        self.iter().filter(|r| r.intersects(area)).copied().collect()
    }
}

impl SolidQuery for Vec<Rect> {
    fn solids_overlapping(&self, area: &Rect) -> Vec<Rect> {
        self.as_slice().solids_overlapping(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 50.0, 50.0);
        let right = Rect::new(50.0, 0.0, 50.0, 50.0);
        let below = Rect::new(0.0, 50.0, 50.0, 50.0);
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
        assert!(!right.intersects(&a));
    }

    #[test]
    fn overlapping_rects_intersect() {
        let a = Rect::new(0.0, 0.0, 50.0, 50.0);
        let b = Rect::new(49.5, 49.5, 50.0, 50.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn center_and_edges() {
        let r = Rect::new(10.0, -20.0, 50.0, 40.0);
        assert_eq!(r.right(), 60.0);
        assert_eq!(r.bottom(), 20.0);
        assert_eq!(r.center(), DVec2::new(35.0, 0.0));
    }

    #[test]
    fn slice_query_filters_by_overlap() {
        let solids = vec![
            Rect::new(0.0, 0.0, 50.0, 50.0),
            Rect::new(100.0, 0.0, 50.0, 50.0),
        ];
        let hits = solids.solids_overlapping(&Rect::new(25.0, 0.0, 50.0, 50.0));
        assert_eq!(hits, vec![Rect::new(0.0, 0.0, 50.0, 50.0)]);
    }
}
