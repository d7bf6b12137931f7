//! Rectangle primitives for site geometry
//!
//! Axis-aligned rectangles with closed-interval intersection and
//! edge-to-edge gap distance.

use rstar::AABB;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle anchored at its lower-left corner
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle of the given size centered on `center`
    pub fn centered(center: [f64; 2], width: f64, height: f64) -> Self {
        Self::new(center[0] - width / 2.0, center[1] - height / 2.0, width, height)
    }

    pub fn min_x(&self) -> f64 {
        self.x
    }

    pub fn min_y(&self) -> f64 {
        self.y
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn center(&self) -> [f64; 2] {
        [self.x + self.width / 2.0, self.y + self.height / 2.0]
    }

    /// Same anchor, width and height exchanged (90° turn)
    pub fn rotated(&self) -> Self {
        Self::new(self.x, self.y, self.height, self.width)
    }

    /// Grow (or shrink, for negative margins) on all four sides
    pub fn expanded(&self, margin: f64) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.width + 2.0 * margin,
            self.height + 2.0 * margin,
        )
    }

    /// Closed-interval overlap test: shared edges or corners count
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min_x() <= other.max_x()
            && other.min_x() <= self.max_x()
            && self.min_y() <= other.max_y()
            && other.min_y() <= self.max_y()
    }

    /// True when `other` lies entirely inside `self` (edges may coincide)
    pub fn contains(&self, other: &Rect) -> bool {
        other.min_x() >= self.min_x()
            && other.min_y() >= self.min_y()
            && other.max_x() <= self.max_x()
            && other.max_y() <= self.max_y()
    }

    /// Per-axis separation, zero on an axis where the projections overlap
    pub fn gap(&self, other: &Rect) -> (f64, f64) {
        let dx = (self.min_x() - other.max_x())
            .max(other.min_x() - self.max_x())
            .max(0.0);
        let dy = (self.min_y() - other.max_y())
            .max(other.min_y() - self.max_y())
            .max(0.0);
        (dx, dy)
    }

    /// Minimum Euclidean distance between the two footprints
    pub fn distance(&self, other: &Rect) -> f64 {
        let (dx, dy) = self.gap(other);
        (dx * dx + dy * dy).sqrt()
    }

    pub fn envelope(&self) -> AABB<[f64; 2]> {
        AABB::from_corners([self.min_x(), self.min_y()], [self.max_x(), self.max_y()])
    }
}

/// Minimum distance between two rectangles (0 when they touch or overlap)
pub fn rect_distance(a: &Rect, b: &Rect) -> f64 {
    a.distance(b)
}
