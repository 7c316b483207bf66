//! Axis-aligned rectangle.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::Point;

/// Rectangle given by its origin and size.
///
/// `contains` is half-open (origin edges inclusive, far edges exclusive) while
/// `intersects` compares closed extents, so two rectangles sharing only an edge
/// intersect even though neither contains the shared edge points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rect of the given size centered on `center`.
    #[inline]
    pub fn from_center(center: DVec2, width: f64, height: f64) -> Self {
        Self {
            x: center.x - width / 2.0,
            y: center.y - height / 2.0,
            width,
            height,
        }
    }

    /// Check if the point lies inside the half-open region.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    /// Check if two rects overlap, touching edges included.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        !(other.x > self.x + self.width
            || other.x + other.width < self.x
            || other.y > self.y + self.height
            || other.y + other.height < self.y)
    }

    /// Get the center point.
    #[inline]
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// All fields finite and the size non-negative.
    pub fn is_well_formed(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }

    /// Split into four equal quadrants, ordered NW, NE, SW, SE.
    pub fn quadrants(&self) -> [Rect; 4] {
        let (x, y) = (self.x, self.y);
        let w = self.width / 2.0;
        let h = self.height / 2.0;
        [
            Rect::new(x, y, w, h),
            Rect::new(x + w, y, w, h),
            Rect::new(x, y + h, w, h),
            Rect::new(x + w, y + h, w, h),
        ]
    }
}
