//! Shared geometry crate for quadmap.
//!
//! This crate contains:
//! - `Point`, a 2D coordinate compared by exact equality
//! - `Rect`, a half-open axis-aligned rectangle

mod rect;

pub use rect::Rect;

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A 2D point.
///
/// Equality is exact field-wise comparison, no epsilon.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<DVec2> for Point {
    #[inline]
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Point> for DVec2 {
    #[inline]
    fn from(p: Point) -> Self {
        DVec2::new(p.x, p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_exact_equality() {
        assert_eq!(Point::new(1.0, 2.0), Point::new(1.0, 2.0));
        assert_ne!(Point::new(1.0, 2.0), Point::new(1.0, 2.0 + f64::EPSILON * 4.0));
    }

    #[test]
    fn test_point_dvec2_conversion() {
        let p: Point = DVec2::new(3.5, -1.0).into();
        assert_eq!(p, Point::new(3.5, -1.0));
        assert_eq!(DVec2::from(p), DVec2::new(3.5, -1.0));
    }
}
