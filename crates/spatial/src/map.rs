//! Zoomable map over a [`QuadTree`].
//!
//! The map owns the tree plus a pan/zoom viewport. Payloads live in a side
//! table keyed by exact coordinates; the tree itself only stores points.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use geometry::{Point, Rect};
use glam::DVec2;
use tracing::debug;

use crate::config::Config;
use crate::error::SpatialError;
use crate::spatial::QuadTree;

/// A point with attached data.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint<T> {
    pub point: Point,
    pub data: T,
}

impl<T> MapPoint<T> {
    pub fn new(x: f64, y: f64, data: T) -> Self {
        Self {
            point: Point::new(x, y),
            data,
        }
    }
}

/// A point inside the viewport together with every payload stored at its
/// coordinate, oldest first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visible<'a, T> {
    pub point: Point,
    pub data: &'a [T],
}

/// Hash key matching `Point` equality: `-0.0` and `0.0` share a key.
type PointKey = (u64, u64);

#[inline]
fn point_key(p: Point) -> PointKey {
    fn bits(v: f64) -> u64 {
        if v == 0.0 { 0 } else { v.to_bits() }
    }
    (bits(p.x), bits(p.y))
}

/// Map with a pan/zoom viewport.
///
/// Each zoom level halves the viewport size. Zooming out stops at level 0.
#[derive(Debug, Clone)]
pub struct Map<T> {
    tree: QuadTree,
    /// Never holds an empty `Vec`.
    annotations: HashMap<PointKey, Vec<T>>,
    zoom_level: u32,
    center: DVec2,
    viewport_width: f64,
    viewport_height: f64,
}

impl<T> Map<T> {
    /// Create a map whose initial viewport covers the whole boundary.
    pub fn new(boundary: Rect, capacity: usize) -> Result<Self, SpatialError> {
        Ok(Self::with_tree(QuadTree::new(boundary, capacity)?))
    }

    /// Create a map from the `[index]` and `[boundary]` config sections.
    pub fn from_config(config: &Config) -> Result<Self, SpatialError> {
        let tree = QuadTree::with_max_depth(
            config.boundary.rect(),
            config.index.capacity,
            config.index.max_depth,
        )?;
        Ok(Self::with_tree(tree))
    }

    fn with_tree(tree: QuadTree) -> Self {
        let boundary = tree.boundary();
        Self {
            tree,
            annotations: HashMap::new(),
            zoom_level: 0,
            center: boundary.center(),
            viewport_width: boundary.width,
            viewport_height: boundary.height,
        }
    }

    /// Add an annotated point. The payload is dropped if the point lies
    /// outside the map.
    pub fn add_point(&mut self, p: MapPoint<T>) -> bool {
        if !self.tree.insert(p.point) {
            return false;
        }
        self.annotations.entry(point_key(p.point)).or_default().push(p.data);
        true
    }

    /// Remove one occurrence of `point`, returning its oldest payload.
    pub fn remove_point(&mut self, point: Point) -> Option<T> {
        if !self.tree.delete(point) {
            return None;
        }

        let Entry::Occupied(mut slot) = self.annotations.entry(point_key(point)) else {
            return None;
        };
        let data = slot.get_mut().remove(0);
        if slot.get().is_empty() {
            slot.remove();
        }
        Some(data)
    }

    /// Halve the viewport.
    pub fn zoom_in(&mut self) {
        self.zoom_level += 1;
        self.viewport_width /= 2.0;
        self.viewport_height /= 2.0;
        debug!(level = self.zoom_level, "Zoomed in");
    }

    /// Double the viewport, unless already at level 0.
    pub fn zoom_out(&mut self) {
        if self.zoom_level == 0 {
            return;
        }
        self.zoom_level -= 1;
        self.viewport_width *= 2.0;
        self.viewport_height *= 2.0;
        debug!(level = self.zoom_level, "Zoomed out");
    }

    /// Move the viewport center.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.center += DVec2::new(dx, dy);
        debug!(x = self.center.x, y = self.center.y, "Panned");
    }

    /// The visible rectangle.
    #[inline]
    pub fn viewport(&self) -> Rect {
        Rect::from_center(self.center, self.viewport_width, self.viewport_height)
    }

    /// All points inside the viewport with their payloads.
    pub fn visible_points(&self) -> Vec<Visible<'_, T>> {
        self.tree
            .query(&self.viewport())
            .into_iter()
            .map(|point| Visible {
                point,
                data: self
                    .annotations
                    .get(&point_key(point))
                    .map_or(&[][..], Vec::as_slice),
            })
            .collect()
    }

    #[inline]
    pub fn tree(&self) -> &QuadTree {
        &self.tree
    }

    #[inline]
    pub fn zoom_level(&self) -> u32 {
        self.zoom_level
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        self.center
    }

    /// Viewport width and height.
    #[inline]
    pub fn viewport_size(&self) -> (f64, f64) {
        (self.viewport_width, self.viewport_height)
    }
}
