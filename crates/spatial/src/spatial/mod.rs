//! Spatial indexing utilities.
//!
//! Point quadtree with a fixed per-node capacity.

mod quadtree;

pub use quadtree::{Quadrant, QuadTree, DEFAULT_MAX_DEPTH};
