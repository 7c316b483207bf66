//! Quadmap spatial index library.

pub mod config;
pub mod error;
pub mod map;
pub mod spatial;

// Re-export commonly used types
pub use config::Config;
pub use error::SpatialError;
pub use geometry::{Point, Rect};
pub use map::{Map, MapPoint, Visible};
pub use spatial::{Quadrant, QuadTree, DEFAULT_MAX_DEPTH};
