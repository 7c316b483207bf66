//! Index error types.

use geometry::Rect;
use thiserror::Error;

/// Errors that can occur when building an index.
#[derive(Debug, Error, PartialEq)]
pub enum SpatialError {
    #[error("Node capacity must be at least 1")]
    InvalidCapacity,

    #[error("Invalid boundary: {0:?}")]
    InvalidBoundary(Rect),
}
