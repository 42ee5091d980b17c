//! Grid-subsystem error type.

use thiserror::Error;

/// Errors produced when constructing a [`SpatialGrid`](crate::SpatialGrid).
///
/// Operations on a built grid never fail: coordinates outside the plane are a
/// caller contract violation, not a checked error.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("square size must be at least 1")]
    ZeroSquareSize,

    #[error("plane {width}×{height} has no area")]
    EmptyPlane { width: usize, height: usize },

    #[error("grid of {0} cells exceeds the CellIndex range")]
    TooManyCells(usize),
}

pub type GridResult<T> = Result<T, GridError>;
