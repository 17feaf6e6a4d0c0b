use grid_util::point::Point;
use thiserror::Error;

/// Raised by the [PathfinderBuilder](crate::PathfinderBuilder) setters when a key is not
/// registered. The builder keeps its previous configuration when this is returned.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("no such navigator pattern exists: '{0}'")]
    UnknownNavigator(String),
    #[error("no such pathfinding algorithm exists: '{0}'")]
    UnknownAlgorithm(String),
    #[error("no such heuristic function exists: '{0}'")]
    UnknownHeuristic(String),
    #[error("no such terrain generator exists: '{0}'")]
    UnknownTerrain(String),
}

/// Errors caused by addressing or mutating a [Grid](crate::Grid) incorrectly.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum GridError {
    #[error("point ({x}, {y}) is outside of the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
    #[error("tile cost must be finite and non-negative, got {0}")]
    InvalidCost(f64),
}

impl GridError {
    pub(crate) fn out_of_bounds(point: Point, width: usize, height: usize) -> GridError {
        GridError::OutOfBounds {
            x: point.x,
            y: point.y,
            width,
            height,
        }
    }
}
