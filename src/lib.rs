//! # tile_pathfinder
//!
//! A grid-based pathfinding engine for weighted tile grids. A [Grid] stores solid walls and
//! per-tile costs, a [Navigator] turns it into a graph with either four-directional
//! ([NavigatorKind::Plus]) or eight-directional ([NavigatorKind::Asterisk]) movement, and a
//! [Pathfinder] searches that graph with one of the registered [Algorithm]s:
//!
//! | Key | Open container | Priority | Step cost |
//! |---|---|---|---|
//! | `bfs` | FIFO queue | insertion order | 1 |
//! | `dfs` | LIFO stack | insertion order | 1 |
//! | `a*` | min-heap | g + h | navigator |
//! | `dijkstra` | min-heap | g | navigator |
//! | `best-first` | min-heap | h | 0 |
//! | `bi-a*`, `bi-dijkstra`, `bi-bfs` | two of the above | as above | as above |
//!
//! Searches can be run to completion or stepped one expansion at a time, which lets an
//! animation replay the exploration. Pathfinders are usually put together from string keys with
//! the [PathfinderBuilder]:
//!
//! ```
//! use tile_pathfinder::{Grid, PathfinderBuilder, Point, SearchStatus};
//!
//! let mut grid = Grid::new(5, 5);
//! for y in 0..5 {
//!     grid.mutate_default(Point::new(2, y), true).unwrap();
//! }
//! let mut builder = PathfinderBuilder::new(&grid);
//! builder.set_algorithm("bfs").unwrap();
//! let outcome = builder.build().find_path(Point::new(0, 0), Point::new(4, 4));
//! assert_eq!(outcome.status, SearchStatus::Exhausted);
//! assert!(outcome.path.is_empty());
//! ```
mod algorithm;
mod builder;
mod error;
mod grid;
pub mod heuristic;
mod navigator;
mod search;
mod terrain;

pub use grid_util::point::Point;

pub use crate::algorithm::Algorithm;
pub use crate::builder::{PathfinderBuilder, PathfinderConfig};
pub use crate::error::{ConfigurationError, GridError};
pub use crate::grid::{Components, Grid, Tile, TileData};
pub use crate::heuristic::Heuristic;
pub use crate::navigator::{Navigator, NavigatorKind, Neighbors};
pub use crate::search::{
    PathTile, Pathfinder, Search, SearchOutcome, SearchStatus, Side, VisitedTile,
};
pub use crate::terrain::{TerrainGenerator, TerrainKind};

/// Cost of a tile that was never given one.
pub const DEFAULT_TILE_COST: f64 = 1.0;
/// Multiplier applied to the destination cost of a diagonal move.
pub const DIAGONAL_MULTIPLIER: f64 = std::f64::consts::SQRT_2;
/// Inline capacity of neighbour lists, enough for a full eight-neighbourhood.
pub const N_SMALLVEC_SIZE: usize = 8;

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_uses_string_keys() {
        let config = PathfinderConfig {
            navigator: NavigatorKind::Asterisk,
            algorithm: Algorithm::BiAStar,
            heuristic: Heuristic::Octile,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(
            json,
            r#"{"navigator":"asterisk","algorithm":"bi-a*","heuristic":"octile"}"#
        );
        let parsed: PathfinderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
        let terrain: TerrainKind = serde_json::from_str(r#""maze-vertical-skew""#).unwrap();
        assert_eq!(terrain, TerrainKind::MazeVerticalSkew);
    }
}
