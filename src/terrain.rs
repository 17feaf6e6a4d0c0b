use core::fmt;
use std::str::FromStr;

use grid_util::point::Point;
use log::info;
use rand::Rng;

use crate::error::{ConfigurationError, GridError};
use crate::grid::{Grid, TileData};

const SKEW_PROBABILITY: f64 = 0.75;
const WEIGHTED_TILE_PROBABILITY: f64 = 0.5;
const MAX_RANDOM_COST: u32 = 5;

/// Kinds of terrain a [TerrainGenerator] can lay out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum TerrainKind {
    /// Recursive division maze.
    Maze,
    /// Maze favouring vertical walls.
    MazeVerticalSkew,
    /// Maze favouring horizontal walls.
    MazeHorizontalSkew,
    /// No walls, randomly weighted tiles.
    RandomTerrain,
}

impl TerrainKind {
    pub const ALL: &'static [TerrainKind] = &[
        TerrainKind::Maze,
        TerrainKind::MazeVerticalSkew,
        TerrainKind::MazeHorizontalSkew,
        TerrainKind::RandomTerrain,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TerrainKind::Maze => "maze",
            TerrainKind::MazeVerticalSkew => "maze-vertical-skew",
            TerrainKind::MazeHorizontalSkew => "maze-horizontal-skew",
            TerrainKind::RandomTerrain => "random-terrain",
        }
    }
}

impl FromStr for TerrainKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.to_ascii_lowercase();
        TerrainKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == key)
            .ok_or_else(|| ConfigurationError::UnknownTerrain(s.to_owned()))
    }
}

impl fmt::Display for TerrainKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An axis aligned region of the grid, bounds inclusive.
#[derive(Clone, Copy, Debug)]
struct Chamber {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

/// Lays out walls or weighted tiles over an existing [Grid]. The grid is cleared first and
/// protected points (usually the start and goal) are left open at the default cost.
#[derive(Clone, Debug)]
pub struct TerrainGenerator {
    kind: TerrainKind,
    protected: Vec<Point>,
}

impl TerrainGenerator {
    pub fn new(kind: TerrainKind) -> TerrainGenerator {
        TerrainGenerator {
            kind,
            protected: Vec::new(),
        }
    }

    pub fn protect(mut self, points: impl IntoIterator<Item = Point>) -> TerrainGenerator {
        self.protected.extend(points);
        self
    }

    pub fn generate<R: Rng>(&self, grid: &mut Grid, rng: &mut R) -> Result<(), GridError> {
        grid.clear();
        match self.kind {
            TerrainKind::RandomTerrain => Self::weigh_tiles(grid, rng)?,
            TerrainKind::Maze | TerrainKind::MazeVerticalSkew | TerrainKind::MazeHorizontalSkew => {
                if grid.width() > 0 && grid.height() > 0 {
                    let chamber = Chamber {
                        left: 0,
                        top: 0,
                        right: grid.width() as i32 - 1,
                        bottom: grid.height() as i32 - 1,
                    };
                    self.divide(grid, rng, chamber)?;
                }
            }
        }
        for &point in &self.protected {
            if grid.in_bounds(point) {
                grid.mutate_default(point, false)?;
            }
        }
        info!(
            "Generated {} terrain on a {}x{} grid",
            self.kind,
            grid.width(),
            grid.height()
        );
        Ok(())
    }

    fn weigh_tiles<R: Rng>(grid: &mut Grid, rng: &mut R) -> Result<(), GridError> {
        for y in 0..grid.height() as i32 {
            for x in 0..grid.width() as i32 {
                if rng.gen_bool(WEIGHTED_TILE_PROBABILITY) {
                    let cost = rng.gen_range(1..=MAX_RANDOM_COST) as f64;
                    grid.mutate_tile(
                        Point::new(x, y),
                        TileData {
                            is_solid: false,
                            path_cost: cost,
                        },
                    )?;
                }
            }
        }
        Ok(())
    }

    /// Chooses whether the next wall runs horizontally.
    fn horizontal_wall<R: Rng>(&self, width: i32, height: i32, rng: &mut R) -> bool {
        match self.kind {
            TerrainKind::MazeVerticalSkew => rng.gen_bool(1.0 - SKEW_PROBABILITY),
            TerrainKind::MazeHorizontalSkew => rng.gen_bool(SKEW_PROBABILITY),
            TerrainKind::Maze | TerrainKind::RandomTerrain => {
                if width < height {
                    true
                } else if height < width {
                    false
                } else {
                    rng.gen_bool(0.5)
                }
            }
        }
    }

    /// Recursive division. Chambers always start on an even coordinate, walls are placed on odd
    /// offsets and gaps on even ones, so every open tile stays four-connected.
    fn divide<R: Rng>(
        &self,
        grid: &mut Grid,
        rng: &mut R,
        chamber: Chamber,
    ) -> Result<(), GridError> {
        let Chamber {
            left,
            top,
            right,
            bottom,
        } = chamber;
        let width = right - left + 1;
        let height = bottom - top + 1;
        let can_horizontal = height >= 3;
        let can_vertical = width >= 3;
        let horizontal = match (can_horizontal, can_vertical) {
            (false, false) => return Ok(()),
            (true, false) => true,
            (false, true) => false,
            (true, true) => self.horizontal_wall(width, height, rng),
        };
        if horizontal {
            let wall = top + 1 + 2 * rng.gen_range(0..(height - 1) / 2);
            let gap = left + 2 * rng.gen_range(0..(width + 1) / 2);
            for x in (left..=right).filter(|&x| x != gap) {
                grid.mutate_default(Point::new(x, wall), true)?;
            }
            self.divide(grid, rng, Chamber { bottom: wall - 1, ..chamber })?;
            self.divide(grid, rng, Chamber { top: wall + 1, ..chamber })
        } else {
            let wall = left + 1 + 2 * rng.gen_range(0..(width - 1) / 2);
            let gap = top + 2 * rng.gen_range(0..(height + 1) / 2);
            for y in (top..=bottom).filter(|&y| y != gap) {
                grid.mutate_default(Point::new(wall, y), true)?;
            }
            self.divide(grid, rng, Chamber { right: wall - 1, ..chamber })?;
            self.divide(grid, rng, Chamber { left: wall + 1, ..chamber })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::NavigatorKind;
    use crate::DEFAULT_TILE_COST;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn mazes_stay_connected() {
        let mut rng = StdRng::seed_from_u64(7);
        for kind in [
            TerrainKind::Maze,
            TerrainKind::MazeVerticalSkew,
            TerrainKind::MazeHorizontalSkew,
        ] {
            for (w, h) in [(15, 9), (10, 10), (1, 7), (21, 4)] {
                let mut grid = Grid::new(w, h);
                TerrainGenerator::new(kind).generate(&mut grid, &mut rng).unwrap();
                let open: Vec<Point> = grid
                    .tiles()
                    .filter(|t| !t.solid)
                    .map(|t| t.point)
                    .collect();
                let components = grid.components(NavigatorKind::Plus);
                assert!(open.iter().all(|p| components.equiv(open[0], *p) == Ok(true)));
                if w >= 3 && h >= 3 {
                    assert!(grid.tiles().any(|t| t.solid), "{} {}x{}", kind, w, h);
                }
            }
        }
    }

    #[test]
    fn protected_points_stay_open() {
        let mut rng = StdRng::seed_from_u64(1);
        let start = Point::new(1, 1);
        let goal = Point::new(7, 5);
        for kind in TerrainKind::ALL {
            let mut grid = Grid::new(9, 7);
            TerrainGenerator::new(*kind)
                .protect([start, goal, Point::new(20, 20)])
                .generate(&mut grid, &mut rng)
                .unwrap();
            for p in [start, goal] {
                let tile = grid.get_tile(p).unwrap();
                assert!(!tile.solid);
                assert_eq!(tile.cost, DEFAULT_TILE_COST);
            }
            assert!(grid.reachable(NavigatorKind::Plus, start, goal));
        }
    }

    #[test]
    fn random_terrain_has_no_walls() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut grid = Grid::new(12, 12);
        grid.mutate_default(Point::new(0, 0), true).unwrap();
        TerrainGenerator::new(TerrainKind::RandomTerrain)
            .generate(&mut grid, &mut rng)
            .unwrap();
        assert!(grid.tiles().all(|t| !t.solid));
        assert!(grid
            .tiles()
            .all(|t| t.cost >= 1.0 && t.cost <= MAX_RANDOM_COST as f64));
        assert!(grid.tiles().any(|t| t.cost > DEFAULT_TILE_COST));
    }

    #[test]
    fn generation_is_deterministic() {
        let generate = || {
            let mut grid = Grid::new(11, 11);
            TerrainGenerator::new(TerrainKind::Maze)
                .generate(&mut grid, &mut StdRng::seed_from_u64(42))
                .unwrap();
            grid.to_string()
        };
        assert_eq!(generate(), generate());
    }

    #[test]
    fn parses_keys() {
        assert_eq!(
            "Maze-Vertical-Skew".parse::<TerrainKind>(),
            Ok(TerrainKind::MazeVerticalSkew)
        );
        assert!("cave".parse::<TerrainKind>().is_err());
    }
}
