use core::fmt;
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;

use crate::error::GridError;
use crate::navigator::{Navigator, NavigatorKind};
use crate::DEFAULT_TILE_COST;

/// A single cell of a [Grid]. Only static data lives here, search metadata is kept by the
/// search that produced it (see [VisitedTile](crate::VisitedTile)).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    pub point: Point,
    pub cost: f64,
    pub solid: bool,
}

impl Tile {
    fn new(point: Point) -> Tile {
        Tile {
            point,
            cost: DEFAULT_TILE_COST,
            solid: false,
        }
    }
}

/// Values written by [Grid::mutate_tile].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileData {
    pub is_solid: bool,
    pub path_cost: f64,
}

/// Fixed-size rectangular board of [Tile]s. Width and height never change after construction,
/// mutation only touches the cost and solid flag of a tile that already exists.
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Creates a grid where every tile is open and has [DEFAULT_TILE_COST].
    pub fn new(width: usize, height: usize) -> Grid {
        let tiles = (0..height as i32)
            .flat_map(|y| (0..width as i32).map(move |x| Tile::new(Point::new(x, y))))
            .collect();
        Grid {
            width,
            height,
            tiles,
        }
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width
            && (point.y as usize) < self.height
    }
    fn index(&self, point: Point) -> Result<usize, GridError> {
        if self.in_bounds(point) {
            Ok(point.y as usize * self.width + point.x as usize)
        } else {
            Err(GridError::out_of_bounds(point, self.width, self.height))
        }
    }
    pub fn get_tile(&self, point: Point) -> Result<&Tile, GridError> {
        self.index(point).map(|ix| &self.tiles[ix])
    }
    pub fn is_solid(&self, point: Point) -> Result<bool, GridError> {
        self.get_tile(point).map(|tile| tile.solid)
    }
    /// Open and in bounds, i.e. a tile a path may pass through.
    pub fn is_walkable(&self, point: Point) -> bool {
        matches!(self.get_tile(point), Ok(tile) if !tile.solid)
    }
    /// Sets the solid flag and resets the cost to the default. Used for freehand drawing and
    /// erasing of walls.
    pub fn mutate_default(&mut self, point: Point, solid: bool) -> Result<(), GridError> {
        let ix = self.index(point)?;
        let tile = &mut self.tiles[ix];
        tile.solid = solid;
        tile.cost = DEFAULT_TILE_COST;
        Ok(())
    }
    pub fn mutate_tile(&mut self, point: Point, data: TileData) -> Result<(), GridError> {
        if !data.path_cost.is_finite() || data.path_cost < 0.0 {
            return Err(GridError::InvalidCost(data.path_cost));
        }
        let ix = self.index(point)?;
        let tile = &mut self.tiles[ix];
        tile.solid = data.is_solid;
        tile.cost = data.path_cost;
        Ok(())
    }
    /// Resets every tile to an open tile with the default cost.
    pub fn clear(&mut self) {
        for tile in self.tiles.iter_mut() {
            tile.solid = false;
            tile.cost = DEFAULT_TILE_COST;
        }
    }
    /// Row-major iterator over all tiles.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Labels the open tiles with connected components using a [UnionFind] structure, linking up
    /// tiles that the given navigator pattern can move between.
    pub fn components(&self, kind: NavigatorKind) -> Components {
        let navigator = Navigator::new(self, kind);
        let mut components = UnionFind::new(self.tiles.len());
        for (ix, tile) in self.tiles.iter().enumerate() {
            if tile.solid {
                continue;
            }
            for (neighbor, _) in navigator.successors(tile.point) {
                let neighbor_ix = neighbor.y as usize * self.width + neighbor.x as usize;
                components.union(ix, neighbor_ix);
            }
        }
        Components {
            width: self.width,
            height: self.height,
            components,
        }
    }

    /// Checks if the goal can be reached from the start. Out of bounds or solid endpoints are
    /// never reachable.
    pub fn reachable(&self, kind: NavigatorKind, start: Point, goal: Point) -> bool {
        if !self.is_walkable(start) || !self.is_walkable(goal) {
            info!("{} or {} is not an open tile", start, goal);
            return false;
        }
        self.components(kind).equiv(start, goal).unwrap_or(false)
    }
}

/// Connected components of the open tiles of a [Grid], see [Grid::components].
#[derive(Clone, Debug)]
pub struct Components {
    width: usize,
    height: usize,
    components: UnionFind<usize>,
}

impl Components {
    fn ix(&self, point: Point) -> Result<usize, GridError> {
        if point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width
            && (point.y as usize) < self.height
        {
            Ok(point.y as usize * self.width + point.x as usize)
        } else {
            Err(GridError::out_of_bounds(point, self.width, self.height))
        }
    }
    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: Point) -> Result<usize, GridError> {
        Ok(self.components.find(self.ix(point)?))
    }
    /// Checks if both points are on the same component.
    pub fn equiv(&self, a: Point, b: Point) -> Result<bool, GridError> {
        Ok(self.components.equiv(self.ix(a)?, self.ix(b)?))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.tiles.chunks(self.width.max(1)) {
            for tile in row {
                let c = if tile.solid {
                    '#'
                } else if tile.cost == DEFAULT_TILE_COST {
                    '.'
                } else if tile.cost.round() >= 10.0 {
                    '+'
                } else {
                    char::from_digit(tile.cost.round() as u32, 10).unwrap_or('?')
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
