use core::fmt;
use std::str::FromStr;

use grid_util::point::Point;
use itertools::Itertools;
use smallvec::SmallVec;

use crate::error::{ConfigurationError, GridError};
use crate::grid::Grid;
use crate::{DIAGONAL_MULTIPLIER, N_SMALLVEC_SIZE};

/// Neighbouring points paired with the cost of the move.
pub type Neighbors = SmallVec<[(Point, f64); N_SMALLVEC_SIZE]>;

/// Orthogonal offsets in the order N, E, S, W. The y axis grows downward.
const ORTHOGONAL: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];
/// Diagonal offsets in the order NE, SE, SW, NW.
const DIAGONAL: [(i32, i32); 4] = [(1, -1), (1, 1), (-1, 1), (-1, -1)];

/// Movement pattern of a [Navigator].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NavigatorKind {
    /// Four-directional movement.
    Plus,
    /// Eight-directional movement without corner cutting.
    Asterisk,
}

impl NavigatorKind {
    pub const ALL: &'static [NavigatorKind] = &[NavigatorKind::Plus, NavigatorKind::Asterisk];

    pub fn as_str(self) -> &'static str {
        match self {
            NavigatorKind::Plus => "plus",
            NavigatorKind::Asterisk => "asterisk",
        }
    }
}

impl FromStr for NavigatorKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.to_ascii_lowercase();
        NavigatorKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == key)
            .ok_or_else(|| ConfigurationError::UnknownNavigator(s.to_owned()))
    }
}

impl fmt::Display for NavigatorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Neighbour and step cost model over a borrowed [Grid]. Every neighbour it hands out is in
/// bounds and open, and the asterisk pattern never moves diagonally between two solid
/// orthogonal tiles.
#[derive(Clone, Copy, Debug)]
pub struct Navigator<'g> {
    grid: &'g Grid,
    kind: NavigatorKind,
}

impl<'g> Navigator<'g> {
    pub fn new(grid: &'g Grid, kind: NavigatorKind) -> Navigator<'g> {
        Navigator { grid, kind }
    }
    pub fn kind(&self) -> NavigatorKind {
        self.kind
    }
    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    fn offset(point: Point, (dx, dy): (i32, i32)) -> Point {
        Point::new(point.x + dx, point.y + dy)
    }

    fn solid_or_outside(&self, point: Point) -> bool {
        !self.grid.is_walkable(point)
    }

    /// Legal moves out of an in-bounds point, paired with the move's cost multiplier.
    fn moves(&self, point: Point) -> SmallVec<[(Point, f64); N_SMALLVEC_SIZE]> {
        let mut moves: SmallVec<[(Point, f64); N_SMALLVEC_SIZE]> = ORTHOGONAL
            .iter()
            .map(|&delta| Self::offset(point, delta))
            .filter(|&p| self.grid.is_walkable(p))
            .map(|p| (p, 1.0))
            .collect();
        if self.kind == NavigatorKind::Asterisk {
            for &(dx, dy) in DIAGONAL.iter() {
                let p = Self::offset(point, (dx, dy));
                if !self.grid.is_walkable(p) {
                    continue;
                }
                // Corner cutting: both flanking orthogonal tiles are blocked
                if self.solid_or_outside(Self::offset(point, (dx, 0)))
                    && self.solid_or_outside(Self::offset(point, (0, dy)))
                {
                    continue;
                }
                moves.push((p, DIAGONAL_MULTIPLIER));
            }
        }
        moves
    }

    /// Neighbours of an in-bounds point, where the cost is that of entering the neighbour.
    pub(crate) fn successors(&self, point: Point) -> Neighbors {
        self.moves(point)
            .into_iter()
            .map(|(p, multiplier)| (p, self.tile_cost(p) * multiplier))
            .collect()
    }

    /// Points from which the given point can be entered, paired with the cost of that move,
    /// i.e. the edges of [successors](Self::successors) reversed.
    pub(crate) fn predecessors(&self, point: Point) -> Neighbors {
        let cost = self.tile_cost(point);
        self.moves(point)
            .into_iter()
            .map(|(p, multiplier)| (p, cost * multiplier))
            .collect()
    }

    fn tile_cost(&self, point: Point) -> f64 {
        self.grid
            .get_tile(point)
            .map(|tile| tile.cost)
            .unwrap_or(f64::INFINITY)
    }

    /// Returns the open neighbours of a point and the cost of moving to each of them.
    pub fn neighbors(&self, point: Point) -> Result<Neighbors, GridError> {
        self.grid.get_tile(point)?;
        Ok(self.successors(point))
    }

    /// Cost of a single move, [None] if the move is not one this navigator allows.
    pub fn step_cost(&self, from: Point, to: Point) -> Option<f64> {
        if !self.grid.in_bounds(from) {
            return None;
        }
        self.successors(from)
            .into_iter()
            .find(|(p, _)| *p == to)
            .map(|(_, c)| c)
    }

    /// Sums the step costs along a path, [None] if any step is not a legal move.
    pub fn path_cost(&self, path: &[Point]) -> Option<f64> {
        path.iter()
            .tuple_windows()
            .map(|(a, b)| self.step_cost(*a, *b))
            .sum()
    }
}
