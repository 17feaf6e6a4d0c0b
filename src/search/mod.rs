use grid_util::point::Point;
use log::{debug, info};

use crate::algorithm::Algorithm;
use crate::heuristic::Heuristic;
use crate::navigator::Navigator;

use self::bidirectional::Bidirectional;
use self::context::{Finalized, SearchContext};

mod bidirectional;
mod context;
mod frontier;

/// Lifecycle of a [Search]. [Found](SearchStatus::Found) and
/// [Exhausted](SearchStatus::Exhausted) are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchStatus {
    Init,
    Running,
    Found,
    Exhausted,
}

impl SearchStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, SearchStatus::Found | SearchStatus::Exhausted)
    }
}

/// Which frontier finalized a tile. Unidirectional searches only have a forward side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Forward,
    Backward,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Forward => Side::Backward,
            Side::Backward => Side::Forward,
        }
    }
}

/// A tile as it was finalized, in the order the search finalized it. `g` is the distance from
/// the root of its side, `h` the heuristic estimate towards the opposite endpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisitedTile {
    pub point: Point,
    pub index: usize,
    pub side: Side,
    pub parent: Option<Point>,
    pub g: f64,
    pub h: f64,
}

/// A tile of the final path. `cost` is the navigator cost accumulated from the start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathTile {
    pub point: Point,
    pub parent: Option<Point>,
    pub cost: f64,
}

/// Everything a finished search produced.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome {
    pub status: SearchStatus,
    pub visited: Vec<VisitedTile>,
    pub path: Vec<PathTile>,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        self.status == SearchStatus::Found
    }
    /// Total cost of the path, [None] if no path was found.
    pub fn cost(&self) -> Option<f64> {
        self.path.last().map(|tile| tile.cost)
    }
    pub fn points(&self) -> Vec<Point> {
        self.path.iter().map(|tile| tile.point).collect()
    }
}

/// What a single expansion did.
pub(crate) enum StepEvent {
    Visited(Finalized, Side),
    /// The path was completed, optionally by finalizing a tile in the same step.
    Found(Option<(Finalized, Side)>, Vec<Point>),
    Exhausted,
}

#[derive(Debug)]
enum Engine {
    Unidirectional(SearchContext),
    Bidirectional(Bidirectional),
    /// Resolved without searching.
    Idle,
}

/// A configured search engine bound to a read-only [Grid](crate::Grid). Every call to
/// [search](Self::search) or [find_path](Self::find_path) starts from fresh state, so a
/// pathfinder may be reused for many start and goal pairs as long as the grid is not mutated
/// in between (the borrow checker enforces this).
#[derive(Clone, Copy, Debug)]
pub struct Pathfinder<'g> {
    navigator: Navigator<'g>,
    algorithm: Algorithm,
    heuristic: Heuristic,
}

impl<'g> Pathfinder<'g> {
    pub fn new(navigator: Navigator<'g>, algorithm: Algorithm, heuristic: Heuristic) -> Self {
        Pathfinder {
            navigator,
            algorithm,
            heuristic: algorithm.policy(heuristic).heuristic,
        }
    }
    pub fn navigator(&self) -> Navigator<'g> {
        self.navigator
    }
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
    /// The heuristic actually used, [Heuristic::Null] for algorithms that ignore it.
    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }
    pub fn algorithm_name(&self) -> &'static str {
        self.algorithm.name()
    }

    /// Prepares a search that can be driven one expansion at a time.
    pub fn search(&self, start: Point, goal: Point) -> Search<'g> {
        Search::new(self, start, goal)
    }

    /// Runs a search to completion.
    pub fn find_path(&self, start: Point, goal: Point) -> SearchOutcome {
        let mut search = self.search(start, goal);
        search.run();
        search.into_outcome()
    }
}

/// The state of one search between a fixed start and goal. Dropping it at any point abandons
/// the search.
#[derive(Debug)]
pub struct Search<'g> {
    navigator: Navigator<'g>,
    algorithm: Algorithm,
    start: Point,
    goal: Point,
    status: SearchStatus,
    engine: Engine,
    visited: Vec<VisitedTile>,
    path: Vec<PathTile>,
}

impl<'g> Search<'g> {
    fn new(pathfinder: &Pathfinder<'g>, start: Point, goal: Point) -> Search<'g> {
        let navigator = pathfinder.navigator;
        let algorithm = pathfinder.algorithm;
        let mut search = Search {
            navigator,
            algorithm,
            start,
            goal,
            status: SearchStatus::Init,
            engine: Engine::Idle,
            visited: Vec::new(),
            path: Vec::new(),
        };
        let grid = navigator.grid();
        if !grid.is_walkable(start) || !grid.is_walkable(goal) {
            info!(
                "{} to {} has a blocked or out of bounds endpoint, no path exists",
                start, goal
            );
            search.status = SearchStatus::Exhausted;
            return search;
        }
        debug!(
            "Starting {} from {} to {} with {} navigator",
            algorithm.name(),
            start,
            goal,
            navigator.kind()
        );
        if start == goal {
            search.record(
                Finalized {
                    index: 0,
                    point: start,
                    parent: None,
                    g: 0.0,
                    h: 0.0,
                },
                Side::Forward,
            );
            search.finish_found(vec![start]);
            return search;
        }
        let policy = algorithm.policy(pathfinder.heuristic);
        search.engine = if algorithm.is_bidirectional() {
            Engine::Bidirectional(Bidirectional::new(start, goal, policy))
        } else {
            Engine::Unidirectional(SearchContext::new(start, goal, policy, Side::Forward))
        };
        search
    }

    pub fn start(&self) -> Point {
        self.start
    }
    pub fn goal(&self) -> Point {
        self.goal
    }
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
    pub fn status(&self) -> SearchStatus {
        self.status
    }
    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }
    /// Finalized tiles so far, in finalization order.
    pub fn visited(&self) -> &[VisitedTile] {
        &self.visited
    }
    /// The path from start to goal inclusive, empty unless the search found one.
    pub fn path(&self) -> &[PathTile] {
        &self.path
    }
    /// The side the next [step](Self::step) expands.
    pub fn next_side(&self) -> Side {
        match &self.engine {
            Engine::Bidirectional(bi) => bi.turn(),
            Engine::Unidirectional(_) | Engine::Idle => Side::Forward,
        }
    }

    fn record(&mut self, finalized: Finalized, side: Side) {
        self.visited.push(VisitedTile {
            point: finalized.point,
            index: self.visited.len(),
            side,
            parent: finalized.parent,
            g: finalized.g,
            h: finalized.h,
        });
    }

    fn finish_found(&mut self, points: Vec<Point>) {
        let mut cost = 0.0;
        let mut parent: Option<Point> = None;
        self.path = points
            .into_iter()
            .map(|point| {
                if let Some(previous) = parent {
                    cost += self.navigator.step_cost(previous, point).unwrap_or(0.0);
                }
                let tile = PathTile {
                    point,
                    parent,
                    cost,
                };
                parent = Some(point);
                tile
            })
            .collect();
        self.status = SearchStatus::Found;
        self.engine = Engine::Idle;
        info!(
            "{} found a path of {} tiles with cost {} after finalizing {} tiles",
            self.algorithm.name(),
            self.path.len(),
            cost,
            self.visited.len()
        );
    }

    fn finish_exhausted(&mut self) {
        self.status = SearchStatus::Exhausted;
        self.engine = Engine::Idle;
        info!(
            "{} exhausted after finalizing {} tiles, {} is not reachable from {}",
            self.algorithm.name(),
            self.visited.len(),
            self.goal,
            self.start
        );
    }

    /// Performs a single expansion. Bidirectional searches alternate sides on every call.
    pub fn step(&mut self) -> SearchStatus {
        if self.is_finished() {
            return self.status;
        }
        self.status = SearchStatus::Running;
        let goal = self.goal;
        let event = match &mut self.engine {
            Engine::Unidirectional(context) => match context.pop() {
                None => StepEvent::Exhausted,
                Some(finalized) if finalized.point == goal => StepEvent::Found(
                    Some((finalized, Side::Forward)),
                    context.reverse_path(goal),
                ),
                Some(finalized) => {
                    context.expand(finalized.index, &self.navigator);
                    StepEvent::Visited(finalized, Side::Forward)
                }
            },
            Engine::Bidirectional(bi) => bi.half_step(&self.navigator),
            Engine::Idle => return self.status,
        };
        match event {
            StepEvent::Visited(finalized, side) => self.record(finalized, side),
            StepEvent::Found(finalized, points) => {
                if let Some((finalized, side)) = finalized {
                    self.record(finalized, side);
                }
                self.finish_found(points);
            }
            StepEvent::Exhausted => self.finish_exhausted(),
        }
        self.status
    }

    /// Performs one animation tick: both half-steps for bidirectional searches, a single
    /// expansion otherwise.
    pub fn tick(&mut self) -> SearchStatus {
        let steps = if self.algorithm.is_bidirectional() { 2 } else { 1 };
        for _ in 0..steps {
            if self.step().is_terminal() {
                break;
            }
        }
        self.status
    }

    /// Steps until the search terminates.
    pub fn run(&mut self) -> SearchStatus {
        while !self.step().is_terminal() {}
        self.status
    }

    pub fn into_outcome(self) -> SearchOutcome {
        SearchOutcome {
            status: self.status,
            visited: self.visited,
            path: self.path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Grid, TileData};
    use crate::navigator::NavigatorKind;
    use std::f64::consts::SQRT_2;

    fn pathfinder(grid: &Grid, kind: NavigatorKind, algorithm: Algorithm) -> Pathfinder<'_> {
        Pathfinder::new(Navigator::new(grid, kind), algorithm, Heuristic::Octile)
    }

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        let grid = Grid::new(3, 3);
        for kind in NavigatorKind::ALL {
            for algorithm in Algorithm::ALL {
                let start = Point::new(1, 1);
                let outcome = pathfinder(&grid, *kind, *algorithm).find_path(start, start);
                assert!(outcome.is_found());
                assert_eq!(outcome.points(), vec![start]);
                assert_eq!(outcome.visited.len(), 1);
                assert_eq!(outcome.cost(), Some(0.0));
            }
        }
    }

    #[test]
    fn blocked_endpoints_exhaust_immediately() {
        let mut grid = Grid::new(3, 3);
        grid.mutate_default(Point::new(2, 2), true).unwrap();
        let pf = pathfinder(&grid, NavigatorKind::Plus, Algorithm::AStar);
        for (start, goal) in [
            (Point::new(0, 0), Point::new(2, 2)),
            (Point::new(2, 2), Point::new(0, 0)),
            (Point::new(-1, 0), Point::new(0, 0)),
            (Point::new(0, 0), Point::new(3, 0)),
            (Point::new(2, 2), Point::new(2, 2)),
        ] {
            let search = pf.search(start, goal);
            assert_eq!(search.status(), SearchStatus::Exhausted);
            let outcome = search.into_outcome();
            assert!(outcome.path.is_empty());
            assert!(outcome.visited.is_empty());
        }
    }

    #[test]
    fn solve_simple_problem() {
        //  ___
        // |S  |
        // | # |
        // |  G|
        //  ___
        let mut grid = Grid::new(3, 3);
        grid.mutate_default(Point::new(1, 1), true).unwrap();
        for (kind, expected) in [(NavigatorKind::Plus, 5), (NavigatorKind::Asterisk, 4)] {
            for algorithm in Algorithm::ALL {
                let outcome = pathfinder(&grid, kind, *algorithm)
                    .find_path(Point::new(0, 0), Point::new(2, 2));
                assert!(outcome.is_found(), "{} {}", kind, algorithm);
                if *algorithm != Algorithm::Dfs && *algorithm != Algorithm::BestFirst {
                    assert_eq!(outcome.path.len(), expected, "{} {}", kind, algorithm);
                }
            }
        }
    }

    #[test]
    fn stepping_matches_running() {
        let mut grid = Grid::new(6, 6);
        for y in 0..5 {
            grid.mutate_default(Point::new(3, y), true).unwrap();
        }
        for algorithm in Algorithm::ALL {
            let pf = pathfinder(&grid, NavigatorKind::Asterisk, *algorithm);
            let start = Point::new(0, 0);
            let goal = Point::new(5, 0);
            let mut search = pf.search(start, goal);
            assert_eq!(search.status(), SearchStatus::Init);
            let mut steps = 0;
            while !search.tick().is_terminal() {
                assert_eq!(search.status(), SearchStatus::Running);
                assert!(search.path().is_empty());
                steps += 1;
            }
            assert!(steps > 0);
            let stepped = search.into_outcome();
            assert_eq!(stepped, pf.find_path(start, goal));
            // Finished searches stay finished
            let mut search = pf.search(start, goal);
            search.run();
            assert_eq!(search.step(), SearchStatus::Found);
        }
    }

    #[test]
    fn bidirectional_alternates_sides() {
        let grid = Grid::new(7, 1);
        let pf = pathfinder(&grid, NavigatorKind::Plus, Algorithm::BiBfs);
        let outcome = pf.find_path(Point::new(0, 0), Point::new(6, 0));
        assert!(outcome.is_found());
        assert_eq!(outcome.path.len(), 7);
        for (i, tile) in outcome.visited.iter().enumerate() {
            assert_eq!(tile.index, i);
            let expected = if i % 2 == 0 { Side::Forward } else { Side::Backward };
            assert_eq!(tile.side, expected);
        }
    }

    #[test]
    fn path_annotations() {
        let mut grid = Grid::new(3, 3);
        grid.mutate_tile(
            Point::new(1, 1),
            TileData {
                is_solid: false,
                path_cost: 2.0,
            },
        )
        .unwrap();
        let pf = pathfinder(&grid, NavigatorKind::Asterisk, Algorithm::AStar);
        let outcome = pf.find_path(Point::new(0, 0), Point::new(2, 2));
        assert_eq!(outcome.path[0].parent, None);
        for pair in outcome.path.windows(2) {
            assert_eq!(pair[1].parent, Some(pair[0].point));
            assert!(pair[1].cost > pair[0].cost);
        }
        let cost = outcome.cost().unwrap();
        // Skirting the expensive centre beats crossing it diagonally
        assert!((cost - (2.0 + SQRT_2)).abs() < 1e-9);
        assert!(!outcome.points().contains(&Point::new(1, 1)));
    }

    /// Visited tiles carry the same parent links the path was reconstructed from.
    #[test]
    fn visited_parents_form_a_tree() {
        let grid = Grid::new(5, 5);
        let pf = pathfinder(&grid, NavigatorKind::Plus, Algorithm::Dijkstra);
        let outcome = pf.find_path(Point::new(0, 0), Point::new(4, 4));
        assert_eq!(outcome.visited[0].parent, None);
        for tile in &outcome.visited[1..] {
            let parent = tile.parent.unwrap();
            let parent_tile = outcome.visited.iter().find(|t| t.point == parent).unwrap();
            assert!(parent_tile.index < tile.index);
            assert!((tile.g - parent_tile.g - 1.0).abs() < 1e-9);
        }
    }
}
