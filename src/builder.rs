use crate::algorithm::Algorithm;
use crate::error::ConfigurationError;
use crate::grid::Grid;
use crate::heuristic::Heuristic;
use crate::navigator::{Navigator, NavigatorKind};
use crate::search::Pathfinder;

/// The validated configuration triple held by a [PathfinderBuilder].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathfinderConfig {
    pub navigator: NavigatorKind,
    pub algorithm: Algorithm,
    pub heuristic: Heuristic,
}

impl Default for PathfinderConfig {
    fn default() -> PathfinderConfig {
        PathfinderConfig {
            navigator: NavigatorKind::Plus,
            algorithm: Algorithm::AStar,
            heuristic: Heuristic::Null,
        }
    }
}

/// Fluent construction of a [Pathfinder] from string keys. Every setter validates its key
/// immediately and leaves the builder untouched when the key is unknown.
///
/// ```
/// use tile_pathfinder::{Grid, PathfinderBuilder, Point};
///
/// let grid = Grid::new(5, 5);
/// let mut builder = PathfinderBuilder::new(&grid);
/// builder
///     .set_navigator("asterisk")?
///     .set_algorithm("A*")?
///     .set_heuristic("octile")?;
/// let outcome = builder.build().find_path(Point::new(0, 0), Point::new(4, 4));
/// assert_eq!(outcome.path.len(), 5);
/// # Ok::<(), tile_pathfinder::ConfigurationError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct PathfinderBuilder<'g> {
    grid: &'g Grid,
    config: PathfinderConfig,
}

impl<'g> PathfinderBuilder<'g> {
    pub fn new(grid: &'g Grid) -> PathfinderBuilder<'g> {
        Self::from_config(grid, PathfinderConfig::default())
    }
    pub fn from_config(grid: &'g Grid, config: PathfinderConfig) -> PathfinderBuilder<'g> {
        PathfinderBuilder { grid, config }
    }
    pub fn config(&self) -> PathfinderConfig {
        self.config
    }

    pub fn set_navigator(&mut self, navigator: &str) -> Result<&mut Self, ConfigurationError> {
        self.config.navigator = navigator.parse()?;
        Ok(self)
    }
    pub fn set_algorithm(&mut self, algorithm: &str) -> Result<&mut Self, ConfigurationError> {
        self.config.algorithm = algorithm.parse()?;
        Ok(self)
    }
    pub fn set_heuristic(&mut self, heuristic: &str) -> Result<&mut Self, ConfigurationError> {
        self.config.heuristic = heuristic.parse()?;
        Ok(self)
    }

    /// Builds a pathfinder with the set algorithm, heuristic, and navigator.
    pub fn build(&self) -> Pathfinder<'g> {
        let PathfinderConfig {
            navigator,
            algorithm,
            heuristic,
        } = self.config;
        Pathfinder::new(Navigator::new(self.grid, navigator), algorithm, heuristic)
    }

    /// Whether the heuristic setting affects the given algorithm. Unknown keys yield false.
    pub fn uses_heuristic(algorithm: &str) -> bool {
        algorithm
            .parse::<Algorithm>()
            .map_or(false, Algorithm::uses_heuristic)
    }

    /// True iff a "bi-" prefixed variant of the algorithm is registered.
    pub fn has_bidirectional(algorithm: &str) -> bool {
        Self::make_bidirectional(algorithm)
            .parse::<Algorithm>()
            .is_ok()
    }

    pub fn make_bidirectional(algorithm: &str) -> String {
        format!("bi-{}", algorithm)
    }

    /// Whether tile costs matter to the order the algorithm explores in.
    pub fn uses_weights(algorithm: &str) -> bool {
        algorithm
            .parse::<Algorithm>()
            .map_or(false, Algorithm::uses_weights)
    }

    /// Whether the algorithm's parent links are dense enough to render as direction arrows.
    pub fn uses_breadth_tree(algorithm: &str) -> bool {
        algorithm
            .parse::<Algorithm>()
            .map_or(false, Algorithm::uses_breadth_tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let grid = Grid::new(2, 2);
        let builder = PathfinderBuilder::new(&grid);
        assert_eq!(builder.config(), PathfinderConfig::default());
        let pathfinder = builder.build();
        assert_eq!(pathfinder.algorithm(), Algorithm::AStar);
        assert_eq!(pathfinder.navigator().kind(), NavigatorKind::Plus);
        assert_eq!(pathfinder.heuristic(), Heuristic::Null);
    }

    #[test]
    fn unknown_keys_leave_state_unchanged() {
        let grid = Grid::new(2, 2);
        let mut builder = PathfinderBuilder::new(&grid);
        builder
            .set_navigator("ASTERISK")
            .unwrap()
            .set_algorithm("Bi-BFS")
            .unwrap()
            .set_heuristic("Chebyshev")
            .unwrap();
        let before = builder.config();
        assert_eq!(
            builder.set_navigator("hexagon").unwrap_err(),
            ConfigurationError::UnknownNavigator("hexagon".to_owned())
        );
        assert_eq!(
            builder.set_algorithm("jps").unwrap_err(),
            ConfigurationError::UnknownAlgorithm("jps".to_owned())
        );
        assert_eq!(
            builder.set_heuristic("").unwrap_err(),
            ConfigurationError::UnknownHeuristic(String::new())
        );
        assert_eq!(builder.config(), before);
        assert_eq!(before.navigator, NavigatorKind::Asterisk);
        assert_eq!(before.algorithm, Algorithm::BiBfs);
        assert_eq!(before.heuristic, Heuristic::Chebyshev);
    }

    #[test]
    fn dijkstra_forces_null_heuristic() {
        let grid = Grid::new(2, 2);
        let mut builder = PathfinderBuilder::new(&grid);
        builder
            .set_algorithm("dijkstra")
            .unwrap()
            .set_heuristic("euclidean")
            .unwrap();
        assert_eq!(builder.build().heuristic(), Heuristic::Null);
        assert_eq!(builder.build().algorithm_name(), "Dijkstra");
    }

    #[test]
    fn capability_queries() {
        assert!(PathfinderBuilder::uses_heuristic("a*"));
        assert!(PathfinderBuilder::uses_heuristic("bi-a*"));
        assert!(PathfinderBuilder::uses_heuristic("best-first"));
        assert!(!PathfinderBuilder::uses_heuristic("bi-dijkstra"));
        assert!(!PathfinderBuilder::uses_heuristic("bfs"));

        let bidirectional: Vec<_> = Algorithm::ALL
            .iter()
            .map(|a| a.as_str())
            .filter(|a| PathfinderBuilder::has_bidirectional(a))
            .collect();
        assert_eq!(bidirectional, vec!["dijkstra", "a*", "bfs"]);
        assert!(!PathfinderBuilder::has_bidirectional("bi-a*"));
        assert!(!PathfinderBuilder::has_bidirectional("nonsense"));
        assert_eq!(PathfinderBuilder::make_bidirectional("bfs"), "bi-bfs");

        assert!(PathfinderBuilder::uses_weights("a*"));
        assert!(PathfinderBuilder::uses_weights("bi-dijkstra"));
        assert!(!PathfinderBuilder::uses_weights("best-first"));
        assert!(!PathfinderBuilder::uses_weights("bi-bfs"));

        assert!(PathfinderBuilder::uses_breadth_tree("bfs"));
        assert!(!PathfinderBuilder::uses_breadth_tree("dfs"));
        assert!(!PathfinderBuilder::uses_breadth_tree("unknown"));
    }

    /// Every registered algorithm answers the queries the same way through both views.
    #[test]
    fn queries_match_registry() {
        for algorithm in Algorithm::ALL {
            let key = algorithm.as_str();
            assert_eq!(PathfinderBuilder::uses_heuristic(key), algorithm.uses_heuristic());
            assert_eq!(
                PathfinderBuilder::has_bidirectional(key),
                algorithm.bidirectional().is_some()
            );
            assert_eq!(PathfinderBuilder::uses_weights(key), algorithm.uses_weights());
            assert_eq!(
                PathfinderBuilder::uses_breadth_tree(key),
                algorithm.uses_breadth_tree()
            );
        }
    }
}
