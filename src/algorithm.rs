use core::fmt;
use std::str::FromStr;

use crate::error::ConfigurationError;
use crate::heuristic::Heuristic;

/// Registered search algorithms. Each variant maps onto a [SearchPolicy] that drives the one
/// shared search loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    #[cfg_attr(feature = "serde", serde(rename = "dijkstra"))]
    Dijkstra,
    #[cfg_attr(feature = "serde", serde(rename = "best-first"))]
    BestFirst,
    #[cfg_attr(feature = "serde", serde(rename = "a*"))]
    AStar,
    #[cfg_attr(feature = "serde", serde(rename = "bfs"))]
    Bfs,
    #[cfg_attr(feature = "serde", serde(rename = "dfs"))]
    Dfs,
    #[cfg_attr(feature = "serde", serde(rename = "bi-a*"))]
    BiAStar,
    #[cfg_attr(feature = "serde", serde(rename = "bi-dijkstra"))]
    BiDijkstra,
    #[cfg_attr(feature = "serde", serde(rename = "bi-bfs"))]
    BiBfs,
}

/// Order in which candidates leave the open container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FrontierKind {
    Fifo,
    Lifo,
    Priority,
}

/// Where the cost of a single move comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StepCost {
    /// Every move costs one, tile costs are ignored.
    Unit,
    /// The navigator's step cost.
    Navigator,
    /// Moves are free so the tentative distance never accumulates.
    Zero,
}

/// Parameters of a search variant: candidates are ordered by `g + heuristic` within the given
/// frontier discipline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SearchPolicy {
    pub frontier: FrontierKind,
    pub step: StepCost,
    pub heuristic: Heuristic,
}

impl Algorithm {
    pub const ALL: &'static [Algorithm] = &[
        Algorithm::Dijkstra,
        Algorithm::BestFirst,
        Algorithm::AStar,
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::BiAStar,
        Algorithm::BiDijkstra,
        Algorithm::BiBfs,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::BestFirst => "best-first",
            Algorithm::AStar => "a*",
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::BiAStar => "bi-a*",
            Algorithm::BiDijkstra => "bi-dijkstra",
            Algorithm::BiBfs => "bi-bfs",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::BestFirst => "Best-First Search",
            Algorithm::AStar => "A* Search",
            Algorithm::Bfs => "Breadth First Search",
            Algorithm::Dfs => "Depth First Search",
            Algorithm::BiAStar => "Bidirectional A*",
            Algorithm::BiDijkstra => "Bidirectional Dijkstra",
            Algorithm::BiBfs => "Bidirectional BFS",
        }
    }

    pub fn is_bidirectional(self) -> bool {
        matches!(
            self,
            Algorithm::BiAStar | Algorithm::BiDijkstra | Algorithm::BiBfs
        )
    }

    /// The registered "bi-" counterpart, if there is one.
    pub fn bidirectional(self) -> Option<Algorithm> {
        match self {
            Algorithm::AStar => Some(Algorithm::BiAStar),
            Algorithm::Dijkstra => Some(Algorithm::BiDijkstra),
            Algorithm::Bfs => Some(Algorithm::BiBfs),
            Algorithm::BestFirst
            | Algorithm::Dfs
            | Algorithm::BiAStar
            | Algorithm::BiDijkstra
            | Algorithm::BiBfs => None,
        }
    }

    /// Whether the configured heuristic influences the search order.
    pub fn uses_heuristic(self) -> bool {
        matches!(
            self,
            Algorithm::AStar | Algorithm::BiAStar | Algorithm::BestFirst
        )
    }

    /// Whether tile step costs influence the search order.
    pub fn uses_weights(self) -> bool {
        self.policy(Heuristic::Null).step == StepCost::Navigator
    }

    /// Whether the parent links form a breadth tree worth rendering as direction arrows.
    pub fn uses_breadth_tree(self) -> bool {
        self.policy(Heuristic::Null).frontier != FrontierKind::Lifo
    }

    pub(crate) fn policy(self, heuristic: Heuristic) -> SearchPolicy {
        let (frontier, step, heuristic) = match self {
            Algorithm::AStar | Algorithm::BiAStar => {
                (FrontierKind::Priority, StepCost::Navigator, heuristic)
            }
            Algorithm::Dijkstra | Algorithm::BiDijkstra => {
                (FrontierKind::Priority, StepCost::Navigator, Heuristic::Null)
            }
            Algorithm::BestFirst => (FrontierKind::Priority, StepCost::Zero, heuristic),
            Algorithm::Bfs | Algorithm::BiBfs => {
                (FrontierKind::Fifo, StepCost::Unit, Heuristic::Null)
            }
            Algorithm::Dfs => (FrontierKind::Lifo, StepCost::Unit, Heuristic::Null),
        };
        SearchPolicy {
            frontier,
            step,
            heuristic,
        }
    }
}

impl FromStr for Algorithm {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.to_ascii_lowercase();
        Algorithm::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == key)
            .ok_or_else(|| ConfigurationError::UnknownAlgorithm(s.to_owned()))
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
