use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::trace;
use smallvec::SmallVec;

use super::frontier::{Frontier, SmallestCostHolder};
use super::Side;
use crate::algorithm::{SearchPolicy, StepCost};
use crate::navigator::Navigator;
use crate::N_SMALLVEC_SIZE;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

const NO_PARENT: usize = usize::MAX;

/// Best known way of reaching a point. `parent` indexes the node table.
#[derive(Clone, Copy, Debug)]
struct Node {
    parent: usize,
    g: f64,
    closed: bool,
}

/// A node as it leaves the open container for good.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Finalized {
    pub index: usize,
    pub point: Point,
    pub parent: Option<Point>,
    pub g: f64,
    pub h: f64,
}

/// State of one search direction: a node table doubling as the closed set and the open
/// container holding indices into it. Entries are never removed from the open container when a
/// better route to a point is found, stale entries are skipped when they surface.
#[derive(Clone, Debug)]
pub(crate) struct SearchContext {
    side: Side,
    target: Point,
    policy: SearchPolicy,
    nodes: FxIndexMap<Point, Node>,
    frontier: Frontier,
    seq: usize,
}

impl SearchContext {
    /// Starts a search rooted at `root` that estimates remaining cost towards `target`.
    pub fn new(root: Point, target: Point, policy: SearchPolicy, side: Side) -> SearchContext {
        let mut context = SearchContext {
            side,
            target,
            policy,
            nodes: FxIndexMap::default(),
            frontier: Frontier::new(policy.frontier),
            seq: 0,
        };
        let (index, _) = context.nodes.insert_full(
            root,
            Node {
                parent: NO_PARENT,
                g: 0.0,
                closed: false,
            },
        );
        context.push(index, root, 0.0);
        context
    }

    fn push(&mut self, index: usize, point: Point, g: f64) {
        let h = self.policy.heuristic.distance(point, self.target);
        self.frontier.push(SmallestCostHolder {
            estimated_cost: g + h,
            cost: g,
            index,
            seq: self.seq,
        });
        self.seq += 1;
    }

    fn is_stale(&self, holder: &SmallestCostHolder) -> bool {
        // We may have inserted a node several times into the open container if we found
        // a better way to access it. Only the entry carrying the best cost is live.
        self.nodes
            .get_index(holder.index)
            .map_or(true, |(_, node)| node.closed || holder.cost > node.g)
    }

    fn discard_stale(&mut self) {
        while let Some(&holder) = self.frontier.peek() {
            if !self.is_stale(&holder) {
                break;
            }
            self.frontier.pop();
        }
    }

    /// Priority of the next live candidate, [None] once the open container is exhausted.
    pub fn min_priority(&mut self) -> Option<f64> {
        self.discard_stale();
        self.frontier.peek().map(|holder| holder.estimated_cost)
    }

    /// Takes the next live candidate out of the open container and finalizes it.
    pub fn pop(&mut self) -> Option<Finalized> {
        self.discard_stale();
        let holder = self.frontier.pop()?;
        let (point, parent_index, g) = {
            let (point, node) = self.nodes.get_index_mut(holder.index)?;
            node.closed = true;
            (*point, node.parent, node.g)
        };
        let parent = self.nodes.get_index(parent_index).map(|(p, _)| *p);
        Some(Finalized {
            index: holder.index,
            point,
            parent,
            g,
            h: self.policy.heuristic.distance(point, self.target),
        })
    }

    /// Relaxes the moves out of a finalized node and returns every point whose tentative
    /// distance improved, together with that distance.
    pub fn expand(
        &mut self,
        index: usize,
        navigator: &Navigator,
    ) -> SmallVec<[(Point, f64); N_SMALLVEC_SIZE]> {
        let mut relaxed = SmallVec::new();
        let Some((&point, &Node { g, .. })) = self.nodes.get_index(index) else {
            return relaxed;
        };
        let moves = match self.side {
            Side::Forward => navigator.successors(point),
            Side::Backward => navigator.predecessors(point),
        };
        for (successor, move_cost) in moves {
            let new_cost = g + match self.policy.step {
                StepCost::Unit => 1.0,
                StepCost::Navigator => move_cost,
                StepCost::Zero => 0.0,
            };
            let n = match self.nodes.entry(successor) {
                Vacant(e) => {
                    let n = e.index();
                    e.insert(Node {
                        parent: index,
                        g: new_cost,
                        closed: false,
                    });
                    n
                }
                Occupied(mut e) => {
                    let node = e.get_mut();
                    if node.closed || node.g <= new_cost {
                        continue;
                    }
                    node.g = new_cost;
                    node.parent = index;
                    e.index()
                }
            };
            self.push(n, successor, new_cost);
            relaxed.push((successor, new_cost));
        }
        trace!(
            "{:?} expanded {}, {} improved, {} open",
            self.side,
            point,
            relaxed.len(),
            self.frontier.len()
        );
        relaxed
    }

    /// Best known distance from the root to a point, if the point has been generated.
    pub fn g(&self, point: Point) -> Option<f64> {
        self.nodes.get(&point).map(|node| node.g)
    }

    /// Follows the parent links from a point back to the root, point first.
    pub fn path_to_root(&self, point: Point) -> Vec<Point> {
        let Some(start) = self.nodes.get_index_of(&point) else {
            return Vec::new();
        };
        std::iter::successors(Some(start), |&i| {
            self.nodes.get_index(i).map(|(_, node)| node.parent)
        })
        .map_while(|i| self.nodes.get_index(i).map(|(p, _)| *p))
        .collect()
    }

    /// The path from the root to a point, root first.
    pub fn reverse_path(&self, point: Point) -> Vec<Point> {
        let mut path = self.path_to_root(point);
        path.reverse();
        path
    }
}
