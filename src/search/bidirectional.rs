use grid_util::point::Point;
use log::debug;

use super::context::SearchContext;
use super::{Side, StepEvent};
use crate::algorithm::SearchPolicy;
use crate::navigator::Navigator;

/// Cheapest complete path found so far, running through `point`.
#[derive(Clone, Copy, Debug)]
struct Meeting {
    point: Point,
    cost: f64,
}

/// Two searches in strict alternation, one rooted at the start and one at the goal.
///
/// The search does not stop when the frontiers first touch. Every time either side improves a
/// point the other side has already reached, the sum of both distances is a complete path and
/// the cheapest one is kept. The search ends once the next priority of either open container is
/// no smaller than that cost, at which point no unexplored route can beat it.
#[derive(Clone, Debug)]
pub(crate) struct Bidirectional {
    forward: SearchContext,
    backward: SearchContext,
    turn: Side,
    best: Option<Meeting>,
}

impl Bidirectional {
    pub fn new(start: Point, goal: Point, policy: SearchPolicy) -> Bidirectional {
        Bidirectional {
            forward: SearchContext::new(start, goal, policy, Side::Forward),
            backward: SearchContext::new(goal, start, policy, Side::Backward),
            turn: Side::Forward,
            best: None,
        }
    }

    /// The side the next half-step expands.
    pub fn turn(&self) -> Side {
        self.turn
    }

    fn should_stop(&mut self, best: f64) -> bool {
        let forward = self.forward.min_priority().unwrap_or(f64::INFINITY);
        let backward = self.backward.min_priority().unwrap_or(f64::INFINITY);
        forward.max(backward) >= best
    }

    /// Forward parent chain from the start to the meeting point, followed by the backward chain
    /// from the meeting point to the goal.
    fn path(&self, meeting: Point) -> Vec<Point> {
        let mut path = self.forward.reverse_path(meeting);
        path.extend(self.backward.path_to_root(meeting).into_iter().skip(1));
        path
    }

    /// Expands one node of the side whose turn it is.
    pub fn half_step(&mut self, navigator: &Navigator) -> StepEvent {
        if let Some(best) = self.best {
            if self.should_stop(best.cost) {
                return StepEvent::Found(None, self.path(best.point));
            }
        }
        let side = self.turn;
        self.turn = side.opposite();
        let (this, other) = match side {
            Side::Forward => (&mut self.forward, &self.backward),
            Side::Backward => (&mut self.backward, &self.forward),
        };
        let Some(finalized) = this.pop() else {
            // This side explored its whole component without reaching the other root
            return StepEvent::Exhausted;
        };
        let mut candidate = other
            .g(finalized.point)
            .map(|g_other| (finalized.point, finalized.g + g_other));
        for (point, g) in this.expand(finalized.index, navigator) {
            if let Some(g_other) = other.g(point) {
                let cost = g + g_other;
                if candidate.map_or(true, |(_, c)| cost < c) {
                    candidate = Some((point, cost));
                }
            }
        }
        if let Some((point, cost)) = candidate {
            if self.best.map_or(true, |best| cost < best.cost) {
                debug!("{:?} search met at {} with cost {}", side, point, cost);
                self.best = Some(Meeting { point, cost });
            }
        }
        StepEvent::Visited(finalized, side)
    }
}
