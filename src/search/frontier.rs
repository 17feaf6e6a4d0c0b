use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use crate::algorithm::FrontierKind;

/// A candidate waiting in the open container. `index` refers to the node table of the
/// [SearchContext](super::context::SearchContext) that pushed it.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SmallestCostHolder {
    pub estimated_cost: f64,
    pub cost: f64,
    pub index: usize,
    /// Insertion counter, makes the ordering total and replays reproducible.
    pub seq: usize,
}

impl Eq for SmallestCostHolder {}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // First orders per estimated cost, then creates subordering
        // based on cost, favoring exploration of largest cost nodes first.
        // Remaining ties go to the most recently generated candidate.
        other
            .estimated_cost
            .total_cmp(&self.estimated_cost)
            .then_with(|| self.cost.total_cmp(&other.cost))
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Open container of a search, ordered per [FrontierKind].
#[derive(Clone, Debug)]
pub(crate) enum Frontier {
    Queue(VecDeque<SmallestCostHolder>),
    Stack(Vec<SmallestCostHolder>),
    Heap(BinaryHeap<SmallestCostHolder>),
}

impl Frontier {
    pub fn new(kind: FrontierKind) -> Frontier {
        match kind {
            FrontierKind::Fifo => Frontier::Queue(VecDeque::new()),
            FrontierKind::Lifo => Frontier::Stack(Vec::new()),
            FrontierKind::Priority => Frontier::Heap(BinaryHeap::new()),
        }
    }
    pub fn push(&mut self, holder: SmallestCostHolder) {
        match self {
            Frontier::Queue(q) => q.push_back(holder),
            Frontier::Stack(s) => s.push(holder),
            Frontier::Heap(h) => h.push(holder),
        }
    }
    pub fn pop(&mut self) -> Option<SmallestCostHolder> {
        match self {
            Frontier::Queue(q) => q.pop_front(),
            Frontier::Stack(s) => s.pop(),
            Frontier::Heap(h) => h.pop(),
        }
    }
    /// The candidate [pop](Self::pop) would return next.
    pub fn peek(&self) -> Option<&SmallestCostHolder> {
        match self {
            Frontier::Queue(q) => q.front(),
            Frontier::Stack(s) => s.last(),
            Frontier::Heap(h) => h.peek(),
        }
    }
    pub fn len(&self) -> usize {
        match self {
            Frontier::Queue(q) => q.len(),
            Frontier::Stack(s) => s.len(),
            Frontier::Heap(h) => h.len(),
        }
    }
}
