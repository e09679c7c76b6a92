//! Enumeration of minimal-cost paths once the optimum is known.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use tracing::debug;

use super::Cost;
use super::dijkstra::{DistanceTable, shortest_path_by};
use super::graph::Graph;

/// Source of the exact remaining cost from a node to the goal.
pub trait RemainingCost<N> {
    /// Cheapest cost from `node` to any goal, or `None` if no goal is
    /// reachable from it.
    fn remaining(&mut self, node: N) -> Option<Cost>;
}

/// A table from a search over the reversed graph, seeded at the goals.
impl<N: Copy + Eq + Hash> RemainingCost<N> for DistanceTable<N> {
    fn remaining(&mut self, node: N) -> Option<Cost> {
        self.cost(&node)
    }
}

/// Answers remaining-cost queries by running a fresh forward search from
/// the node, remembering every answer.
pub struct RequeryRemaining<'g, G: Graph, F> {
    graph: &'g G,
    is_goal: F,
    memo: HashMap<G::Node, Option<Cost>>,
}

impl<'g, G, F> RequeryRemaining<'g, G, F>
where
    G: Graph,
    F: Fn(&G::Node) -> bool,
{
    pub fn new(graph: &'g G, is_goal: F) -> Self {
        Self {
            graph,
            is_goal,
            memo: HashMap::new(),
        }
    }

    /// Number of searches actually run so far.
    pub fn searches(&self) -> usize {
        self.memo.len()
    }
}

impl<G, F> RemainingCost<G::Node> for RequeryRemaining<'_, G, F>
where
    G: Graph,
    F: Fn(&G::Node) -> bool,
{
    fn remaining(&mut self, node: G::Node) -> Option<Cost> {
        if let Some(&known) = self.memo.get(&node) {
            return known;
        }
        let found = shortest_path_by(self.graph, node, &self.is_goal).map(|(_, cost)| cost);
        self.memo.insert(node, found);
        found
    }
}

/// Walks every path from `start` whose total cost equals `optimal`.
///
/// A branch is cut as soon as its accumulated cost plus the remaining cost
/// of its last node exceeds `optimal`, so only prefixes of minimal paths are
/// ever extended. Goal nodes end a path; they are not expanded further.
pub struct PathEnumerator<'g, G: Graph, F, R> {
    graph: &'g G,
    start: G::Node,
    is_goal: F,
    optimal: Cost,
    remaining: R,
    lookups: usize,
}

impl<'g, G, F> PathEnumerator<'g, G, F, RequeryRemaining<'g, G, F>>
where
    G: Graph,
    F: Fn(&G::Node) -> bool + Clone,
{
    /// Enumerator that finds remaining costs by re-running the engine.
    pub fn requerying(graph: &'g G, start: G::Node, is_goal: F, optimal: Cost) -> Self {
        let remaining = RequeryRemaining::new(graph, is_goal.clone());
        Self::new(graph, start, is_goal, optimal, remaining)
    }
}

impl<'g, G, F, R> PathEnumerator<'g, G, F, R>
where
    G: Graph,
    F: Fn(&G::Node) -> bool,
    R: RemainingCost<G::Node>,
{
    pub fn new(graph: &'g G, start: G::Node, is_goal: F, optimal: Cost, remaining: R) -> Self {
        Self {
            graph,
            start,
            is_goal,
            optimal,
            remaining,
            lookups: 0,
        }
    }

    fn on_budget(&mut self, node: G::Node, cost: Cost) -> bool {
        self.lookups += 1;
        self.remaining
            .remaining(node)
            .is_some_and(|rest| cost + rest <= self.optimal)
    }

    /// Every simple minimal path, each as the sequence of its nodes.
    pub fn minimal_paths(mut self) -> Vec<Vec<G::Node>> {
        let mut paths = Vec::new();
        let mut path: Vec<G::Node> = Vec::new();
        let mut stack = Vec::new();
        if self.on_budget(self.start, 0) {
            stack.push((self.start, 0, 0));
        }

        while let Some((node, cost, depth)) = stack.pop() {
            path.truncate(depth);
            if path.contains(&node) {
                continue;
            }
            path.push(node);

            if (self.is_goal)(&node) {
                if cost == self.optimal {
                    paths.push(path.clone());
                }
                continue;
            }

            for edge in self.graph.edges(node) {
                let next = cost + edge.weight;
                if self.on_budget(edge.to, next) {
                    stack.push((edge.to, next, depth + 1));
                }
            }
        }

        debug!(
            paths = paths.len(),
            lookups = self.lookups,
            "enumerated minimal paths"
        );
        paths
    }

    /// Every node lying on at least one minimal path.
    ///
    /// A node admitted under the budget is always reached at its true
    /// distance from `start`, so each node needs to be expanded only once.
    pub fn covered_nodes(mut self) -> HashSet<G::Node> {
        let mut covered = HashSet::new();
        let mut stack = Vec::new();
        if self.on_budget(self.start, 0) {
            stack.push((self.start, 0));
        }

        while let Some((node, cost)) = stack.pop() {
            if !covered.insert(node) || (self.is_goal)(&node) {
                continue;
            }
            for edge in self.graph.edges(node) {
                let next = cost + edge.weight;
                if !covered.contains(&edge.to) && self.on_budget(edge.to, next) {
                    stack.push((edge.to, next));
                }
            }
        }

        debug!(
            covered = covered.len(),
            lookups = self.lookups,
            "collected nodes on minimal paths"
        );
        covered
    }
}
