//! Single-source (or multi-source) shortest paths over a [`Graph`].

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};
use std::hash::Hash;

use tracing::trace;

use super::Cost;
use super::graph::Graph;

/// Best known way to reach a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit<N> {
    /// Node this one was reached from; `None` for search sources.
    pub predecessor: Option<N>,
    pub cost: Cost,
}

/// Per-node best cost and predecessor, built up by a search.
///
/// Entries are only ever added or improved, never removed.
#[derive(Debug, Clone)]
pub struct DistanceTable<N> {
    entries: HashMap<N, Visit<N>>,
}

impl<N: Copy + Eq + Hash> DistanceTable<N> {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn cost(&self, node: &N) -> Option<Cost> {
        self.entries.get(node).map(|v| v.cost)
    }

    pub fn visit(&self, node: &N) -> Option<&Visit<N>> {
        self.entries.get(node)
    }

    pub fn contains(&self, node: &N) -> bool {
        self.entries.contains_key(node)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&N, &Visit<N>)> {
        self.entries.iter()
    }

    /// Follows predecessor links from `node` back to a source and returns
    /// the nodes in travel order.
    pub fn path_to(&self, node: N) -> Option<Vec<N>> {
        let mut path = vec![node];
        let mut current = self.entries.get(&node)?;
        while let Some(previous) = current.predecessor {
            path.push(previous);
            current = &self.entries[&previous];
        }
        path.reverse();
        Some(path)
    }

    /// Records `cost` for `node` if it is new or cheaper than what is known.
    fn relax(&mut self, node: N, predecessor: Option<N>, cost: Cost) -> bool {
        match self.entries.entry(node) {
            Entry::Occupied(mut known) if cost < known.get().cost => {
                known.insert(Visit { predecessor, cost });
                true
            }
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(Visit { predecessor, cost });
                true
            }
        }
    }
}

/// Frontier entry, ordered so `BinaryHeap` pops the cheapest first.
///
/// A node can sit in the heap several times with different costs; only the
/// first pop settles it and later ones are discarded.
#[derive(Debug, Clone, Copy)]
struct Frontier<N> {
    cost: Cost,
    node: N,
}

impl<N> Ord for Frontier<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.cmp(&self.cost)
    }
}

impl<N> PartialOrd for Frontier<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N> PartialEq for Frontier<N> {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost
    }
}

impl<N> Eq for Frontier<N> {}

/// Lifecycle of a [`Search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Frontier seeded with the sources, nothing popped yet.
    Initialized,
    /// Popping and relaxing.
    Running,
    /// Goal reached or frontier exhausted. Terminal.
    Done,
}

/// An in-progress Dijkstra search.
///
/// Owns its frontier and distance table; the graph is only borrowed, so any
/// number of searches may run concurrently over the same graph.
pub struct Search<'g, G: Graph> {
    graph: &'g G,
    frontier: BinaryHeap<Frontier<G::Node>>,
    table: DistanceTable<G::Node>,
    settled: HashSet<G::Node>,
    state: SearchState,
    reached: Option<(G::Node, Cost)>,
}

impl<'g, G: Graph> Search<'g, G> {
    pub fn new(graph: &'g G, start: G::Node) -> Self {
        Self::from_sources(graph, [start])
    }

    /// Starts from every node in `sources` at cost 0.
    pub fn from_sources(graph: &'g G, sources: impl IntoIterator<Item = G::Node>) -> Self {
        let mut table = DistanceTable::new();
        let mut frontier = BinaryHeap::new();
        for source in sources {
            if table.relax(source, None, 0) {
                frontier.push(Frontier {
                    cost: 0,
                    node: source,
                });
            }
        }
        Self {
            graph,
            frontier,
            table,
            settled: HashSet::new(),
            state: SearchState::Initialized,
            reached: None,
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn table(&self) -> &DistanceTable<G::Node> {
        &self.table
    }

    pub fn into_table(self) -> DistanceTable<G::Node> {
        self.table
    }

    /// Settles the next node and relaxes its edges.
    ///
    /// Returns `None` once the search is done.
    pub fn settle_next(&mut self) -> Option<(G::Node, Cost)> {
        let (node, cost) = self.pop_unsettled()?;
        self.expand(node, cost);
        Some((node, cost))
    }

    /// Runs until a node satisfying `is_goal` is popped, returning it with
    /// its final cost, or `None` if the frontier empties first.
    ///
    /// Once done, the search keeps reporting the same outcome.
    pub fn run_until(
        &mut self,
        mut is_goal: impl FnMut(&G::Node) -> bool,
    ) -> Option<(G::Node, Cost)> {
        while let Some((node, cost)) = self.pop_unsettled() {
            if is_goal(&node) {
                self.reached = Some((node, cost));
                self.state = SearchState::Done;
                trace!(settled = self.settled.len(), cost, "goal reached");
                return self.reached;
            }
            self.expand(node, cost);
        }
        self.reached
    }

    /// Runs until every reachable node is settled.
    pub fn run_to_exhaustion(&mut self) {
        while self.settle_next().is_some() {}
    }

    fn pop_unsettled(&mut self) -> Option<(G::Node, Cost)> {
        if self.state == SearchState::Done {
            return None;
        }
        self.state = SearchState::Running;
        while let Some(Frontier { cost, node }) = self.frontier.pop() {
            if self.settled.insert(node) {
                return Some((node, cost));
            }
        }
        self.state = SearchState::Done;
        trace!(settled = self.settled.len(), "frontier exhausted");
        None
    }

    fn expand(&mut self, node: G::Node, cost: Cost) {
        for edge in self.graph.edges(node) {
            let candidate = cost + edge.weight;
            if self.table.relax(edge.to, Some(node), candidate) {
                self.frontier.push(Frontier {
                    cost: candidate,
                    node: edge.to,
                });
            }
        }
    }
}

/// Outcome of [`shortest_path_with_trace`].
#[derive(Debug, Clone)]
pub struct Trace<N> {
    /// The goal node that was reached and its cost; `None` if unreachable.
    pub reached: Option<(N, Cost)>,
    pub table: DistanceTable<N>,
}

impl<N: Copy + Eq + Hash> Trace<N> {
    pub fn cost(&self) -> Option<Cost> {
        self.reached.map(|(_, cost)| cost)
    }

    /// Nodes from the start to the reached goal.
    pub fn path(&self) -> Option<Vec<N>> {
        self.reached.and_then(|(goal, _)| self.table.path_to(goal))
    }
}

/// Minimal cost from `start` to `goal`, or `None` if `goal` is unreachable.
pub fn shortest_path<G: Graph>(graph: &G, start: G::Node, goal: G::Node) -> Option<Cost> {
    shortest_path_by(graph, start, |node| *node == goal).map(|(_, cost)| cost)
}

/// Minimal cost from `start` to the first node accepted by `is_goal`.
pub fn shortest_path_by<G, F>(graph: &G, start: G::Node, is_goal: F) -> Option<(G::Node, Cost)>
where
    G: Graph,
    F: FnMut(&G::Node) -> bool,
{
    Search::new(graph, start).run_until(is_goal)
}

/// Like [`shortest_path_by`] but also hands back the distance table for
/// predecessor reconstruction.
pub fn shortest_path_with_trace<G, F>(graph: &G, start: G::Node, is_goal: F) -> Trace<G::Node>
where
    G: Graph,
    F: FnMut(&G::Node) -> bool,
{
    let mut search = Search::new(graph, start);
    let reached = search.run_until(is_goal);
    Trace {
        reached,
        table: search.into_table(),
    }
}

/// Costs from the nearest of `sources` to every reachable node.
pub fn distance_map<G: Graph>(
    graph: &G,
    sources: impl IntoIterator<Item = G::Node>,
) -> DistanceTable<G::Node> {
    let mut search = Search::from_sources(graph, sources);
    search.run_to_exhaustion();
    search.into_table()
}

/// Whether `goal` can be reached from `start` at all, ignoring weights.
pub fn is_reachable<G: Graph>(graph: &G, start: G::Node, goal: G::Node) -> bool {
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(node) = queue.pop_front() {
        if node == goal {
            return true;
        }
        for edge in graph.edges(node) {
            if seen.insert(edge.to) {
                queue.push_back(edge.to);
            }
        }
    }
    false
}
