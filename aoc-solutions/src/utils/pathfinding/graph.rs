use std::hash::Hash;

use super::Cost;

/// A directed, weighted edge produced on demand during a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge<N> {
    pub to: N,
    pub weight: Cost,
}

impl<N> Edge<N> {
    pub const fn new(to: N, weight: Cost) -> Self {
        Self { to, weight }
    }
}

/// Neighbor generator for the search engine.
///
/// `edges` must be a pure function of `node`: calling it twice yields the same
/// edges. All weights must be non-negative (guaranteed by [`Cost`] being
/// unsigned); the engine does not validate anything else.
pub trait Graph {
    /// A search state. Cheap to copy and hashable.
    type Node: Copy + Eq + Hash;

    /// Outgoing edges of `node`.
    fn edges(&self, node: Self::Node) -> impl Iterator<Item = Edge<Self::Node>>;
}

/// A graph that can also enumerate the edges leading *into* a node.
///
/// Each reverse edge `(to: m, weight: w)` of `n` must mirror a forward edge
/// `m -> n` of the same weight.
pub trait ReversibleGraph: Graph {
    fn reverse_edges(&self, node: Self::Node) -> impl Iterator<Item = Edge<Self::Node>>;
}

/// View of a [`ReversibleGraph`] with every edge flipped.
///
/// Searching from a goal over `Reversed` yields each node's remaining cost
/// to that goal in the original graph.
#[derive(Debug, Clone, Copy)]
pub struct Reversed<'g, G>(pub &'g G);

impl<G: ReversibleGraph> Graph for Reversed<'_, G> {
    type Node = G::Node;

    fn edges(&self, node: Self::Node) -> impl Iterator<Item = Edge<Self::Node>> {
        self.0.reverse_edges(node)
    }
}
