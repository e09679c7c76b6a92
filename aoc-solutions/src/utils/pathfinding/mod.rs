//! Weighted shortest-path search over lazily generated grid graphs.
//!
//! The pieces stack up as follows:
//!
//! - [`grid`]: coordinates, facings and bounds used as search nodes.
//! - [`graph`]: the [`Graph`] trait through which the engine asks for the
//!   outgoing edges of a node, plus a [`Reversed`] view.
//! - [`neighbors`]: ready-made graphs for walled grids, with or without a
//!   turning penalty.
//! - [`dijkstra`]: the search itself, returning costs or full distance tables.
//! - [`enumerate`]: every minimal path (or the nodes they cover) once the
//!   optimal cost is known.
//!
//! Every search owns its frontier and table and only borrows the graph, so
//! independent queries can be fanned out with rayon without coordination.
//!
//! ```
//! use std::collections::HashSet;
//! use aoc_solutions::utils::pathfinding::{Bounds, Coord, GridMoves, shortest_path};
//!
//! let walls = HashSet::from([Coord::new(1, 0), Coord::new(1, 1)]);
//! let moves = GridMoves::bounded(&walls, Bounds::square(3));
//! assert_eq!(shortest_path(&moves, Coord::new(0, 0), Coord::new(2, 0)), Some(6));
//! ```

pub mod dijkstra;
pub mod enumerate;
pub mod graph;
pub mod grid;
pub mod neighbors;

#[cfg(test)]
mod tests;

/// Cumulative path cost. Unsigned, so edge weights can never be negative.
pub type Cost = u64;

pub use dijkstra::{
    DistanceTable, Search, SearchState, Trace, Visit, distance_map, is_reachable, shortest_path,
    shortest_path_by, shortest_path_with_trace,
};
pub use enumerate::{PathEnumerator, RemainingCost, RequeryRemaining};
pub use graph::{Edge, Graph, ReversibleGraph, Reversed};
pub use grid::{Bounds, Coord, Direction, Oriented};
pub use neighbors::{GridMoves, TurnPenaltyMoves};
