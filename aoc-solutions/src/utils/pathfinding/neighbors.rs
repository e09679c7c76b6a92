//! Neighbor generators for walled grids.

use std::collections::HashSet;

use super::Cost;
use super::graph::{Edge, Graph, ReversibleGraph};
use super::grid::{Bounds, Coord, Direction, Oriented};

/// Four-way movement on a grid, one unit of cost per step.
///
/// Steps into a wall or (when bounds are given) off the grid are never
/// produced. Without bounds the walls alone must enclose the search.
#[derive(Debug, Clone, Copy)]
pub struct GridMoves<'a> {
    walls: &'a HashSet<Coord>,
    bounds: Option<Bounds>,
}

impl<'a> GridMoves<'a> {
    pub fn new(walls: &'a HashSet<Coord>) -> Self {
        Self {
            walls,
            bounds: None,
        }
    }

    pub fn bounded(walls: &'a HashSet<Coord>, bounds: Bounds) -> Self {
        Self {
            walls,
            bounds: Some(bounds),
        }
    }

    pub fn is_open(&self, coord: Coord) -> bool {
        self.bounds.is_none_or(|b| b.contains(coord)) && !self.walls.contains(&coord)
    }
}

impl Graph for GridMoves<'_> {
    type Node = Coord;

    fn edges(&self, node: Self::Node) -> impl Iterator<Item = Edge<Self::Node>> {
        Direction::ALL
            .into_iter()
            .map(move |d| node.step(d))
            .filter(move |&to| self.is_open(to))
            .map(|to| Edge::new(to, 1))
    }
}

impl ReversibleGraph for GridMoves<'_> {
    /// Open neighbors of `node`; empty when `node` itself is blocked.
    fn reverse_edges(&self, node: Self::Node) -> impl Iterator<Item = Edge<Self::Node>> {
        let reachable = self.is_open(node);
        self.edges(node).filter(move |_| reachable)
    }
}

/// Movement where the state carries a facing and turning costs extra.
///
/// Moving in direction `d` from a state facing `f` lands on the neighbor
/// facing `d` and costs `step_cost + turn_cost * quarter turns from f to d`.
/// Reversing on the spot is skipped unless [`allowing_reverse`] is used.
///
/// [`allowing_reverse`]: TurnPenaltyMoves::allowing_reverse
#[derive(Debug, Clone, Copy)]
pub struct TurnPenaltyMoves<'a> {
    grid: GridMoves<'a>,
    step_cost: Cost,
    turn_cost: Cost,
    allow_reverse: bool,
}

impl<'a> TurnPenaltyMoves<'a> {
    pub fn new(walls: &'a HashSet<Coord>, turn_cost: Cost) -> Self {
        Self {
            grid: GridMoves::new(walls),
            step_cost: 1,
            turn_cost,
            allow_reverse: false,
        }
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.grid.bounds = Some(bounds);
        self
    }

    pub fn with_step_cost(mut self, step_cost: Cost) -> Self {
        self.step_cost = step_cost;
        self
    }

    pub fn allowing_reverse(mut self) -> Self {
        self.allow_reverse = true;
        self
    }

    /// Cost of stepping in `direction` while facing `facing`, or `None` if
    /// that move is not permitted.
    fn move_cost(&self, facing: Direction, direction: Direction) -> Option<Cost> {
        if !self.allow_reverse && direction == facing.opposite() {
            return None;
        }
        Some(self.step_cost + self.turn_cost * Cost::from(facing.quarter_turns_to(direction)))
    }
}

impl Graph for TurnPenaltyMoves<'_> {
    type Node = Oriented;

    fn edges(&self, node: Self::Node) -> impl Iterator<Item = Edge<Self::Node>> {
        Direction::ALL.into_iter().filter_map(move |direction| {
            let weight = self.move_cost(node.facing, direction)?;
            let to = node.pos.step(direction);
            self.grid
                .is_open(to)
                .then(|| Edge::new(Oriented::new(to, direction), weight))
        })
    }
}

impl ReversibleGraph for TurnPenaltyMoves<'_> {
    /// States that step into `node`: the open cell behind it, under every
    /// facing from which a move in `node.facing` is permitted.
    fn reverse_edges(&self, node: Self::Node) -> impl Iterator<Item = Edge<Self::Node>> {
        let from = node.pos.step(node.facing.opposite());
        let reachable = self.grid.is_open(node.pos) && self.grid.is_open(from);
        Direction::ALL
            .into_iter()
            .filter(move |_| reachable)
            .filter_map(move |facing| {
                let weight = self.move_cost(facing, node.facing)?;
                Some(Edge::new(Oriented::new(from, facing), weight))
            })
    }
}
