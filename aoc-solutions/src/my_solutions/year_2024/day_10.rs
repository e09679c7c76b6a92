use std::collections::HashMap;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rayon::prelude::*;

use crate::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
use crate::utils::pathfinding::{Coord, Direction, Edge, Graph, distance_map};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 10, tags = ["grid", "bfs", "dp"])]
pub struct Solver;

/// Heights per cell; `.` cells are left out and can never be stepped on.
#[derive(Debug)]
pub struct TrailMap {
    heights: HashMap<Coord, u8>,
}

impl TrailMap {
    fn trailheads(&self) -> Vec<Coord> {
        let mut heads: Vec<Coord> = self
            .heights
            .iter()
            .filter(|&(_, &h)| h == 0)
            .map(|(&c, _)| c)
            .collect();
        heads.sort_unstable();
        heads
    }

    fn is_peak(&self, coord: &Coord) -> bool {
        self.heights.get(coord) == Some(&9)
    }
}

/// Hiking moves: one step up or down the grid, exactly one unit uphill.
impl Graph for TrailMap {
    type Node = Coord;

    fn edges(&self, node: Coord) -> impl Iterator<Item = Edge<Coord>> {
        let uphill = self.heights.get(&node).map(|h| h + 1);
        Direction::ALL
            .into_iter()
            .map(move |d| node.step(d))
            .filter(move |to| uphill.is_some() && self.heights.get(to).copied() == uphill)
            .map(|to| Edge::new(to, 1))
    }
}

/// Number of distinct hiking trails from a cell to any peak.
struct Ratings<'a> {
    map: &'a TrailMap,
}

impl DpProblem<Coord, u64> for Ratings<'_> {
    fn deps(&self, cell: &Coord) -> Vec<Coord> {
        self.map.edges(*cell).map(|e| e.to).collect()
    }

    fn compute(&self, cell: &Coord, deps: Vec<u64>) -> u64 {
        if self.map.is_peak(cell) {
            1
        } else {
            deps.into_iter().sum()
        }
    }
}

impl AocParser for Solver {
    type SharedData<'a> = TrailMap;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut heights = HashMap::new();
        for (row, line) in input.trim().lines().enumerate() {
            for (col, c) in line.chars().enumerate() {
                let coord = Coord::new(row as i32, col as i32);
                match c {
                    '0'..='9' => {
                        heights.insert(coord, c as u8 - b'0');
                    }
                    '.' => {}
                    other => {
                        return Err(ParseError::InvalidFormat(format!(
                            "(line {}) unexpected '{other}'",
                            row + 1
                        )));
                    }
                }
            }
        }
        Ok(TrailMap { heights })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let map: &TrailMap = shared;
        let score: usize = map
            .trailheads()
            .par_iter()
            .map(|&head| {
                distance_map(map, [head])
                    .iter()
                    .filter(|(c, _)| map.is_peak(c))
                    .count()
            })
            .sum();
        Ok(score.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let map: &TrailMap = shared;
        let cache = DpCache::with_problem(HashMapBackend::new(), Ratings { map });
        let rating: u64 = map.trailheads().iter().map(|head| cache.get(head)).sum();
        Ok(rating.to_string())
    }
}
