use std::collections::HashSet;

use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::pathfinding::{Bounds, Coord, Cost, GridMoves, is_reachable, shortest_path};

const MEMORY_SIZE: i32 = 71;
const FIRST_KILOBYTE: usize = 1024;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 18, tags = ["grid", "dijkstra", "binary-search"])]
pub struct Solver;

/// Falling byte positions in the order they land, as `(row = y, col = x)`.
#[derive(Debug)]
pub struct SharedData {
    bytes: Vec<Coord>,
}

fn corners(size: i32) -> (Coord, Coord) {
    (Coord::new(0, 0), Coord::new(size - 1, size - 1))
}

/// Fewest steps across a `size`x`size` memory space once `fallen` bytes
/// have landed.
pub fn min_steps(bytes: &[Coord], size: i32, fallen: usize) -> Option<Cost> {
    let walls: HashSet<Coord> = bytes.iter().take(fallen).copied().collect();
    let (start, exit) = corners(size);
    shortest_path(&GridMoves::bounded(&walls, Bounds::square(size)), start, exit)
}

/// The first byte after which the exit can no longer be reached.
pub fn first_blocking_byte(bytes: &[Coord], size: i32) -> Option<Coord> {
    let (start, exit) = corners(size);
    let open_after = |fallen: usize| {
        let walls: HashSet<Coord> = bytes[..fallen].iter().copied().collect();
        is_reachable(&GridMoves::bounded(&walls, Bounds::square(size)), start, exit)
    };

    let counts: Vec<usize> = (0..=bytes.len()).collect();
    let first_closed = counts.partition_point(|&fallen| open_after(fallen));
    // Zero would mean the start or exit is closed off before anything falls.
    first_closed
        .checked_sub(1)
        .and_then(|index| bytes.get(index))
        .copied()
}

fn parse_byte(line: &str) -> anyhow::Result<Coord> {
    let (x, y) = line
        .split_once(',')
        .ok_or_else(|| anyhow!("expected 'x,y', got '{line}'"))?;
    let x: i32 = x.trim().parse().context("bad x coordinate")?;
    let y: i32 = y.trim().parse().context("bad y coordinate")?;
    Ok(Coord::new(y, x))
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .lines()
            .enumerate()
            .map(|(line_idx, line)| {
                parse_byte(line).map_err(|e| anyhow!("(line {}) {:#}", line_idx + 1, e))
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map(|bytes| SharedData { bytes })
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        min_steps(&shared.bytes, MEMORY_SIZE, FIRST_KILOBYTE)
            .map(|steps| steps.to_string())
            .ok_or_else(|| {
                SolveError::SolveFailed("exit is cut off after the first kilobyte".into())
            })
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        first_blocking_byte(&shared.bytes, MEMORY_SIZE)
            .map(|byte| format!("{},{}", byte.col, byte.row))
            .ok_or_else(|| SolveError::SolveFailed("no byte cuts the exit off".into()))
    }
}
