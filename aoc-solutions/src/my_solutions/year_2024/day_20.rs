use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use rayon::prelude::*;

use crate::utils::maze::Maze;
use crate::utils::pathfinding::{Coord, Cost, DistanceTable, distance_map};

const MIN_SAVING: Cost = 100;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 20, tags = ["grid", "dijkstra"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    /// Picoseconds from the start to every track tile.
    track: DistanceTable<Coord>,
}

/// Cheats of at most `max_cheat` picoseconds that save at least
/// `min_saving`.
///
/// A cheat goes from one track tile straight through walls to another, so
/// its length is the Manhattan distance between the two.
pub fn count_cheats(track: &DistanceTable<Coord>, max_cheat: i32, min_saving: Cost) -> usize {
    let offsets: Vec<(Coord, Cost)> = (-max_cheat..=max_cheat)
        .flat_map(|dr| {
            let reach = max_cheat - dr.abs();
            (-reach..=reach).map(move |dc| Coord::new(dr, dc))
        })
        .map(|offset| (offset, Cost::from(offset.manhattan(Coord::default()))))
        .filter(|&(_, length)| length >= 2)
        .collect();

    let tiles: Vec<(Coord, Cost)> = track.iter().map(|(&c, v)| (c, v.cost)).collect();
    tiles
        .par_iter()
        .map(|&(from, from_cost)| {
            offsets
                .iter()
                .filter(|&&(offset, length)| {
                    let to = Coord::new(from.row + offset.row, from.col + offset.col);
                    track
                        .cost(&to)
                        .is_some_and(|to_cost| to_cost >= from_cost + length + min_saving)
                })
                .count()
        })
        .sum()
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let maze = Maze::parse(input)?;
        let track = distance_map(&maze.moves(), [maze.start]);
        if !track.contains(&maze.end) {
            return Err(ParseError::InvalidFormat(
                "the track does not connect start and end".into(),
            ));
        }
        Ok(SharedData { track })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_cheats(&shared.track, 2, MIN_SAVING).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(count_cheats(&shared.track, 20, MIN_SAVING).to_string())
    }
}
