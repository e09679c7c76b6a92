use std::collections::HashSet;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::maze::Maze;
use crate::utils::pathfinding::{
    Coord, Cost, Direction, Oriented, PathEnumerator, Reversed, TurnPenaltyMoves, distance_map,
    shortest_path_by,
};

const TURN_COST: Cost = 1000;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 16, tags = ["grid", "dijkstra"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    maze: Maze,
    best_cost: Option<Cost>,
}

impl SharedData {
    /// Turning on the spot twice is a legal (if costly) way to reverse.
    fn moves(&self) -> TurnPenaltyMoves<'_> {
        TurnPenaltyMoves::new(&self.maze.walls, TURN_COST)
            .with_bounds(self.maze.bounds)
            .allowing_reverse()
    }

    fn start(&self) -> Oriented {
        Oriented::new(self.maze.start, Direction::Right)
    }

    fn best_cost(&mut self) -> Result<Cost, SolveError> {
        if let Some(cost) = self.best_cost {
            return Ok(cost);
        }
        let end = self.maze.end;
        let (_, cost) = shortest_path_by(&self.moves(), self.start(), |o| o.pos == end)
            .ok_or_else(|| SolveError::SolveFailed("the end tile cannot be reached".into()))?;
        self.best_cost = Some(cost);
        Ok(cost)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(SharedData {
            maze: Maze::parse(input)?,
            best_cost: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.best_cost()?.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let optimal = shared.best_cost()?;
        let end = shared.maze.end;
        let moves = shared.moves();
        let to_end = distance_map(&Reversed(&moves), Direction::ALL.map(|f| Oriented::new(end, f)));

        let is_end = |o: &Oriented| o.pos == end;
        let tiles: HashSet<Coord> =
            PathEnumerator::new(&moves, shared.start(), is_end, optimal, to_end)
                .covered_nodes()
                .into_iter()
                .map(|o| o.pos)
                .collect();
        Ok(tiles.len().to_string())
    }
}
