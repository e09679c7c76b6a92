//! Benchmark comparing the two remaining-cost sources of the path enumerator.
//!
//! Run with: cargo run --example remaining_cost_benchmark --release
//!
//! Every maze is a square grid with randomly placed walls, searched with a
//! turn penalty. For each maze the tiles on any minimal path are collected
//! twice:
//! - `RequeryRemaining`: one memoized forward search per expanded state
//! - `DistanceTable`: a single reverse search from all goal facings
//!
//! Both must report the same tiles.

use aoc_solutions::utils::pathfinding::{
    Bounds, Coord, Direction, Oriented, PathEnumerator, Reversed, TurnPenaltyMoves, distance_map,
    shortest_path_by,
};
use rayon::prelude::*;
use std::collections::HashSet;
use std::time::Instant;

const MAZE_SIZE: i32 = 31;
const NUM_MAZES: usize = 40;
const WALL_PERCENT: u64 = 25;
const TURN_COST: u64 = 1000;

fn generate_walls(seed: u64, size: i32) -> HashSet<Coord> {
    let mut rng = seed;
    Bounds::square(size)
        .cells()
        .filter(|&c| c != Coord::new(0, 0) && c != Coord::new(size - 1, size - 1))
        .filter(|_| {
            rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1);
            (rng >> 33) % 100 < WALL_PERCENT
        })
        .collect()
}

struct Maze {
    walls: HashSet<Coord>,
    end: Coord,
}

impl Maze {
    fn moves(&self) -> TurnPenaltyMoves<'_> {
        TurnPenaltyMoves::new(&self.walls, TURN_COST)
            .with_bounds(Bounds::square(MAZE_SIZE))
            .allowing_reverse()
    }

    fn start(&self) -> Oriented {
        Oriented::new(Coord::new(0, 0), Direction::Right)
    }
}

fn tiles_requerying(maze: &Maze, optimal: u64) -> HashSet<Coord> {
    let end = maze.end;
    let moves = maze.moves();
    PathEnumerator::requerying(&moves, maze.start(), |o: &Oriented| o.pos == end, optimal)
        .covered_nodes()
        .into_iter()
        .map(|o| o.pos)
        .collect()
}

fn tiles_from_table(maze: &Maze, optimal: u64) -> HashSet<Coord> {
    let end = maze.end;
    let moves = maze.moves();
    let to_end = distance_map(&Reversed(&moves), Direction::ALL.map(|f| Oriented::new(end, f)));
    PathEnumerator::new(&moves, maze.start(), |o: &Oriented| o.pos == end, optimal, to_end)
        .covered_nodes()
        .into_iter()
        .map(|o| o.pos)
        .collect()
}

fn main() {
    println!("Remaining-cost Benchmark ({MAZE_SIZE}x{MAZE_SIZE}, {WALL_PERCENT}% walls)");
    println!("==============================================\n");

    let mazes: Vec<(Maze, u64)> = (0..NUM_MAZES as u64)
        .filter_map(|i| {
            let maze = Maze {
                walls: generate_walls(42 + i, MAZE_SIZE),
                end: Coord::new(MAZE_SIZE - 1, MAZE_SIZE - 1),
            };
            let end = maze.end;
            let (_, optimal) = shortest_path_by(&maze.moves(), maze.start(), |o| o.pos == end)?;
            Some((maze, optimal))
        })
        .collect();
    println!("{} of {} mazes are solvable", mazes.len(), NUM_MAZES);

    println!("\nRunning with requeried remaining costs...");
    let start = Instant::now();
    let requeried: Vec<HashSet<Coord>> = mazes
        .iter()
        .map(|(maze, optimal)| tiles_requerying(maze, *optimal))
        .collect();
    let requery_time = start.elapsed();
    println!("Requery:                {:?}", requery_time);

    println!("Running with reverse distance tables...");
    let start = Instant::now();
    let tabled: Vec<HashSet<Coord>> = mazes
        .iter()
        .map(|(maze, optimal)| tiles_from_table(maze, *optimal))
        .collect();
    let table_time = start.elapsed();
    println!("Reverse table:          {:?}", table_time);

    println!("Running reverse tables + par_iter...");
    let start = Instant::now();
    let tabled_par: Vec<HashSet<Coord>> = mazes
        .par_iter()
        .map(|(maze, optimal)| tiles_from_table(maze, *optimal))
        .collect();
    let table_par_time = start.elapsed();
    println!("Reverse table + par:    {:?}", table_par_time);

    assert_eq!(requeried, tabled, "remaining-cost sources disagree");
    assert_eq!(tabled, tabled_par, "parallel run disagrees");

    let mean_tiles =
        tabled.iter().map(HashSet::len).sum::<usize>() as f64 / tabled.len().max(1) as f64;
    println!("\nAll results match. Mean tiles on a minimal path: {mean_tiles:.1}");
    if !table_time.is_zero() {
        println!(
            "Table speedup over requery: {:.2}x",
            requery_time.as_secs_f64() / table_time.as_secs_f64()
        );
    }
}
