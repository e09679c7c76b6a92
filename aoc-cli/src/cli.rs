//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Parallelization level for solver execution
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// Run everything in order on one thread
    Sequential,
    /// Years in parallel; days and parts of a year in order
    Year,
    /// Year/day combinations in parallel; parts in order (default)
    #[default]
    Day,
    /// Every year/day/part in parallel
    Part,
}

/// Advent of Code solver runner
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run Advent of Code solvers on local inputs", version)]
pub struct Args {
    /// Year to run (runs all years if omitted)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Day to run (runs all days if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Part to run (runs all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Only run solvers carrying all of these tags (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Directory holding `{year}_day{dd}.txt` inputs and `.answer` files
    #[arg(long, env = "AOC_INPUT_DIR", default_value = "~/.cache/aoc_solver/inputs")]
    pub input_dir: PathBuf,

    /// Number of threads for parallel execution
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level: sequential, year, day, or part
    #[arg(long, value_enum, default_value = "day")]
    pub parallelize_by: ParallelizeBy,

    /// Compare answers against the expected `.answer` files
    #[arg(long)]
    pub check: bool,

    /// Quiet mode - only output answers
    #[arg(short, long)]
    pub quiet: bool,
}
