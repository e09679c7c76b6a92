//! Parsed solver instances behind a type-erased interface

use crate::error::{ParseError, SolveError};
use crate::solver::{Solver, SolverExt};
use chrono::{DateTime, TimeDelta, Utc};

/// An answer together with when it was computed
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub answer: String,
    pub solve_start: DateTime<Utc>,
    pub solve_end: DateTime<Utc>,
}

impl SolveResult {
    pub fn duration(&self) -> TimeDelta {
        self.solve_end - self.solve_start
    }
}

/// One puzzle input, parsed once and ready to solve any part.
///
/// The shared data may borrow from the input, so the instance lives no
/// longer than `'a`.
pub struct SolverInstance<'a, S: Solver> {
    year: u16,
    day: u8,
    shared: S::SharedData<'a>,
    parse_start: DateTime<Utc>,
    parse_end: DateTime<Utc>,
}

impl<'a, S: Solver> SolverInstance<'a, S> {
    /// Parses `input`, recording how long parsing took.
    pub fn new(year: u16, day: u8, input: &'a str) -> Result<Self, ParseError> {
        let parse_start = Utc::now();
        let shared = S::parse(input)?;
        let parse_end = Utc::now();

        Ok(Self {
            year,
            day,
            shared,
            parse_start,
            parse_end,
        })
    }
}

/// Object-safe view of a [`SolverInstance`], so the registry can hand out
/// any day as `Box<dyn DynSolver>`.
///
/// ```no_run
/// use aoc_solver::DynSolver;
///
/// fn run_both(mut solver: Box<dyn DynSolver + '_>) -> Result<(), aoc_solver::SolveError> {
///     for part in 1..=solver.parts() {
///         let result = solver.solve(part)?;
///         println!("part {part}: {} in {}", result.answer, result.duration());
///     }
///     println!("parse took {}", solver.parse_duration());
///     Ok(())
/// }
/// ```
pub trait DynSolver {
    /// Solves `part`, timing the call. Parts out of range are rejected
    /// with [`SolveError::PartOutOfRange`].
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError>;

    fn parse_start(&self) -> DateTime<Utc>;

    fn parse_end(&self) -> DateTime<Utc>;

    fn year(&self) -> u16;

    fn day(&self) -> u8;

    fn parts(&self) -> u8;

    fn parse_duration(&self) -> TimeDelta {
        self.parse_end() - self.parse_start()
    }
}

impl<S: SolverExt> DynSolver for SolverInstance<'_, S> {
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError> {
        let solve_start = Utc::now();
        let answer = S::solve_part_checked_range(&mut self.shared, part)?;
        let solve_end = Utc::now();

        Ok(SolveResult {
            answer,
            solve_start,
            solve_end,
        })
    }

    fn parse_start(&self) -> DateTime<Utc> {
        self.parse_start
    }

    fn parse_end(&self) -> DateTime<Utc> {
        self.parse_end
    }

    fn year(&self) -> u16 {
        self.year
    }

    fn day(&self) -> u8 {
        self.day
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}
