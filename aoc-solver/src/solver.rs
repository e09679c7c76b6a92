//! Core solver traits

use crate::error::{ParseError, SolveError};

/// Parses puzzle input into the data every part works on.
///
/// `SharedData` may borrow from the input, which lets a solver keep
/// `&'a str` slices instead of copying them.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct Walls;
///
/// impl AocParser for Walls {
///     type SharedData<'a> = Vec<&'a str>;
///
///     fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
///         let rows: Vec<&str> = input.lines().collect();
///         if rows.is_empty() {
///             return Err(ParseError::MissingData("no rows".into()));
///         }
///         Ok(rows)
///     }
/// }
///
/// assert_eq!(Walls::parse("#.#\n...").unwrap(), ["#.#", "..."]);
/// ```
pub trait AocParser {
    /// Parsed input plus anything the parts want to carry between them.
    type SharedData<'a>: 'a;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Solves part `N` of a puzzle.
///
/// Parts receive the shared data mutably, so an earlier part can leave
/// intermediate results (a best cost, a distance table) for a later one.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
///
/// struct Steps;
///
/// impl AocParser for Steps {
///     type SharedData<'a> = Vec<u64>;
///
///     fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
///         input
///             .split_whitespace()
///             .map(|n| n.parse().map_err(|_| ParseError::InvalidFormat(n.to_string())))
///             .collect()
///     }
/// }
///
/// impl PartSolver<1> for Steps {
///     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
///         Ok(shared.iter().sum::<u64>().to_string())
///     }
/// }
///
/// let mut shared = Steps::parse("1 1000 1").unwrap();
/// assert_eq!(<Steps as PartSolver<1>>::solve(&mut shared).unwrap(), "1002");
/// ```
pub trait PartSolver<const N: u8>: AocParser {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// A puzzle with a fixed number of parts.
///
/// Usually derived with `#[derive(AocSolver)]`, which dispatches part `k`
/// to `PartSolver<k>`. Hand-written impls look like this:
///
/// ```
/// use aoc_solver::{AocParser, ParseError, SolveError, Solver, SolverExt};
///
/// struct MinMax;
///
/// impl AocParser for MinMax {
///     type SharedData<'a> = Vec<i64>;
///
///     fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
///             .collect()
///     }
/// }
///
/// impl Solver for MinMax {
///     const PARTS: u8 = 2;
///
///     fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
///         let answer = match part {
///             1 => shared.iter().min(),
///             2 => shared.iter().max(),
///             _ => return Err(SolveError::PartNotImplemented(part)),
///         };
///         answer
///             .map(|n| n.to_string())
///             .ok_or_else(|| SolveError::SolveFailed("empty input".into()))
///     }
/// }
///
/// let mut shared = MinMax::parse("4\n-2\n9").unwrap();
/// assert_eq!(MinMax::solve_part_checked_range(&mut shared, 2).unwrap(), "9");
/// assert!(MinMax::solve_part_checked_range(&mut shared, 3).is_err());
/// ```
pub trait Solver: AocParser {
    /// Number of parts, numbered from 1
    const PARTS: u8;

    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

pub trait SolverExt: Solver {
    /// Like [`Solver::solve_part`], but part 0 and parts above `PARTS` give
    /// [`SolveError::PartOutOfRange`] without reaching the solver.
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
