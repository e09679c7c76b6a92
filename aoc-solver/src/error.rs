//! Error types for the solver library

use thiserror::Error;

/// Error type for parsing puzzle input
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// Input does not match the expected layout
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    /// Something the puzzle needs (a start tile, an end tile, ...) is absent
    #[error("Missing data: {0}")]
    MissingData(String),
    #[error("Parse error: {0}")]
    Other(String),
}

/// Error type for solving a specific part
#[derive(Debug, Error)]
pub enum SolveError {
    /// The solver declares the part but does not dispatch it
    #[error("Part {0} is not implemented")]
    PartNotImplemented(u8),
    /// Part 0, or a part above the solver's declared count
    #[error("Part {0} is out of range")]
    PartOutOfRange(u8),
    /// The input parsed but has no answer (for example, the goal is unreachable)
    #[error("Solve failed: {0}")]
    SolveFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Error type for registry lookups and the full parse-then-solve pipeline
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("Solver not found for year {0} day {1}")]
    NotFound(u16, u8),
    /// The key lies outside the years and days the registry can hold
    #[error("Year {0} day {1} is outside the supported range")]
    InvalidYearDay(u16, u8),
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
    #[error("Solve error: {0}")]
    SolveError(#[from] SolveError),
}

/// Error type for registration failures
#[derive(Debug, Clone, Error)]
pub enum RegistrationError {
    /// A solver is already registered for this year and day
    #[error("Duplicate solver registration for year {0} day {1}")]
    DuplicateSolver(u16, u8),
    #[error("Cannot register year {0} day {1}: outside the supported range")]
    InvalidYearDay(u16, u8),
}
