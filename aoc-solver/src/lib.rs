//! Advent of Code puzzle harness
//!
//! A puzzle is a type that parses its input once ([`AocParser`]) and then
//! solves numbered parts against the parsed data ([`PartSolver`],
//! [`Solver`]). Solvers are collected into a [`SolverRegistry`], either by
//! hand or automatically through `#[derive(AutoRegisterSolver)]`, and the
//! registry hands out parsed instances as [`DynSolver`] trait objects.
//!
//! # Example
//!
//! ```
//! use aoc_solver::{
//!     AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder,
//! };
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! struct Depths;
//!
//! impl AocParser for Depths {
//!     type SharedData<'a> = Vec<u32>;
//!
//!     fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
//!         input
//!             .lines()
//!             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Depths {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.windows(2).filter(|w| w[1] > w[0]).count().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Depths {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.windows(4).filter(|w| w[3] > w[0]).count().to_string())
//!     }
//! }
//!
//! let registry = SolverRegistryBuilder::new()
//!     .register_solver::<Depths>(2021, 1)
//!     .unwrap()
//!     .build();
//!
//! let input = "199\n200\n208\n210\n200\n207\n240\n269\n260\n263";
//! let mut solver = registry.create_solver(2021, 1, input).unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "7");
//! assert_eq!(solver.solve(2).unwrap().answer, "5");
//! ```

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    FactoryInfo, RegisterableSolver, SolverFactory, SolverPlugin, SolverRegistry,
    SolverRegistryBuilder,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Used by the code `AutoRegisterSolver` expands to.
pub use inventory;

pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
