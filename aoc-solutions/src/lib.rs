//! Advent of Code puzzle solutions with automatic registration
//!
//! Solutions are organized by year and register themselves with the solver
//! framework through the `AutoRegisterSolver` derive macro. The search
//! engine and memo caches they share live in [`utils`].

pub mod utils;

#[cfg(feature = "my-solutions")]
pub mod my_solutions;
