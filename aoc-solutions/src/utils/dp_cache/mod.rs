//! Memoization caches for recurrences whose sub-problems form a DAG.
//!
//! # Cache Types
//!
//! - [`DpCache`]: Single-threaded cache with `RefCell` for interior mutability
//! - [`ParallelDpCache`]: Thread-safe cache with parallel dependency resolution using Rayon
//!
//! # Backend Types
//!
//! - [`HashMapBackend`]: Sequential, any hashable index
//! - [`DashMapBackend`]: Concurrent, sharded locking
//!
//! # Warning: Cycle Behavior
//!
//! **These caches do NOT support cycle detection.** If the dependency graph contains cycles:
//! - `DpCache`: Stack overflow
//! - `ParallelDpCache`: Deadlock or stack overflow
//!
//! # Example
//!
//! ```rust
//! use aoc_solutions::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
//!
//! struct GridPaths;
//!
//! impl DpProblem<(usize, usize), u64> for GridPaths {
//!     fn deps(&self, pos: &(usize, usize)) -> Vec<(usize, usize)> {
//!         let (r, c) = *pos;
//!         if r == 0 && c == 0 { vec![] }
//!         else if r == 0 { vec![(0, c - 1)] }
//!         else if c == 0 { vec![(r - 1, 0)] }
//!         else { vec![(r - 1, c), (r, c - 1)] }
//!     }
//!     fn compute(&self, _pos: &(usize, usize), deps: Vec<u64>) -> u64 {
//!         if deps.is_empty() { 1 } else { deps.iter().sum() }
//!     }
//! }
//!
//! let cache = DpCache::with_problem(HashMapBackend::new(), GridPaths);
//! assert_eq!(cache.get(&(4, 4)), 70);
//! ```

mod backend;
mod cache;
mod parallel;
mod problem;

pub use backend::{Backend, DashMapBackend, HashMapBackend, ParallelBackend};
pub use cache::DpCache;
pub use parallel::ParallelDpCache;
pub use problem::{DpProblem, ParallelDpProblem};
