//! Parallel DP cache implementation with pluggable backends.

use std::hash::Hash;
use std::marker::PhantomData;

use rayon::prelude::*;

use super::backend::ParallelBackend;
use super::problem::ParallelDpProblem;

/// Memoizing evaluator whose dependencies are resolved in parallel on the
/// current rayon pool.
///
/// Workers may race to evaluate the same index; the backend keeps the first
/// value written and `compute` runs at most once per index.
///
/// # Warning: No Cycle Detection
///
/// A cyclic dependency graph deadlocks or overflows the stack.
/// **Dependencies must form a DAG.**
///
/// # Example
///
/// ```rust
/// use aoc_solutions::utils::dp_cache::{DashMapBackend, DpProblem, ParallelDpCache};
///
/// struct Collatz;
///
/// impl DpProblem<u64, u64> for Collatz {
///     fn deps(&self, n: &u64) -> Vec<u64> {
///         if *n <= 1 { vec![] }
///         else if n % 2 == 0 { vec![n / 2] }
///         else { vec![3 * n + 1] }
///     }
///     fn compute(&self, _n: &u64, deps: Vec<u64>) -> u64 {
///         if deps.is_empty() { 0 } else { 1 + deps[0] }
///     }
/// }
///
/// let cache = ParallelDpCache::with_problem(DashMapBackend::new(), Collatz);
/// assert_eq!(cache.get(&27), 111);
/// ```
pub struct ParallelDpCache<I, K, B, P>
where
    I: Hash + Eq + Clone + Send + Sync,
    K: Clone + Send + Sync,
    B: ParallelBackend<I, K>,
    P: ParallelDpProblem<I, K>,
{
    backend: B,
    problem: P,
    _phantom: PhantomData<fn(I) -> K>,
}

impl<I, K, B, P> ParallelDpCache<I, K, B, P>
where
    I: Hash + Eq + Clone + Send + Sync,
    K: Clone + Send + Sync,
    B: ParallelBackend<I, K>,
    P: ParallelDpProblem<I, K>,
{
    pub fn with_problem(backend: B, problem: P) -> Self {
        Self {
            backend,
            problem,
            _phantom: PhantomData,
        }
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Value for `index`, computing it and any missing dependencies first.
    pub fn get(&self, index: &I) -> K {
        if let Some(value) = self.backend.get(index) {
            return value;
        }

        // Resolved before touching the backend so no shard lock is held
        // across the recursion.
        let dep_values: Vec<K> = self
            .problem
            .deps(index)
            .into_par_iter()
            .map(|dep| self.get(&dep))
            .collect();

        self.backend
            .get_or_insert(index.clone(), || self.problem.compute(index, dep_values))
    }
}
