//! Trait-based DP problem definition.

/// A memoizable recurrence: which sub-problems an index needs, and how to
/// combine their answers.
///
/// # Type Parameters
///
/// - `I`: Index (sub-problem key)
/// - `K`: Value stored per index
///
/// # Example
///
/// ```rust
/// use aoc_solutions::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
///
/// struct Staircase;
///
/// impl DpProblem<u32, u64> for Staircase {
///     fn deps(&self, n: &u32) -> Vec<u32> {
///         if *n <= 1 { vec![] } else { vec![n - 1, n - 2] }
///     }
///
///     fn compute(&self, _n: &u32, deps: Vec<u64>) -> u64 {
///         if deps.is_empty() { 1 } else { deps[0] + deps[1] }
///     }
/// }
///
/// let cache = DpCache::with_problem(HashMapBackend::new(), Staircase);
/// assert_eq!(cache.get(&10), 89);
/// ```
pub trait DpProblem<I, K> {
    /// Indices this index depends on. Empty for base cases.
    fn deps(&self, index: &I) -> Vec<I>;

    /// Value for `index`, given the values of `deps(index)` in the same order.
    fn compute(&self, index: &I, deps: Vec<K>) -> K;
}

/// A [`DpProblem`] that may be shared across rayon workers.
pub trait ParallelDpProblem<I, K>: DpProblem<I, K> + Send + Sync {}

impl<T, I, K> ParallelDpProblem<I, K> for T where T: DpProblem<I, K> + Send + Sync {}
