//! Single-threaded DP cache implementation.

use std::cell::RefCell;
use std::marker::PhantomData;

use super::backend::Backend;
use super::problem::DpProblem;

/// Memoizing evaluator for a [`DpProblem`] on one thread.
///
/// Dependencies are resolved recursively on first access and every index is
/// computed at most once.
///
/// # Warning: No Cycle Detection
///
/// A cyclic dependency graph recurses until the stack overflows.
/// **Dependencies must form a DAG.**
pub struct DpCache<I, K, B, P>
where
    B: Backend<I, K>,
    P: DpProblem<I, K>,
{
    backend: RefCell<B>,
    problem: P,
    _phantom: PhantomData<(I, K)>,
}

impl<I, K, B, P> DpCache<I, K, B, P>
where
    I: Clone,
    K: Clone,
    B: Backend<I, K>,
    P: DpProblem<I, K>,
{
    pub fn with_problem(backend: B, problem: P) -> Self {
        Self {
            backend: RefCell::new(backend),
            problem,
            _phantom: PhantomData,
        }
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// Value for `index`, computing it and any missing dependencies first.
    pub fn get(&self, index: &I) -> K {
        if let Some(value) = self.backend.borrow().get(index) {
            return value.clone();
        }

        // No borrow may be held while recursing.
        let dep_values: Vec<K> = self
            .problem
            .deps(index)
            .into_iter()
            .map(|dep| self.get(&dep))
            .collect();

        self.backend
            .borrow_mut()
            .get_or_insert(index.clone(), || self.problem.compute(index, dep_values))
            .clone()
    }

    pub fn into_backend(self) -> B {
        self.backend.into_inner()
    }
}
