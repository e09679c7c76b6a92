//! Storage backends for the DP caches.

use std::collections::HashMap;
use std::hash::Hash;

use dashmap::DashMap;

/// Storage for [`DpCache`](super::DpCache).
pub trait Backend<I, K> {
    fn get(&self, index: &I) -> Option<&K>;

    /// Returns the stored value, calling `compute` only if there is none.
    fn get_or_insert(&mut self, index: I, compute: impl FnOnce() -> K) -> &K;
}

/// Storage for [`ParallelDpCache`](super::ParallelDpCache).
///
/// Values are returned by clone since no reference can outlive the shard
/// lock that guards it.
pub trait ParallelBackend<I, K>: Send + Sync {
    fn get(&self, index: &I) -> Option<K>;

    /// Returns the stored value, calling `compute` only if there is none.
    ///
    /// When two workers race on the same index, the first insert wins and
    /// the loser gets the winner's value back.
    fn get_or_insert(&self, index: I, compute: impl FnOnce() -> K) -> K;
}

/// A HashMap-based backend for arbitrary hashable indices.
#[derive(Debug)]
pub struct HashMapBackend<I, K> {
    data: HashMap<I, K>,
}

impl<I, K> HashMapBackend<I, K> {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<I, K> Default for HashMapBackend<I, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Hash + Eq, K> Backend<I, K> for HashMapBackend<I, K> {
    fn get(&self, index: &I) -> Option<&K> {
        self.data.get(index)
    }

    fn get_or_insert(&mut self, index: I, compute: impl FnOnce() -> K) -> &K {
        self.data.entry(index).or_insert_with(compute)
    }
}

/// Concurrent backend on top of DashMap's sharded locking.
///
/// `compute` runs while the shard of its index is write-locked, so it must
/// not touch the cache itself. The caches resolve dependencies before
/// calling in.
#[derive(Debug)]
pub struct DashMapBackend<I: Hash + Eq, K> {
    data: DashMap<I, K>,
}

impl<I: Hash + Eq, K> DashMapBackend<I, K> {
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<I: Hash + Eq, K> Default for DashMapBackend<I, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, K> ParallelBackend<I, K> for DashMapBackend<I, K>
where
    I: Hash + Eq + Send + Sync,
    K: Clone + Send + Sync,
{
    fn get(&self, index: &I) -> Option<K> {
        self.data.get(index).map(|entry| entry.value().clone())
    }

    fn get_or_insert(&self, index: I, compute: impl FnOnce() -> K) -> K {
        self.data.entry(index).or_insert_with(compute).value().clone()
    }
}
