//! Lookup index from key to recency list node

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use ahash::RandomState;

use crate::list::NodeId;

/// Key to [`NodeId`] map backing O(1) lookups.
///
/// Holds handles only; the nodes themselves are owned by the recency list.
#[derive(Debug)]
pub struct LookupIndex<K> {
    map: HashMap<K, NodeId, RandomState>,
}

impl<K> LookupIndex<K>
where
    K: Hash + Eq,
{
    /// Create an empty index
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty index sized for `capacity` keys
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    /// Check if `key` is indexed
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Node handle registered for `key`
    pub fn get<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key).copied()
    }

    /// Register `key -> id`, returning the handle it replaced
    pub fn set(&mut self, key: K, id: NodeId) -> Option<NodeId> {
        self.map.insert(key, id)
    }

    /// Drop `key` from the index, returning its handle
    pub fn delete<Q>(&mut self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove(key)
    }

    /// Number of indexed keys
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Drop every key
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl<K> Default for LookupIndex<K>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}
