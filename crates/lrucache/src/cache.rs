//! LRU cache combining the recency list with the lookup index
//!
//! The list keeps entries ordered from least recently used (head) to most
//! recently used (tail); the index maps each key to its node so every
//! `get` and `set` reorders in O(1).

use std::borrow::Borrow;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::config::CacheConfig;
use crate::error::Result;
use crate::index::LookupIndex;
use crate::list::{NodeId, RecencyList};
use crate::stats::CacheStats;

/// Most slots reserved up front; larger caches grow as entries arrive
const PREALLOC_LIMIT: usize = 1024;

/// LRU cache with fixed capacity
#[derive(Debug)]
pub struct LruCache<K, V> {
    list: RecencyList<(K, V)>,
    index: LookupIndex<K>,
    stats: CacheStats,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new LRU cache holding at most `capacity` entries
    ///
    /// # Errors
    /// * `Error::ZeroCapacity` - `capacity` is 0
    pub fn new(capacity: usize) -> Result<Self> {
        Self::from_config(&CacheConfig::new(capacity))
    }

    /// Create a new LRU cache from a validated config
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        config.validate()?;
        debug!(capacity = config.capacity, "creating LRU cache");

        let reserved = config.capacity.min(PREALLOC_LIMIT);
        Ok(Self {
            list: RecencyList::with_capacity(reserved),
            index: LookupIndex::with_capacity(reserved),
            stats: CacheStats::new(),
            capacity: config.capacity,
        })
    }

    /// Get a value from the cache, marking it most recently used
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.touch(key)?;
        self.list.get(id).map(|(_, value)| value)
    }

    /// Mutable variant of [`get`](Self::get)
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.touch(key)?;
        self.list.get_mut(id).map(|(_, value)| value)
    }

    /// Insert a key-value pair into the cache.
    ///
    /// An existing key has its value overwritten in place. A new key arriving
    /// at capacity first evicts the least recently used entry.
    pub fn set(&mut self, key: K, value: V) {
        if let Some(id) = self.index.get(&key) {
            // Update existing
            if let Some(entry) = self.list.get_mut(id) {
                entry.1 = value;
            }
            self.list.move_to_tail(id);
            self.stats.record_update();
            return;
        }

        if self.list.len() >= self.capacity {
            self.evict();
        }

        let id = self.list.add_to_tail((key.clone(), value));
        self.index.set(key, id);
        self.stats.record_insert();
        trace!(len = self.list.len(), "inserted new entry");
    }

    /// Get a value without touching recency order or statistics
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.index.get(key)?;
        self.list.get(id).map(|(_, value)| value)
    }

    /// Check if `key` is cached, without touching recency order
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains(key)
    }

    /// Remove a key from the cache
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.index.delete(key)?;
        self.list.remove(id).map(|(_, value)| value)
    }

    /// Least recently used entry, without removing it
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.head().map(|(key, value)| (key, value))
    }

    /// Remove and return the least recently used entry
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        if let Some((key, _)) = self.list.head() {
            self.index.delete(key);
        }
        self.list.remove_from_head()
    }

    /// Iterate entries from least to most recently used
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&K, &V)> + ExactSizeIterator + '_ {
        self.list.iter().map(|(key, value)| (key, value))
    }

    /// Get the current number of entries
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Clear the cache (statistics are kept)
    pub fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
    }

    #[cfg(any(test, debug_assertions))]
    /// Assert that list and index describe the same entries
    pub fn debug_validate_invariants(&self) {
        self.list.debug_validate_invariants();
        assert_eq!(self.list.len(), self.index.len());
        assert!(self.list.len() <= self.capacity);
        for (key, _) in self.list.iter() {
            let id = self.index.get(key).expect("list key missing from index");
            let (node_key, _) = self.list.get(id).expect("index points at dead node");
            assert!(node_key == key, "index points at another key's node");
        }
    }

    /// Move `key` to the most recently used end, recording hit or miss
    fn touch<Q>(&mut self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.index.get(key) {
            Some(id) => {
                self.list.move_to_tail(id);
                self.stats.record_hit();
                trace!("cache hit");
                Some(id)
            }
            None => {
                self.stats.record_miss();
                trace!("cache miss");
                None
            }
        }
    }

    fn evict(&mut self) {
        if self.pop_lru().is_some() {
            self.stats.record_eviction();
            debug!(
                capacity = self.capacity,
                len = self.list.len(),
                "evicted least recently used entry"
            );
        }
    }
}
