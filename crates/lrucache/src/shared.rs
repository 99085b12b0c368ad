//! Shared LRU cache handle for use across threads
//!
//! Wraps one [`LruCache`] behind a single `RwLock`. List and index are only
//! consistent together, so the lock covers the whole cache for the duration
//! of every call.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::cache::LruCache;
use crate::config::CacheConfig;
use crate::error::Result;
use crate::stats::StatsSnapshot;

/// Cloneable, thread-safe handle to an LRU cache
#[derive(Debug)]
pub struct SharedLruCache<K, V> {
    inner: Arc<RwLock<LruCache<K, V>>>,
}

impl<K, V> Clone for SharedLruCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SharedLruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a shared cache holding at most `capacity` entries
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self::from_cache(LruCache::new(capacity)?))
    }

    /// Create a shared cache from a validated config
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Ok(Self::from_cache(LruCache::from_config(config)?))
    }

    /// Share an existing cache
    pub fn from_cache(cache: LruCache<K, V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(cache)),
        }
    }

    /// Get a copy of a value, marking it most recently used
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        // Write lock: a hit reorders the recency list
        let mut cache = self.inner.write();
        cache.get(key).cloned()
    }

    /// Insert a key-value pair
    pub fn set(&self, key: K, value: V) {
        let mut cache = self.inner.write();
        cache.set(key, value);
    }

    /// Get a copy of a value without touching recency order
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.read().peek(key).cloned()
    }

    /// Check if `key` is cached
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.read().contains(key)
    }

    /// Remove a key from the cache
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.write().remove(key)
    }

    /// Clear the cache
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Get the current number of entries
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    /// Copy the cache statistics
    pub fn stats(&self) -> StatsSnapshot {
        self.inner.read().stats().snapshot()
    }
}
