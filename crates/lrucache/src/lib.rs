//! # lrucache
//!
//! Fixed-capacity key-value cache with least-recently-used eviction.
//!
//! ## Architecture
//! - **RecencyList**: Arena-backed doubly-linked list, LRU at the head, MRU at the tail (O(1) moves)
//! - **LookupIndex**: AHash map from key to list node handle (O(1) lookups)
//! - **LruCache**: Combines both; every `get`/`set` moves the entry to the tail
//! - **SharedLruCache**: One `RwLock` around a whole cache for multi-threaded callers
//!
//! ```
//! use lrucache::LruCache;
//!
//! let mut cache = LruCache::new(2).unwrap();
//! cache.set("a", 1);
//! cache.set("b", 2);
//! assert_eq!(cache.get("a"), Some(&1));
//!
//! cache.set("c", 3); // evicts "b"
//! assert_eq!(cache.get("b"), None);
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
mod error;
mod index;
mod list;
mod shared;
mod stats;

#[cfg(test)]
mod property_tests;

pub use cache::LruCache;
pub use config::{CacheConfig, DEFAULT_CAPACITY};
pub use error::{Error, Result};
pub use index::LookupIndex;
pub use list::{Iter, NodeId, RecencyList};
pub use shared::SharedLruCache;
pub use stats::{CacheStats, StatsSnapshot};
