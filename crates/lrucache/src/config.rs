//! Cache configuration

use crate::error::{Error, Result};

/// Capacity used when none is given
pub const DEFAULT_CAPACITY: usize = 10;

/// Construction parameters for a cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries the cache holds
    pub capacity: usize,
}

impl CacheConfig {
    /// Create a config for `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Reject configurations no cache can be built from
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}
