//! Error types for lrucache

use thiserror::Error;

/// Result type alias for lrucache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a cache.
///
/// `get` and `set` never fail; only construction is fallible.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Capacity of zero entries
    #[error("Cache capacity must be greater than 0")]
    ZeroCapacity,
}
