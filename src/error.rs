//! Error types for lrukit.
//!
//! ## Key Components
//!
//! - [`CacheError`]: returned by fallible cache operations. `NotFound` is the
//!   outcome of reading a key the cache does not hold.
//! - [`ConfigError`]: returned when construction parameters are invalid
//!   (zero capacity).
//! - [`InvariantError`]: returned by
//!   [`LruCache::check_invariants`](crate::policy::lru::LruCache::check_invariants)
//!   when the key index and recency list disagree.
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::error::{CacheError, ConfigError};
//! use lrukit::policy::lru::LruCache;
//!
//! let bad: Result<LruCache<u32, u32>, ConfigError> = LruCache::try_new(0);
//! assert!(bad.is_err());
//!
//! let mut cache = LruCache::new(2);
//! cache.put("a", 1);
//! assert_eq!(cache.get("b"), Err(CacheError::NotFound));
//! ```

/// Error returned by cache operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    /// The requested key is not in the cache.
    #[error("key not found in cache")]
    NotFound,

    /// The cache could not be built from the supplied configuration.
    #[error("invalid cache configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}

/// Error returned when cache configuration parameters are invalid.
///
/// ```
/// use lrukit::policy::lru::LruCache;
///
/// let err = LruCache::<u64, u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ConfigError(String);

impl ConfigError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Error returned when the key index and recency list are out of step.
///
/// Only reachable through a bug inside the crate; the public API never hands
/// out slot handles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

pub type Result<T, E = CacheError> = std::result::Result<T, E>;
