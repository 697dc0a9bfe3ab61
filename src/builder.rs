//! Cache configuration and builder.
//!
//! [`LruConfig`] is the plain-data form of every construction parameter;
//! [`LruCacheBuilder`] is the fluent front end over it. Both validate before
//! anything is allocated.
//!
//! ## Example
//!
//! ```rust
//! use lrukit::builder::LruCacheBuilder;
//!
//! let mut cache = LruCacheBuilder::new(100)
//!     .prealloc(false)
//!     .build::<u64, String>();
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Ok(&"hello".to_string()));
//! ```
//!
//! ## LruConfig
//!
//! | Field      | Type    | Default | Description                              |
//! |------------|---------|---------|------------------------------------------|
//! | `capacity` | `usize` | 1000    | Maximum entries; must be > 0             |
//! | `prealloc` | `bool`  | true    | Reserve index/ledger storage up front    |

use std::hash::Hash;

use crate::error::ConfigError;
#[cfg(feature = "concurrency")]
use crate::policy::concurrent::ConcurrentLruCache;
use crate::policy::lru::LruCache;

/// Construction parameters for an LRU cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LruConfig {
    /// Maximum number of entries held after any `put` returns.
    pub capacity: usize,
    /// Reserve storage for `capacity` entries at construction (bounded by
    /// [`MAX_PREALLOC_ENTRIES`](crate::policy::lru::MAX_PREALLOC_ENTRIES)).
    pub prealloc: bool,
}

impl LruConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::new("cache capacity must be greater than zero"));
        }
        Ok(())
    }
}

impl Default for LruConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            prealloc: true,
        }
    }
}

/// Fluent builder for [`LruCache`] and, with the `concurrency` feature,
/// [`ConcurrentLruCache`].
#[derive(Debug, Clone)]
pub struct LruCacheBuilder {
    config: LruConfig,
}

impl LruCacheBuilder {
    pub fn new(capacity: usize) -> Self {
        Self {
            config: LruConfig {
                capacity,
                ..LruConfig::default()
            },
        }
    }

    /// Starts from an existing configuration.
    pub fn from_config(config: LruConfig) -> Self {
        Self { config }
    }

    /// Whether to reserve storage for the full capacity up front.
    pub fn prealloc(mut self, prealloc: bool) -> Self {
        self.config.prealloc = prealloc;
        self
    }

    pub fn config(&self) -> &LruConfig {
        &self.config
    }

    /// Builds the cache.
    ///
    /// # Panics
    ///
    /// Panics on an invalid configuration. For a non-panicking alternative,
    /// use [`try_build`](Self::try_build).
    pub fn build<K, V>(self) -> LruCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        match self.try_build() {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Builds the cache, returning an error on an invalid configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration fails validation.
    pub fn try_build<K, V>(self) -> Result<LruCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        LruCache::with_config(self.config)
    }

    /// Builds a lock-wrapped cache that can be shared across threads.
    ///
    /// # Panics
    ///
    /// Panics on an invalid configuration. For a non-panicking alternative,
    /// use [`try_build_concurrent`](Self::try_build_concurrent).
    #[cfg(feature = "concurrency")]
    pub fn build_concurrent<K, V>(self) -> ConcurrentLruCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        match self.try_build_concurrent() {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration fails validation.
    #[cfg(feature = "concurrency")]
    pub fn try_build_concurrent<K, V>(self) -> Result<ConcurrentLruCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        self.try_build().map(ConcurrentLruCache::from_cache)
    }
}

impl Default for LruCacheBuilder {
    fn default() -> Self {
        Self::from_config(LruConfig::default())
    }
}
