//! lrukit: a fixed-capacity LRU cache built from a slot arena, an intrusive
//! recency list and a hash index over slot handles.
//!
//! ```
//! use lrukit::prelude::*;
//!
//! let mut cache = LruCache::new(2);
//! cache.put(1, "one");
//! cache.put(2, "two");
//! assert_eq!(cache.get(&1), Ok(&"one"));
//!
//! cache.put(3, "three");
//! assert!(!cache.exists(&2));
//! ```

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod traits;

pub use crate::builder::{LruCacheBuilder, LruConfig};
pub use crate::ds::{IntrusiveList, KeyIndex, SlotArena, SlotId};
pub use crate::error::{CacheError, ConfigError, InvariantError};
#[cfg(feature = "concurrency")]
pub use crate::policy::concurrent::ConcurrentLruCache;
pub use crate::policy::lru::LruCache;
