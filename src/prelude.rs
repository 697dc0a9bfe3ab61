pub use crate::builder::{LruCacheBuilder, LruConfig};
pub use crate::error::{CacheError, ConfigError};
#[cfg(feature = "concurrency")]
pub use crate::policy::concurrent::ConcurrentLruCache;
pub use crate::policy::lru::LruCache;
pub use crate::traits::{CoreCache, LruCacheTrait, MutableCache};
