//! # Cache Trait Hierarchy
//!
//! Seams for code that wants to be generic over "a bounded cache" rather than
//! tied to [`LruCache`](crate::policy::lru::LruCache).
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │                                         │
//!   │  put(&mut, K, V) → Option<V>            │
//!   │  get(&mut, &K) → Result<&V>             │
//!   │  exists(&, &K) → bool                   │
//!   │  size(&) → usize                        │
//!   │  capacity(&) → usize                    │
//!   │  clear(&mut)                            │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          MutableCache<K, V>             │
//!   │                                         │
//!   │  remove(&K) → Option<V>                 │
//!   │  remove_batch(&[K]) → Vec<Option<V>>    │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          LruCacheTrait<K, V>            │
//!   │                                         │
//!   │  pop_lru() → Option<(K, V)>             │
//!   │  peek_lru() → Option<(&K, &V)>          │
//!   │  touch(&K) → bool                       │
//!   │  recency_rank(&K) → Option<usize>       │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! `get` takes `&mut self` because a read promotes the entry; use
//! `exists` (or the inherent `peek`) to probe without touching recency.
//!
//! ## Thread Safety
//!
//! Implementations are single-threaded. Share one behind a lock, or use
//! `ConcurrentLruCache` (feature `concurrency`).

use crate::error::CacheError;

/// Operations every bounded cache supports.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCache;
/// use lrukit::traits::CoreCache;
///
/// fn warm<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.put(*key, value.clone());
///     }
/// }
///
/// let mut cache = LruCache::new(8);
/// warm(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(CoreCache::size(&cache), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts or replaces `key`, returning the replaced value.
    ///
    /// May evict an unrelated entry to stay within capacity.
    fn put(&mut self, key: K, value: V) -> Option<V>;

    /// Returns the value for `key`, marking it most recently used.
    fn get(&mut self, key: &K) -> Result<&V, CacheError>;

    /// Returns `true` if `key` is cached. Never changes recency.
    fn exists(&self, key: &K) -> bool;

    /// Number of cached entries.
    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Maximum number of entries held after any `put` returns.
    fn capacity(&self) -> usize;

    /// Drops every entry.
    fn clear(&mut self);
}

/// Caches that support removing an arbitrary key.
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes `key`, returning its value if it was cached.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes each key in order; results line up with `keys`.
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|key| self.remove(key)).collect()
    }
}

/// Recency-specific operations of an LRU cache.
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Returns the least recently used entry without changing order.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks `key` most recently used without reading it.
    ///
    /// Returns `false` if `key` is not cached.
    fn touch(&mut self, key: &K) -> bool;

    /// Position of `key` in recency order, `0` being most recent.
    fn recency_rank(&self, key: &K) -> Option<usize>;
}
