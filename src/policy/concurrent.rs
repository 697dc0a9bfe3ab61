//! Thread-safe handle around [`LruCache`].
//!
//! The core cache is single-threaded; this wrapper is the caller-side
//! serialization it needs when shared. Every clone of a
//! [`ConcurrentLruCache`] refers to the same underlying cache.
//!
//! ```text
//!   Thread 1           Thread 2           Thread 3
//!      │                  │                  │
//!      │ get(k1)          │ exists(k2)       │ put(k3, v)
//!      ▼                  ▼                  ▼
//!   ┌──────────────────────────────────────────────────────────┐
//!   │              Arc<RwLock<LruCache<K, V>>>                 │
//!   │                                                          │
//!   │  get/touch/put/remove/pop_lru/clear  → WRITE lock        │
//!   │  exists/peek/peek_lru/size/capacity  → READ lock         │
//!   │                                                          │
//!   │  A read that promotes an entry mutates the ledger, so    │
//!   │  `get` needs the write lock.                             │
//!   └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Values cannot be borrowed out of the lock: `get`/`peek` clone them, and
//! the `*_with` variants run a closure while the lock is held.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{CacheError, ConfigError};
use crate::policy::lru::LruCache;

/// Shared, lock-protected LRU cache.
///
/// # Example
///
/// ```
/// use lrukit::policy::concurrent::ConcurrentLruCache;
/// use std::thread;
///
/// let cache = ConcurrentLruCache::new(64);
/// let handles: Vec<_> = (0..4u64)
///     .map(|t| {
///         let cache = cache.clone();
///         thread::spawn(move || {
///             for i in 0..8 {
///                 cache.put(t * 100 + i, i);
///             }
///         })
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
/// assert_eq!(cache.size(), 32);
/// ```
pub struct ConcurrentLruCache<K, V> {
    inner: Arc<RwLock<LruCache<K, V>>>,
}

impl<K, V> ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// # Panics
    ///
    /// Panics if `capacity` is zero. See [`try_new`](Self::try_new).
    pub fn new(capacity: usize) -> Self {
        Self::from_cache(LruCache::new(capacity))
    }

    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        LruCache::try_new(capacity).map(Self::from_cache)
    }

    /// Wraps an existing cache, keeping its contents and recency order.
    pub fn from_cache(cache: LruCache<K, V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(cache)),
        }
    }

    pub fn put(&self, key: K, value: V) -> Option<V> {
        self.inner.write().put(key, value)
    }

    /// Returns a clone of the value and marks `key` most recently used.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::NotFound`] if `key` is not cached.
    pub fn get<Q>(&self, key: &Q) -> Result<V, CacheError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.inner.write().get(key).cloned()
    }

    /// Runs `f` on the value and marks `key` most recently used.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::NotFound`] if `key` is not cached.
    pub fn get_with<Q, R>(&self, key: &Q, f: impl FnOnce(&V) -> R) -> Result<R, CacheError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.write().get(key).map(f)
    }

    /// Runs `f` on a mutable reference to the value and marks `key` most
    /// recently used.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::NotFound`] if `key` is not cached.
    pub fn get_mut_with<Q, R>(
        &self,
        key: &Q,
        f: impl FnOnce(&mut V) -> R,
    ) -> Result<R, CacheError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.write().get_mut(key).map(f)
    }

    pub fn exists<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.read().exists(key)
    }

    /// Returns a clone of the value without changing recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.inner.read().peek(key).cloned()
    }

    pub fn peek_with<Q, R>(&self, key: &Q, f: impl FnOnce(&V) -> R) -> Option<R>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.read().peek(key).map(f)
    }

    pub fn peek_lru(&self) -> Option<(K, V)>
    where
        V: Clone,
    {
        self.inner
            .read()
            .peek_lru()
            .map(|(key, value)| (key.clone(), value.clone()))
    }

    pub fn touch<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.write().touch(key)
    }

    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.write().remove(key)
    }

    pub fn pop_lru(&self) -> Option<(K, V)> {
        self.inner.write().pop_lru()
    }

    pub fn size(&self) -> usize {
        self.inner.read().size()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Runs `f` with exclusive access to the underlying cache.
    ///
    /// Use this to make several operations atomic with respect to other
    /// handles.
    pub fn with_cache<R>(&self, f: impl FnOnce(&mut LruCache<K, V>) -> R) -> R {
        f(&mut self.inner.write())
    }
}

impl<K, V> Clone for ConcurrentLruCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> fmt::Debug for ConcurrentLruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_read() {
            Some(cache) => f
                .debug_struct("ConcurrentLruCache")
                .field("cache", &*cache)
                .finish(),
            None => f
                .debug_struct("ConcurrentLruCache")
                .field("cache", &"<locked>")
                .finish(),
        }
    }
}
