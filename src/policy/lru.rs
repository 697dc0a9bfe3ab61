//! # Least Recently Used (LRU) Cache
//!
//! A fixed-capacity map that discards the least recently touched entry when a
//! new key would push it over capacity.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                           LruCache<K, V>                             │
//!   │                                                                      │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  KeyIndex<K>  (FxHashMap<K, SlotId>)                         │   │
//!   │   │                                                              │   │
//!   │   │   "a" ──────────────────────┐                                │   │
//!   │   │   "b" ───────────────┐      │                                │   │
//!   │   │   "c" ────────┐      │      │                                │   │
//!   │   └───────────────┼──────┼──────┼────────────────────────────────┘   │
//!   │                   ▼      ▼      ▼                                    │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  IntrusiveList<Entry<K, V>>  (recency ledger)                │   │
//!   │   │                                                              │   │
//!   │   │  head ──► [c:3] ◄──► [b:2] ◄──► [a:1] ◄── tail               │   │
//!   │   │   (MRU)                                   (LRU)              │   │
//!   │   └──────────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Entries (key + value) are owned by the ledger's slot arena. The index only
//! holds `SlotId`s, and every id is removed from the index in the same call
//! that frees its slot, so the index never points at a dead or recycled slot.
//!
//! ## Operations Flow
//!
//! ```text
//!   put(d, 4) with capacity 3
//!   ═══════════════════════════════════════════════════════════════════
//!     before:  head ──► [c] ◄──► [b] ◄──► [a] ◄── tail
//!     1. index lookup: d absent
//!     2. push [d] at head           (ledger now holds 4 > capacity)
//!     3. pop tail [a], drop "a" from the index
//!     after:   head ──► [d] ◄──► [c] ◄──► [b] ◄── tail
//!
//!   put(b, 20) (overwrite)
//!   ═══════════════════════════════════════════════════════════════════
//!     1. index lookup: b → slot
//!     2. unlink + free that slot, drop "b" from the index
//!     3. push a fresh [b:20] at head (reuses the freed slot)
//!     after:   head ──► [b] ◄──► [d] ◄──► [c] ◄── tail
//!
//!   get(c)
//!   ═══════════════════════════════════════════════════════════════════
//!     1. index lookup: c → slot
//!     2. move slot to head
//!     after:   head ──► [c] ◄──► [b] ◄──► [d] ◄── tail
//! ```
//!
//! ## Methods
//!
//! | Method             | Complexity | Recency side effect |
//! |--------------------|------------|---------------------|
//! | `put(k, v)`        | O(1)*      | k becomes MRU       |
//! | `get(&k)`          | O(1)       | k becomes MRU       |
//! | `get_mut(&k)`      | O(1)       | k becomes MRU       |
//! | `touch(&k)`        | O(1)       | k becomes MRU       |
//! | `exists(&k)`       | O(1)       | none                |
//! | `peek(&k)`         | O(1)       | none                |
//! | `remove(&k)`       | O(1)       | -                   |
//! | `pop_lru()`        | O(1)       | -                   |
//! | `peek_lru()`       | O(1)       | none                |
//! | `recency_rank(&k)` | O(n)       | none                |
//! | `iter()`           | O(n)       | none                |
//! | `clear()`          | O(n)       | -                   |
//!
//! `*` amortized over `Vec`/map growth; with preallocation a full cache never
//! reallocates because freed slots are recycled.
//!
//! ## Thread Safety
//!
//! `LruCache` is `Send` but every operation that can change recency takes
//! `&mut self`. Callers sharing one across threads must serialize access,
//! e.g. with
//! [`ConcurrentLruCache`](crate::policy::concurrent::ConcurrentLruCache).

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::builder::LruConfig;
use crate::ds::intrusive_list::{self, IntrusiveList};
use crate::ds::key_index::KeyIndex;
use crate::ds::slot_arena::SlotId;
use crate::error::{CacheError, ConfigError, InvariantError};
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// Upper bound on the entries reserved up front when preallocation is on.
///
/// Larger capacities still work; storage past this grows on demand.
pub const MAX_PREALLOC_ENTRIES: usize = 1 << 16;

struct Entry<K, V> {
    key: K,
    value: V,
}

/// Fixed-capacity cache with least-recently-used eviction.
///
/// # Example
///
/// ```
/// use lrukit::error::CacheError;
/// use lrukit::policy::lru::LruCache;
///
/// let mut cache = LruCache::new(2);
/// cache.put("a", 1);
/// cache.put("b", 2);
///
/// // Reading "a" makes it the most recently used entry...
/// assert_eq!(cache.get("a"), Ok(&1));
///
/// // ...so the next insert evicts "b".
/// cache.put("c", 3);
/// assert_eq!(cache.get("b"), Err(CacheError::NotFound));
/// assert!(cache.exists("a"));
/// assert_eq!(cache.size(), 2);
/// ```
pub struct LruCache<K, V> {
    ledger: IntrusiveList<Entry<K, V>>,
    index: KeyIndex<K>,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`try_new`](Self::try_new) to get a
    /// [`ConfigError`] instead.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Self::with_config(LruConfig {
            capacity,
            ..LruConfig::default()
        })
    }

    /// Creates a cache from a full [`LruConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration fails validation.
    pub fn with_config(config: LruConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let reserved = if config.prealloc {
            config.capacity.min(MAX_PREALLOC_ENTRIES)
        } else {
            0
        };
        debug!(capacity = config.capacity, reserved, "creating lru cache");

        Ok(Self {
            // `put` links the new entry before evicting, so a full cache
            // briefly holds one node over capacity.
            ledger: IntrusiveList::with_capacity(if reserved > 0 { reserved + 1 } else { 0 }),
            index: KeyIndex::with_capacity(reserved),
            capacity: config.capacity,
        })
    }

    /// Inserts `value` under `key` as the most recently used entry.
    ///
    /// An existing entry for `key` is replaced (its value is returned) and
    /// moves to the front; it is never left at its old position. If the cache
    /// then holds more than `capacity` entries, the least recently used one is
    /// evicted.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let replaced = match self.index.remove(&key) {
            Some(id) => {
                let old = self.ledger.remove(id);
                debug_assert!(old.is_some(), "key index pointed at freed slot {}", id.index());
                old.map(|entry| entry.value)
            },
            None => None,
        };

        let id = self.ledger.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);

        if self.ledger.len() > self.capacity {
            if let Some((evicted, _)) = self.remove_back() {
                trace!(
                    slot = evicted.index(),
                    size = self.ledger.len(),
                    "evicted least recently used entry"
                );
            }
        }

        #[cfg(debug_assertions)]
        self.debug_validate_invariants();

        replaced
    }

    /// Returns the value for `key` and marks it most recently used.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::NotFound`] if `key` is not cached.
    pub fn get<Q>(&mut self, key: &Q) -> Result<&V, CacheError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.promote(key).ok_or(CacheError::NotFound)?;
        self.ledger
            .get(id)
            .map(|entry| &entry.value)
            .ok_or(CacheError::NotFound)
    }

    /// Like [`get`](Self::get), but returns a mutable reference.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::NotFound`] if `key` is not cached.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V, CacheError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.promote(key).ok_or(CacheError::NotFound)?;
        self.ledger
            .get_mut(id)
            .map(|entry| &mut entry.value)
            .ok_or(CacheError::NotFound)
    }

    /// Returns `true` if `key` is cached. Does not change recency.
    #[inline]
    pub fn exists<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains(key)
    }

    /// Number of cached entries; always `<= capacity()`.
    #[inline]
    pub fn size(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the value for `key` without changing recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.index.lookup(key)?;
        self.ledger.get(id).map(|entry| &entry.value)
    }

    /// Marks `key` most recently used. Returns `false` if it is not cached.
    pub fn touch<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.promote(key).is_some()
    }

    /// Removes `key`, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.index.remove(key)?;
        let entry = self.ledger.remove(id);
        debug_assert!(entry.is_some(), "key index pointed at freed slot {}", id.index());

        #[cfg(debug_assertions)]
        self.debug_validate_invariants();

        entry.map(|entry| entry.value)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let (_, entry) = self.remove_back()?;

        #[cfg(debug_assertions)]
        self.debug_validate_invariants();

        Some((entry.key, entry.value))
    }

    /// Returns the least recently used entry without changing recency.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.ledger.back().map(|entry| (&entry.key, &entry.value))
    }

    /// Position of `key` in recency order: `0` is the most recently used.
    ///
    /// Walks the ledger, so this is O(n).
    pub fn recency_rank<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let target = self.index.lookup(key)?;
        self.ledger.iter_entries().position(|(id, _)| id == target)
    }

    /// Drops every entry. Capacity is unchanged.
    pub fn clear(&mut self) {
        let dropped = self.ledger.len();
        self.ledger.clear();
        self.index.clear();
        trace!(dropped, "cleared lru cache");
    }

    /// Iterates entries from most to least recently used without changing
    /// recency.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.ledger.iter(),
        }
    }

    /// Checks that the key index and recency ledger describe the same set of
    /// entries and that the cache is within capacity.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantError`] describing the first violation found.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() != self.ledger.len() {
            return Err(InvariantError::new(format!(
                "key index has {} keys but recency ledger has {} entries",
                self.index.len(),
                self.ledger.len()
            )));
        }
        if self.ledger.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "cache holds {} entries, capacity is {}",
                self.ledger.len(),
                self.capacity
            )));
        }
        for (key, id) in self.index.iter() {
            match self.ledger.get(id) {
                Some(entry) if entry.key == *key => {},
                Some(_) => {
                    return Err(InvariantError::new(format!(
                        "slot {} holds a different key than the index recorded",
                        id.index()
                    )));
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "key index points at freed slot {}",
                        id.index()
                    )));
                },
            }
        }
        Ok(())
    }

    fn promote<Q>(&mut self, key: &Q) -> Option<SlotId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.index.lookup(key)?;
        let moved = self.ledger.move_to_front(id);
        debug_assert!(moved, "key index pointed at freed slot {}", id.index());

        #[cfg(debug_assertions)]
        self.debug_validate_invariants();

        moved.then_some(id)
    }

    /// Unlinks the tail entry and drops its key from the index.
    fn remove_back(&mut self) -> Option<(SlotId, Entry<K, V>)> {
        let id = self.ledger.back_id()?;
        let entry = self.ledger.remove(id)?;
        let indexed = self.index.remove(&entry.key);
        debug_assert_eq!(indexed, Some(id), "tail entry missing from key index");
        Some((id, entry))
    }

    #[cfg(debug_assertions)]
    fn debug_validate_invariants(&self) {
        self.ledger.debug_validate_invariants();
        if let Err(e) = self.check_invariants() {
            panic!("lru invariant violated: {}", e);
        }
    }
}

/// Iterator over `(&K, &V)` from most to least recently used.
pub struct Iter<'a, K, V> {
    inner: intrusive_list::Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn put(&mut self, key: K, value: V) -> Option<V> {
        LruCache::put(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Result<&V, CacheError> {
        LruCache::get(self, key)
    }

    #[inline]
    fn exists(&self, key: &K) -> bool {
        LruCache::exists(self, key)
    }

    #[inline]
    fn size(&self) -> usize {
        LruCache::size(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        LruCache::clear(self)
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        LruCache::remove(self, key)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn pop_lru(&mut self) -> Option<(K, V)> {
        LruCache::pop_lru(self)
    }

    #[inline]
    fn peek_lru(&self) -> Option<(&K, &V)> {
        LruCache::peek_lru(self)
    }

    #[inline]
    fn touch(&mut self, key: &K) -> bool {
        LruCache::touch(self, key)
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        LruCache::recency_rank(self, key)
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, V> Default for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache with [`LruConfig::default`] capacity.
    fn default() -> Self {
        Self::new(LruConfig::default().capacity)
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.ledger.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys_mru_to_lru<K: Eq + Hash + Clone, V>(cache: &LruCache<K, V>) -> Vec<K> {
        cache.iter().map(|(k, _)| k.clone()).collect()
    }

    // ==============================================
    // CORRECTNESS TESTS MODULE
    // ==============================================
    mod correctness {
        use super::*;

        mod basic_behavior {
            use super::*;

            #[test]
            fn new_cache_is_empty() {
                let cache: LruCache<i32, i32> = LruCache::new(10);
                assert_eq!(cache.capacity(), 10);
                assert_eq!(cache.size(), 0);
                assert!(cache.is_empty());
            }

            #[test]
            fn put_then_get() {
                let mut cache = LruCache::new(5);
                assert_eq!(cache.put(1, 100), None);
                assert_eq!(cache.size(), 1);
                assert!(cache.exists(&1));
                assert_eq!(cache.get(&1), Ok(&100));
            }

            #[test]
            fn get_missing_key_is_not_found() {
                let mut cache = LruCache::new(5);
                cache.put(1, 100);
                assert_eq!(cache.get(&2), Err(CacheError::NotFound));
            }

            #[test]
            fn get_on_empty_cache_is_not_found() {
                let mut cache: LruCache<&str, i32> = LruCache::new(3);
                assert_eq!(cache.get("anything"), Err(CacheError::NotFound));
                assert!(cache.get_mut("anything").is_err());
            }

            #[test]
            fn put_existing_key_replaces_value() {
                let mut cache = LruCache::new(5);
                assert_eq!(cache.put("a", 1), None);
                assert_eq!(cache.put("a", 2), Some(1));
                assert_eq!(cache.size(), 1);
                assert_eq!(cache.get("a"), Ok(&2));
            }

            #[test]
            fn get_mut_updates_value_and_promotes() {
                let mut cache = LruCache::new(2);
                cache.put("a", 1);
                cache.put("b", 2);

                if let Ok(value) = cache.get_mut("a") {
                    *value += 10;
                }
                cache.put("c", 3);

                assert_eq!(cache.peek("a"), Some(&11));
                assert!(!cache.exists("b"));
            }

            #[test]
            fn remove_existing_and_missing() {
                let mut cache = LruCache::new(5);
                cache.put(1, 100);
                cache.put(2, 200);

                assert_eq!(cache.remove(&1), Some(100));
                assert_eq!(cache.remove(&1), None);
                assert_eq!(cache.size(), 1);
                assert!(!cache.exists(&1));
            }

            #[test]
            fn clear_drops_everything() {
                let mut cache = LruCache::new(5);
                for i in 0..5 {
                    cache.put(i, i * 10);
                }
                cache.clear();

                assert!(cache.is_empty());
                assert_eq!(cache.capacity(), 5);
                for i in 0..5 {
                    assert!(!cache.exists(&i));
                }
                cache.put(9, 90);
                assert_eq!(cache.get(&9), Ok(&90));
            }

            #[test]
            fn borrowed_key_lookups() {
                let mut cache: LruCache<String, usize> = LruCache::new(4);
                cache.put("alpha".to_string(), 1);

                assert!(cache.exists("alpha"));
                assert_eq!(cache.get("alpha"), Ok(&1));
                assert_eq!(cache.peek("alpha"), Some(&1));
                assert_eq!(cache.remove("alpha"), Some(1));
            }
        }

        mod construction {
            use super::*;

            #[test]
            fn try_new_rejects_zero_capacity() {
                let err = LruCache::<u32, u32>::try_new(0).unwrap_err();
                assert_eq!(err.message(), "cache capacity must be greater than zero");
            }

            #[test]
            #[should_panic(expected = "cache capacity must be greater than zero")]
            fn new_panics_on_zero_capacity() {
                let _cache: LruCache<u32, u32> = LruCache::new(0);
            }

            #[test]
            fn huge_capacity_does_not_reserve_everything() {
                let mut cache: LruCache<u64, u64> = LruCache::new(usize::MAX);
                assert_eq!(cache.capacity(), usize::MAX);
                cache.put(1, 1);
                assert_eq!(cache.get(&1), Ok(&1));
            }

            #[test]
            fn with_config_without_prealloc() {
                let config = LruConfig {
                    capacity: 4,
                    prealloc: false,
                };
                let mut cache: LruCache<u8, u8> = LruCache::with_config(config).unwrap();
                assert_eq!(cache.capacity(), 4);
                cache.extend((0..6).map(|i| (i, i)));
                assert_eq!(cache.size(), 4);
            }

            #[test]
            fn default_uses_default_config_capacity() {
                let cache: LruCache<u8, u8> = LruCache::default();
                assert_eq!(cache.capacity(), LruConfig::default().capacity);
            }

            #[test]
            fn debug_output_reports_len_and_capacity() {
                let mut cache = LruCache::new(3);
                cache.put(1, "x");
                let dbg = format!("{cache:?}");
                assert!(dbg.contains("len: 1"));
                assert!(dbg.contains("capacity: 3"));
            }
        }

        mod eviction {
            use super::*;

            #[test]
            fn evicts_least_recently_inserted() {
                let mut cache = LruCache::new(2);
                cache.put("a", 1);
                cache.put("b", 2);
                cache.put("c", 3);

                assert!(!cache.exists("a"));
                assert_eq!(keys_mru_to_lru(&cache), vec!["c", "b"]);
            }

            #[test]
            fn get_protects_from_eviction() {
                let mut cache = LruCache::new(2);
                cache.put("a", 1);
                cache.put("b", 2);
                assert_eq!(cache.get("a"), Ok(&1));

                cache.put("c", 3);
                assert!(cache.exists("a"));
                assert!(!cache.exists("b"));
                assert_eq!(cache.get("b"), Err(CacheError::NotFound));
            }

            #[test]
            fn overwrite_refreshes_recency() {
                let mut cache = LruCache::new(3);
                cache.put("a", 1);
                cache.put("b", 2);
                cache.put("c", 3);
                cache.put("a", 10);
                assert_eq!(keys_mru_to_lru(&cache), vec!["a", "c", "b"]);

                cache.put("d", 4);
                assert!(!cache.exists("b"));
                assert_eq!(cache.peek("a"), Some(&10));
            }

            #[test]
            fn overwrite_at_capacity_does_not_evict() {
                let mut cache = LruCache::new(2);
                cache.put("a", 1);
                cache.put("b", 2);
                cache.put("b", 3);

                assert_eq!(cache.size(), 2);
                assert!(cache.exists("a"));
                assert_eq!(cache.peek("b"), Some(&3));
            }

            #[test]
            fn capacity_one_keeps_only_latest_key() {
                let mut cache = LruCache::new(1);
                cache.put("a", 1);
                cache.put("a", 2);
                assert_eq!(cache.size(), 1);
                assert_eq!(cache.peek("a"), Some(&2));

                cache.put("b", 3);
                assert_eq!(cache.size(), 1);
                assert!(!cache.exists("a"));
                assert_eq!(cache.get("b"), Ok(&3));
            }

            #[test]
            fn exists_and_peek_do_not_promote() {
                let mut cache = LruCache::new(2);
                cache.put("a", 1);
                cache.put("b", 2);

                assert!(cache.exists("a"));
                assert_eq!(cache.peek("a"), Some(&1));
                cache.put("c", 3);

                assert!(!cache.exists("a"));
            }

            #[test]
            fn touch_promotes_without_reading() {
                let mut cache = LruCache::new(3);
                cache.put(1, "one");
                cache.put(2, "two");
                cache.put(3, "three");

                assert!(cache.touch(&1));
                assert!(!cache.touch(&9));
                cache.put(4, "four");

                assert!(cache.exists(&1));
                assert!(!cache.exists(&2));
            }

            #[test]
            fn steady_churn_reuses_slots() {
                let mut cache = LruCache::new(8);
                for i in 0..1_000u32 {
                    cache.put(i, i);
                }
                assert_eq!(cache.size(), 8);
                // Evicted slots are recycled, so the arena never doubles.
                assert!(cache.ledger.capacity() < 16);
                let expected: Vec<u32> = (992..1_000).rev().collect();
                assert_eq!(keys_mru_to_lru(&cache), expected);
            }
        }

        mod lru_operations {
            use super::*;

            #[test]
            fn pop_lru_drains_in_recency_order() {
                let mut cache = LruCache::new(4);
                cache.put(1, "one");
                cache.put(2, "two");
                cache.put(3, "three");
                cache.get(&1).unwrap();

                assert_eq!(cache.pop_lru(), Some((2, "two")));
                assert_eq!(cache.pop_lru(), Some((3, "three")));
                assert_eq!(cache.pop_lru(), Some((1, "one")));
                assert_eq!(cache.pop_lru(), None);
                assert!(cache.is_empty());
            }

            #[test]
            fn peek_lru_does_not_change_order() {
                let mut cache = LruCache::new(3);
                assert_eq!(cache.peek_lru(), None);
                cache.put('x', 1);
                cache.put('y', 2);

                assert_eq!(cache.peek_lru(), Some((&'x', &1)));
                assert_eq!(cache.peek_lru(), Some((&'x', &1)));
                assert_eq!(cache.recency_rank(&'x'), Some(1));
            }

            #[test]
            fn recency_rank_tracks_promotions() {
                let mut cache = LruCache::new(3);
                cache.put("a", 1);
                cache.put("b", 2);
                cache.put("c", 3);

                assert_eq!(cache.recency_rank("c"), Some(0));
                assert_eq!(cache.recency_rank("a"), Some(2));

                cache.get("a").unwrap();
                assert_eq!(cache.recency_rank("a"), Some(0));
                assert_eq!(cache.recency_rank("b"), Some(2));
                assert_eq!(cache.recency_rank("zz"), None);
            }

            #[test]
            fn iter_is_mru_first_and_exact_size() {
                let mut cache = LruCache::new(3);
                cache.put(1, 'a');
                cache.put(2, 'b');
                cache.put(3, 'c');
                cache.get(&2).unwrap();

                let iter = cache.iter();
                assert_eq!(iter.len(), 3);
                let pairs: Vec<_> = (&cache).into_iter().map(|(k, v)| (*k, *v)).collect();
                assert_eq!(pairs, vec![(2, 'b'), (3, 'c'), (1, 'a')]);
            }
        }

        mod state_consistency {
            use super::*;

            #[test]
            fn invariants_hold_across_mixed_operations() {
                let mut cache = LruCache::new(4);
                for i in 0..20u32 {
                    cache.put(i % 7, i);
                    if i % 3 == 0 {
                        let _ = cache.get(&(i % 5));
                    }
                    if i % 4 == 0 {
                        cache.remove(&(i % 6));
                    }
                    assert!(cache.check_invariants().is_ok());
                    assert!(cache.size() <= cache.capacity());
                }
            }

            #[test]
            fn check_invariants_detects_mismatched_index() {
                let mut cache = LruCache::new(4);
                cache.put(1, 1);
                cache.put(2, 2);
                // Point key 1 at key 2's slot.
                let slot = cache.index.lookup(&2).unwrap();
                cache.index.insert(1, slot);

                let err = cache.check_invariants().unwrap_err();
                assert!(err.message().contains("different key"));
            }

            #[test]
            fn check_invariants_detects_size_mismatch() {
                let mut cache = LruCache::new(4);
                cache.put(1, 1);
                cache.index.remove(&1);

                let err = cache.check_invariants().unwrap_err();
                assert!(err.message().contains("0 keys"));
            }

            #[test]
            fn trait_objects_share_semantics() {
                fn drive<C: LruCacheTrait<u32, u32>>(cache: &mut C) {
                    cache.put(1, 1);
                    cache.put(2, 2);
                    assert!(cache.touch(&1));
                    cache.put(3, 3);
                    assert!(!cache.exists(&2));
                    assert_eq!(cache.peek_lru(), Some((&1, &1)));
                    assert_eq!(cache.remove_batch(&[1, 9]), vec![Some(1), None]);
                    assert_eq!(cache.pop_lru(), Some((3, 3)));
                    assert!(cache.is_empty());
                }

                let mut cache = LruCache::new(2);
                drive(&mut cache);
            }

            #[test]
            fn cache_is_send() {
                fn assert_send<T: Send>() {}
                assert_send::<LruCache<String, Vec<u8>>>();
            }
        }
    }
}
