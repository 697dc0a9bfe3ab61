#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::error::CacheError;
use lrukit::policy::lru::LruCache;

// Fuzz arbitrary operation sequences on LruCache
//
// The first byte picks the capacity; every following pair of bytes is
// (op, key). After each step the cache must stay within capacity and its
// index and recency list must agree.
fuzz_target!(|data: &[u8]| {
    let Some((&cap_byte, rest)) = data.split_first() else {
        return;
    };

    let capacity = usize::from(cap_byte % 32) + 1;
    let mut cache: LruCache<u8, u16> = LruCache::new(capacity);

    for (step, pair) in rest.chunks_exact(2).enumerate() {
        let op = pair[0] % 8;
        let key = pair[1];
        let value = step as u16;

        match op {
            0 | 1 => {
                // put
                let was_present = cache.exists(&key);
                let old_len = cache.size();
                cache.put(key, value);

                assert_eq!(cache.get(&key), Ok(&value));
                if was_present || old_len < capacity {
                    assert_eq!(cache.size(), old_len + usize::from(!was_present));
                } else {
                    assert_eq!(cache.size(), capacity);
                }
            }
            2 => {
                // get
                match cache.get(&key) {
                    Ok(_) => assert_eq!(cache.recency_rank(&key), Some(0)),
                    Err(err) => {
                        assert_eq!(err, CacheError::NotFound);
                        assert!(!cache.exists(&key));
                    }
                }
            }
            3 => {
                // exists (read-only)
                let before = cache.recency_rank(&key);
                let present = cache.exists(&key);
                assert_eq!(present, before.is_some());
                assert_eq!(cache.recency_rank(&key), before);
            }
            4 => {
                // remove
                let old_len = cache.size();
                if cache.remove(&key).is_some() {
                    assert_eq!(cache.size(), old_len - 1);
                }
                assert!(!cache.exists(&key));
            }
            5 => {
                // pop_lru
                let expected = cache.peek_lru().map(|(k, v)| (*k, *v));
                assert_eq!(cache.pop_lru(), expected);
            }
            6 => {
                // touch
                if cache.touch(&key) {
                    assert_eq!(cache.recency_rank(&key), Some(0));
                }
            }
            7 => {
                // clear
                if key == 0 {
                    cache.clear();
                    assert!(cache.is_empty());
                }
            }
            _ => unreachable!(),
        }

        assert!(cache.size() <= capacity);
        assert!(cache.check_invariants().is_ok());
    }
});
