//! Example demonstrating LruCacheBuilder and the shared, lock-wrapped cache.
//!
//! Run with: cargo run --example basic_builder

use std::thread;

use lrukit::prelude::*;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .init();

    println!("=== LruCacheBuilder Examples ===\n");

    // Example 1: plain cache
    println!("1. Single-threaded cache");
    let mut lru = LruCacheBuilder::new(3).build::<u64, String>();

    lru.put(1, "one".to_string());
    lru.put(2, "two".to_string());
    lru.put(3, "three".to_string());

    // Access key 1 to make it MRU
    let _ = lru.get(&1);

    // Put key 4, evicts LRU (key 2)
    lru.put(4, "four".to_string());

    println!("   exists 1? {} (was accessed)", lru.exists(&1));
    println!("   exists 2? {} (evicted as LRU)", lru.exists(&2));
    println!("   exists 4? {} (just put)", lru.exists(&4));
    println!();

    // Example 2: configuration errors
    println!("2. Invalid configuration");
    match LruCacheBuilder::new(0).try_build::<u64, String>() {
        Ok(_) => println!("   unexpected success"),
        Err(err) => println!("   try_build(0): {err}"),
    }
    println!();

    // Example 3: from a config value
    println!("3. From LruConfig");
    let config = LruConfig {
        capacity: 100_000,
        prealloc: false,
    };
    let lazy = LruCacheBuilder::from_config(config).build::<u64, u64>();
    println!("   capacity: {}, size: {}", lazy.capacity(), lazy.size());
    println!();

    // Example 4: shared across threads
    println!("4. Concurrent cache");
    let shared = LruCacheBuilder::new(8).build_concurrent::<u64, u64>();
    let handles: Vec<_> = (0..4u64)
        .map(|t| {
            let cache = shared.clone();
            thread::spawn(move || {
                for i in 0..4 {
                    cache.put(t * 10 + i, i);
                }
            })
        })
        .collect();
    for handle in handles {
        if handle.join().is_err() {
            eprintln!("   worker panicked");
        }
    }
    println!(
        "   size: {}, capacity: {}",
        shared.size(),
        shared.capacity()
    );
    println!();

    // Example 5: common operations
    println!("5. Common Operations");
    let mut cache = LruCacheBuilder::new(10).build::<u64, String>();

    // Put and overwrite
    cache.put(1, "original".to_string());
    let old = cache.put(1, "updated".to_string());
    println!("   put returned previous: {:?}", old);

    if let Ok(value) = cache.get(&1) {
        println!("   get(&1): {}", value);
    }
    println!("   get(&99): {:?}", cache.get(&99));

    // exists does not update recency
    println!("   exists(&1): {}", cache.exists(&1));
    println!("   exists(&99): {}", cache.exists(&99));

    println!(
        "   size: {}, capacity: {}, is_empty: {}",
        cache.size(),
        cache.capacity(),
        cache.is_empty()
    );

    cache.clear();
    println!("   after clear - is_empty: {}", cache.is_empty());
}

// Expected output:
// === LruCacheBuilder Examples ===
//
// 1. Single-threaded cache
//    exists 1? true (was accessed)
//    exists 2? false (evicted as LRU)
//    exists 4? true (just put)
//
// 2. Invalid configuration
//    try_build(0): cache capacity must be greater than zero
//
// 3. From LruConfig
//    capacity: 100000, size: 0
//
// 4. Concurrent cache
//    size: 8, capacity: 8
//
// 5. Common Operations
//    put returned previous: Some("original")
//    get(&1): updated
//    get(&99): Err(NotFound)
//    exists(&1): true
//    exists(&99): false
//    size: 1, capacity: 10, is_empty: false
//    after clear - is_empty: true
