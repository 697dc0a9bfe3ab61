//! Minimal LRU walkthrough.
//!
//! Run with: RUST_LOG=lrukit=trace cargo run --example basic_lru

use lrukit::prelude::*;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), CacheError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .init();

    let mut cache = LruCache::try_new(2)?;

    cache.put(1u32, "alpha".to_string());
    cache.put(2, "beta".to_string());

    println!("hit 1: {}", cache.get(&1)?);

    cache.put(3, "gamma".to_string());

    println!("exists 2? {}", cache.exists(&2));
    match cache.get(&2) {
        Ok(value) => println!("hit 2: {value}"),
        Err(err) => println!("miss 2: {err}"),
    }
    println!("size: {}", cache.size());

    Ok(())
}

// Expected output:
// hit 1: alpha
// exists 2? false
// miss 2: key not found in cache
// size: 2
//
// Explanation: capacity=2; after get(&1), key 1 is MRU and key 2 is LRU.
// Putting key 3 evicts key 2.
