#[cfg(feature = "concurrency")]
pub mod concurrent;
pub mod lru;
