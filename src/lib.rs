//! LRU TTL Cache - A thread-safe in-process key/value cache
//!
//! Fixed-capacity cache that evicts the least recently used entry when full,
//! with an optional sliding TTL that expires entries lazily on access.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheStats, Clock, EvictionCache, ManualClock, SystemClock, MIN_RECOMMENDED_TTL};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
