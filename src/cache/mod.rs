//! Cache Module
//!
//! Provides a fixed-capacity in-memory cache with LRU eviction and optional
//! sliding TTL expiration checked lazily on access.

mod clock;
mod entry;
mod eviction;
mod lru;
mod stats;
mod store;


use std::time::Duration;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use eviction::EvictionCache;
pub use lru::{RecencyList, SlotId};
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Shortest TTL accepted without a warning.
///
/// Shorter TTLs still work, but combined with refresh-on-read they tend to
/// expire entries sooner than callers expect.
pub const MIN_RECOMMENDED_TTL: Duration = Duration::from_secs(60);
