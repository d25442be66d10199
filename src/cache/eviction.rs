//! Thread-safe cache facade.
//!
//! Wraps a `CacheStore` in a single mutex. Every call holds the lock for its
//! whole body, so operations are fully serialized.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::cache::{CacheStats, CacheStore, Clock, SystemClock};
use crate::config::CacheConfig;
use crate::error::Result;

// == Eviction Cache ==
/// Fixed-capacity LRU cache with optional sliding TTL, safe to share
/// between threads.
///
/// Share it with `Arc<EvictionCache<K, V>>`. Values are cloned out on `get`;
/// store an `Arc<T>` to hand out shared references instead of copies.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use lru_ttl_cache::EvictionCache;
///
/// let cache = EvictionCache::new(2, Duration::ZERO).unwrap();
/// assert!(!cache.add("a", 1));
/// assert!(!cache.add("b", 2));
/// assert!(cache.add("c", 3)); // evicts "a"
/// assert_eq!(cache.get("a"), None);
/// assert_eq!(cache.get("b"), Some(2));
/// ```
#[derive(Debug)]
pub struct EvictionCache<K, V, C = SystemClock> {
    inner: Mutex<CacheStore<K, V, C>>,
}

impl<K, V> EvictionCache<K, V, SystemClock>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// `ttl` of `Duration::ZERO` disables expiration.
    pub fn new(capacity: usize, ttl: Duration) -> Result<Self> {
        Self::with_clock(capacity, ttl, SystemClock)
    }

    /// Creates a pure LRU cache with no expiration.
    pub fn lru(capacity: usize) -> Result<Self> {
        Self::new(capacity, Duration::ZERO)
    }

    /// Creates a cache from loaded configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Self::new(config.capacity, config.ttl())
    }
}

impl<K, V, C> EvictionCache<K, V, C>
where
    K: Eq + Hash + Clone,
    C: Clock,
{
    /// Creates a cache that reads time from `clock`.
    pub fn with_clock(capacity: usize, ttl: Duration, clock: C) -> Result<Self> {
        Ok(Self {
            inner: Mutex::new(CacheStore::with_clock(capacity, ttl, clock)?),
        })
    }

    // The lock is poisoned only by a panic while it is held, which means a
    // panicking Hash/Eq/Clone impl. The store runs those before it changes
    // the index or the ordering, so the structures are still in step.
    fn lock(&self) -> MutexGuard<'_, CacheStore<K, V, C>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inserts or overwrites `key`, making it the most recently used entry.
    ///
    /// Returns true if an older entry had to be evicted to make room.
    pub fn add(&self, key: K, value: V) -> bool {
        self.lock().add(key, value)
    }

    /// Returns a clone of the value for `key` if present and not expired.
    ///
    /// A hit restarts the entry's TTL and marks it most recently used. An
    /// expired entry is purged.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.lock().get(key)
    }

    /// Deletes `key` whether or not it has expired.
    pub fn remove<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lock().remove(key)
    }

    /// Drops every entry; capacity and TTL are unchanged.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Side-effect-free check that `key` is present and not expired.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lock().contains(key)
    }

    pub fn ttl_remaining<Q>(&self, key: &Q) -> Option<Duration>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lock().ttl_remaining(key)
    }

    /// Number of stored entries. Expired entries count until a `get` purges them.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Configured capacity.
    pub fn cap(&self) -> usize {
        self.lock().capacity()
    }

    pub fn ttl(&self) -> Duration {
        self.lock().ttl()
    }

    /// Snapshot of the hit/miss/eviction counters.
    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }
}
