//! Cache Store Module
//!
//! Main cache engine combining a key index with arena-backed LRU ordering and
//! sliding TTL expiration. The store itself is not synchronized; see
//! `EvictionCache` for the thread-safe wrapper.

use std::borrow::Borrow;
use std::collections::hash_map::Entry as HashEntry;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::cache::{
    CacheEntry, CacheStats, Clock, RecencyList, SlotId, SystemClock, MIN_RECOMMENDED_TTL,
};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Cache storage with LRU eviction and lazy TTL expiration.
///
/// The index maps each key to the `SlotId` of its entry in the recency list.
/// Both structures always hold exactly the same set of keys.
#[derive(Debug)]
pub struct CacheStore<K, V, C = SystemClock> {
    /// Key to recency-list handle
    index: HashMap<K, SlotId>,
    /// Entries ordered from most to least recently used
    order: RecencyList<CacheEntry<K, V>>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Sliding TTL, zero disables expiration
    ttl: Duration,
    clock: C,
}

impl<K, V> CacheStore<K, V, SystemClock>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and TTL.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries the cache can hold
    /// * `ttl` - Sliding TTL, `Duration::ZERO` for a pure LRU cache
    pub fn new(capacity: usize, ttl: Duration) -> Result<Self> {
        Self::with_clock(capacity, ttl, SystemClock)
    }
}

impl<K, V, C> CacheStore<K, V, C>
where
    K: Eq + Hash + Clone,
    C: Clock,
{
    /// Creates a new CacheStore that reads time from `clock`.
    ///
    /// Fails with `InvalidCapacity` when `capacity` is zero. A TTL shorter
    /// than `MIN_RECOMMENDED_TTL` is accepted but logged as a warning.
    pub fn with_clock(capacity: usize, ttl: Duration, clock: C) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        if is_short_ttl(ttl) {
            warn!(
                "TTL of {:?} is very short; recommend at least {}s since every read extends entry life",
                ttl,
                MIN_RECOMMENDED_TTL.as_secs()
            );
        }

        info!("Cache store created: capacity={}, ttl={:?}", capacity, ttl);

        Ok(Self {
            index: HashMap::with_capacity(capacity),
            order: RecencyList::with_capacity(capacity),
            stats: CacheStats::new(),
            capacity,
            ttl,
            clock,
        })
    }

    // == Add ==
    /// Stores a key-value pair as the most recently used entry.
    ///
    /// An existing key has its value replaced and its entry recreated at the
    /// front with a fresh TTL. A new key evicts least recently used entries
    /// until there is room for it.
    ///
    /// Returns true if at least one entry was evicted.
    pub fn add(&mut self, key: K, value: V) -> bool {
        let mut evicted = false;

        if let Some(id) = self.index.remove(&key) {
            self.order.remove(id);
        } else {
            while self.index.len() >= self.capacity {
                let Some(oldest) = self.order.back().map(|entry| entry.key.clone()) else {
                    break;
                };
                let Some(id) = self.index.remove(&oldest) else {
                    break;
                };
                self.order.remove(id);
                self.stats.record_eviction();
                evicted = true;
                debug!("Evicted least recently used entry, {} remain", self.index.len());
            }
        }

        let entry = CacheEntry::new(key.clone(), value, self.clock.now(), self.ttl);
        // Hash the key and reserve its index slot before the ordering grows.
        let slot = self.index.entry(key);
        let id = self.order.push_front(entry);
        match slot {
            HashEntry::Vacant(vacant) => {
                vacant.insert(id);
            }
            HashEntry::Occupied(mut occupied) => {
                occupied.insert(id);
            }
        }

        evicted
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// A live entry has its TTL restarted and becomes most recently used.
    /// An expired entry is removed and reported as absent.
    pub fn get<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        let Some(&id) = self.index.get(key) else {
            self.stats.record_miss();
            return None;
        };

        let now = self.clock.now();
        let Some(entry) = self.order.get_mut(id) else {
            self.stats.record_miss();
            return None;
        };

        if entry.is_expired(now) {
            self.index.remove(key);
            self.order.remove(id);
            self.stats.record_expiration();
            self.stats.record_miss();
            debug!("Purged expired entry on access, {} remain", self.index.len());
            return None;
        }

        entry.refresh(now, self.ttl);
        let value = entry.value.clone();
        self.order.move_to_front(id);
        self.stats.record_hit();

        Some(value)
    }

    // == Remove ==
    /// Removes an entry by key regardless of its TTL.
    ///
    /// Returns true if the key was present.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.index.remove(key) {
            Some(id) => {
                self.order.remove(id);
                true
            }
            None => false,
        }
    }

    // == Clear ==
    /// Removes every entry, keeping capacity, TTL and counters.
    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
    }

    // == Contains ==
    /// Checks whether a key is present and not expired.
    ///
    /// Unlike `get`, this never refreshes the TTL, changes recency, or purges
    /// an expired entry.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entry(key)
            .is_some_and(|entry| !entry.is_expired(self.clock.now()))
    }

    // == Time To Live ==
    /// Returns the time left before a key expires without touching it.
    ///
    /// None if the key is absent or the cache has no TTL. An expired entry
    /// that has not been purged yet reports `Duration::ZERO`.
    pub fn ttl_remaining<Q>(&self, key: &Q) -> Option<Duration>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entry(key)
            .and_then(|entry| entry.ttl_remaining(self.clock.now()))
    }

    // == Length ==
    /// Returns the number of stored entries, including expired entries
    /// that no lookup has purged yet.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the configured TTL, zero when expiration is disabled.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.index.len())
    }

    fn entry<Q>(&self, key: &Q) -> Option<&CacheEntry<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).and_then(|&id| self.order.get(id))
    }

    /// Keys from most to least recently used.
    #[cfg(test)]
    pub(crate) fn keys_by_recency(&self) -> Vec<K> {
        self.order.iter().map(|entry| entry.key.clone()).collect()
    }

    /// Asserts that the index and the recency list describe the same entries.
    #[cfg(test)]
    pub(crate) fn validate_invariants(&self) {
        self.order.validate_invariants();
        assert_eq!(self.index.len(), self.order.len(), "index and ordering sizes differ");
        assert!(self.index.len() <= self.capacity, "capacity exceeded");
        for (key, &id) in &self.index {
            let entry = self.order.get(id);
            assert!(
                entry.is_some_and(|entry| entry.key == *key),
                "index handle does not resolve to its own key"
            );
        }
    }
}

/// Returns true for a TTL that is enabled but below `MIN_RECOMMENDED_TTL`.
pub(crate) fn is_short_ttl(ttl: Duration) -> bool {
    !ttl.is_zero() && ttl < MIN_RECOMMENDED_TTL
}
