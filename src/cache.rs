//! Bounded TTL cache with insertion-order eviction.
//!
//! Backs the open-now and aggregation snapshot caches. The policy is
//! deliberately simpler than LRU: entries expire after a fixed TTL, stale
//! entries are dropped lazily on read, and when the cache is full the entry
//! inserted longest ago is evicted regardless of how often it was read.
//!
//! The lock is held only for get/insert; callers recompute expired values
//! outside it. Concurrent recomputations of the same key are allowed: the
//! last writer wins and readers see either the old or the new value as a
//! whole, never a partial one.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::debug;

/// Hit/miss/eviction counters for monitoring and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl CacheStats {
    /// Fraction of reads served from the cache.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

#[derive(Debug)]
struct Inner<K, V> {
    entries: HashMap<K, Entry<V>>,
    /// Keys in insertion order; front is oldest.
    order: VecDeque<K>,
    stats: CacheStats,
}

/// Thread-safe associative cache with a fixed TTL and bounded capacity.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    inner: Mutex<Inner<K, V>>,
    ttl: Duration,
    capacity: usize,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a cache holding at most `capacity` entries, each fresh for
    /// `ttl` after insertion. A zero capacity is treated as one.
    #[must_use]
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                order: VecDeque::new(),
                stats: CacheStats::default(),
            }),
            ttl,
            capacity: capacity.max(1),
        }
    }

    /// Return a clone of the value for `key` if present and fresh.
    ///
    /// A stale entry counts as a miss and is removed so it no longer holds
    /// a capacity slot.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut inner = self.inner.lock();
        let fresh = match inner.entries.get(key) {
            Some(entry) => entry.inserted_at.elapsed() < self.ttl,
            None => {
                inner.stats.misses += 1;
                return None;
            }
        };
        if fresh {
            inner.stats.hits += 1;
            return inner.entries.get(key).map(|entry| entry.value.clone());
        }
        inner.stats.misses += 1;
        inner.entries.remove(key);
        inner.order.retain(|k| k != key);
        None
    }

    /// Insert `value` under `key`, replacing the whole entry and re-arming
    /// its TTL. A replaced key moves to the back of the eviction queue.
    pub fn insert(&self, key: K, value: V) {
        let mut inner = self.inner.lock();
        if inner.entries.contains_key(&key) {
            inner.order.retain(|k| k != &key);
        }
        inner.order.push_back(key.clone());
        inner.entries.insert(
            key,
            Entry {
                value,
                inserted_at: Instant::now(),
            },
        );
        while inner.entries.len() > self.capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.entries.remove(&oldest);
            inner.stats.evictions += 1;
            debug!(
                target: "cache",
                len = inner.entries.len(),
                capacity = self.capacity,
                "evicted oldest entry"
            );
        }
    }

    /// Number of entries currently stored, fresh or stale.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all entries and reset counters.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.order.clear();
        inner.stats = CacheStats::default();
    }

    /// Snapshot of the counters.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats
    }

    /// The configured freshness window.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }
}
