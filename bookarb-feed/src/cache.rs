//! Time-to-live caching of fetched odds, keyed by scope (sport or event) and market.

use std::hash::Hash;
use std::ops::AddAssign;
use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;

/// Lookups against a [`TtlCache`]. An expired entry counts as a miss.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
}

impl AddAssign<bool> for CacheStats {
    fn add_assign(&mut self, hit: bool) {
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// A sport key for league-wide fetches, or an event ID for single-event fetches.
    pub scope: String,
    pub market: String,
}
impl CacheKey {
    pub fn new(scope: impl Into<String>, market: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            market: market.into(),
        }
    }
}

#[derive(Debug)]
struct Entry<V> {
    value: V,
    inserted: Instant,
}

#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: FxHashMap<K, Entry<V>>,
    stats: CacheStats,
}
impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: FxHashMap::default(),
            stats: CacheStats::default(),
        }
    }

    pub fn get(&mut self, key: &K) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    /// Looks up an entry as of `now`. Expired entries are treated as absent and count as a miss.
    pub fn get_at(&mut self, key: &K, now: Instant) -> Option<V> {
        let value = self
            .entries
            .get(key)
            .filter(|entry| now.saturating_duration_since(entry.inserted) < self.ttl)
            .map(|entry| entry.value.clone());
        self.stats += value.is_some();
        value
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.insert_at(key, value, Instant::now())
    }

    /// Stores `value` as of `now`, first dropping any entries that have expired by then.
    pub fn insert_at(&mut self, key: K, value: V, now: Instant) {
        self.purge_expired_at(now);
        self.entries.insert(key, Entry { value, inserted: now });
    }

    /// Drops every entry that has expired as of `now`, returning the number dropped.
    pub fn purge_expired_at(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| now.saturating_duration_since(entry.inserted) < ttl);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}
