//! Stale-time cache for API reads
//!
//! Entries older than the stale time are treated as missing. Callers pass the
//! current time so expiry stays deterministic under test.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct QueryCache<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    stale_time: Duration,
}

impl<K: Eq + Hash, V: Clone> QueryCache<K, V> {
    pub fn new(stale_time: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stale_time,
        }
    }

    pub fn stale_time(&self) -> Duration {
        self.stale_time
    }

    /// Cached value if it was stored less than `stale_time` before `now`
    pub fn get_fresh(&self, key: &K, now: DateTime<Utc>) -> Option<V> {
        self.entries
            .get(key)
            .filter(|entry| now - entry.fetched_at < self.stale_time)
            .map(|entry| entry.value.clone())
    }

    pub fn insert(&mut self, key: K, value: V, now: DateTime<Utc>) {
        self.entries.insert(
            key,
            CacheEntry {
                value,
                fetched_at: now,
            },
        );
    }

    /// Returns true if an entry was dropped
    pub fn invalidate(&mut self, key: &K) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn invalidate_all(&mut self) {
        self.entries.clear();
    }

    /// Drop every stale entry
    pub fn prune(&mut self, now: DateTime<Utc>) {
        let stale_time = self.stale_time;
        self.entries
            .retain(|_, entry| now - entry.fetched_at < stale_time);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_fresh_until_stale_time() {
        let mut cache = QueryCache::new(Duration::seconds(60));
        cache.insert("producers", 1, t0());

        assert_eq!(cache.get_fresh(&"producers", t0()), Some(1));
        assert_eq!(cache.get_fresh(&"producers", t0() + Duration::seconds(59)), Some(1));
        assert_eq!(cache.get_fresh(&"producers", t0() + Duration::seconds(60)), None);
        assert_eq!(cache.get_fresh(&"missing", t0()), None);
    }

    #[test]
    fn test_zero_stale_time_never_hits() {
        let mut cache = QueryCache::new(Duration::zero());
        cache.insert(1, "a", t0());
        assert_eq!(cache.get_fresh(&1, t0()), None);
    }

    #[test]
    fn test_insert_refreshes_timestamp() {
        let mut cache = QueryCache::new(Duration::seconds(10));
        cache.insert(1, "old", t0());
        cache.insert(1, "new", t0() + Duration::seconds(8));
        assert_eq!(cache.get_fresh(&1, t0() + Duration::seconds(15)), Some("new"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_invalidation() {
        let mut cache = QueryCache::new(Duration::seconds(60));
        cache.insert(1, "a", t0());
        cache.insert(2, "b", t0());

        assert!(cache.invalidate(&1));
        assert!(!cache.invalidate(&1));
        assert_eq!(cache.get_fresh(&1, t0()), None);
        assert_eq!(cache.get_fresh(&2, t0()), Some("b"));

        cache.invalidate_all();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_prune_drops_only_stale() {
        let mut cache = QueryCache::new(Duration::seconds(30));
        cache.insert(1, "a", t0());
        cache.insert(2, "b", t0() + Duration::seconds(20));
        cache.prune(t0() + Duration::seconds(40));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get_fresh(&2, t0() + Duration::seconds(40)), Some("b"));
    }
}
