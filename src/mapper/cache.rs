//! Generation cache with LRU eviction.
//!
//! Each route table snapshot owns its own cache, so registering a route
//! (which publishes a new snapshot) can never serve a stale path.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// Canonical parameter key: present values as `(name, string form)`, sorted by name.
pub(crate) type CacheKey = Vec<(String, String)>;

/// Cache performance statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache, including cached "no route" results
    pub hits: u64,
    /// Lookups that had to scan the route table
    pub misses: u64,
    /// Entries currently cached
    pub len: usize,
    /// Maximum number of entries before LRU eviction
    pub capacity: usize,
}

impl CacheStats {
    /// Fraction of lookups served from the cache; `0.0` before any lookup
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

/// LRU cache of generation results, including "no route" results
#[derive(Debug)]
pub(crate) struct GenerationCache {
    // Reads use peek() under the read lock; promote()/put() need the write lock
    entries: RwLock<LruCache<CacheKey, Option<String>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl GenerationCache {
    /// Create a cache; `None` when the capacity is zero.
    pub(crate) fn new(capacity: usize) -> Option<Self> {
        NonZeroUsize::new(capacity).map(|cap| Self {
            entries: RwLock::new(LruCache::new(cap)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    /// Cached result for a key: `Some(None)` is a cached "no route".
    ///
    /// Lookups share the read lock. Recency is refreshed only when the write
    /// lock is free, so under contention eviction order is approximate.
    pub(crate) fn get(&self, key: &CacheKey) -> Option<Option<String>> {
        let hit = match self.entries.read() {
            Ok(guard) => guard.peek(key).cloned(),
            Err(_) => None,
        };
        if hit.is_some() {
            if let Ok(mut guard) = self.entries.try_write() {
                guard.promote(key);
            }
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        hit
    }

    pub(crate) fn insert(&self, key: CacheKey, value: Option<String>) {
        if let Ok(mut guard) = self.entries.write() {
            guard.put(key, value);
        }
    }

    pub(crate) fn stats(&self) -> CacheStats {
        let (len, capacity) = self
            .entries
            .read()
            .map(|guard| (guard.len(), guard.cap().get()))
            .unwrap_or_default();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            len,
            capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(pairs: &[(&str, &str)]) -> CacheKey {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_zero_capacity_disables() {
        assert!(GenerationCache::new(0).is_none());
    }

    #[test]
    fn test_miss_then_hit() {
        let cache = GenerationCache::new(4).unwrap();
        let k = key(&[("controller", "blog")]);
        assert_eq!(cache.get(&k), None);

        cache.insert(k.clone(), Some("/blog".to_string()));
        assert_eq!(cache.get(&k), Some(Some("/blog".to_string())));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.len, 1);
        assert!((stats.hit_rate() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_caches_no_route() {
        let cache = GenerationCache::new(4).unwrap();
        let k = key(&[("known", "foo")]);
        cache.insert(k.clone(), None);
        assert_eq!(cache.get(&k), Some(None));
    }

    #[test]
    fn test_hit_refreshes_recency() {
        let cache = GenerationCache::new(2).unwrap();
        cache.insert(key(&[("a", "1")]), Some("/a".to_string()));
        cache.insert(key(&[("b", "1")]), Some("/b".to_string()));

        // Uncontended hit promotes "a", so "b" is the eviction victim
        assert!(cache.get(&key(&[("a", "1")])).is_some());
        cache.insert(key(&[("c", "1")]), Some("/c".to_string()));

        assert_eq!(cache.get(&key(&[("b", "1")])), None);
        assert_eq!(cache.get(&key(&[("a", "1")])), Some(Some("/a".to_string())));
    }

    #[test]
    fn test_concurrent_hits_share_read_lock() {
        let cache = std::sync::Arc::new(GenerationCache::new(8).unwrap());
        let k = key(&[("controller", "blog")]);
        cache.insert(k.clone(), Some("/blog".to_string()));

        // Hold a read guard: lookups must still succeed without the write lock
        let reader = cache.entries.read().unwrap();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = std::sync::Arc::clone(&cache);
                let k = k.clone();
                std::thread::spawn(move || cache.get(&k))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Some(Some("/blog".to_string())));
        }
        drop(reader);
        assert_eq!(cache.stats().hits, 4);
    }

    #[test]
    fn test_lru_eviction() {
        let cache = GenerationCache::new(2).unwrap();
        cache.insert(key(&[("a", "1")]), Some("/a".to_string()));
        cache.insert(key(&[("b", "1")]), Some("/b".to_string()));
        cache.insert(key(&[("c", "1")]), Some("/c".to_string()));

        assert_eq!(cache.get(&key(&[("a", "1")])), None);
        assert!(cache.get(&key(&[("c", "1")])).is_some());
        assert_eq!(cache.stats().capacity, 2);
    }
}
