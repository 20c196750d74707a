//! Caching infrastructure for nutrition lookups
//!
//! A small in-memory TTL cache. One instance is built per process (the
//! nutrition analyzer owns it) with the TTL taken from configuration.
//!
//! Entries are never evicted explicitly. A stale entry is treated as a miss
//! on read and is superseded by the next insert under the same key.
//!
//! Lookups and inserts are not coordinated: two concurrent misses for the same
//! key both compute a value and the later insert wins. The computation behind
//! the cache is idempotent, so either value is valid.
//!
//! ```rust
//! use journal_assistant::cache::TtlCache;
//! use std::time::Duration;
//!
//! let cache: TtlCache<String, u32> = TtlCache::new(Duration::from_secs(300));
//! cache.insert("key".to_string(), 7);
//! assert_eq!(cache.get(&"key".to_string()), Some(7));
//! ```

use parking_lot::Mutex;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Cached value with its expiry instant
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The cached value
    pub value: T,
    /// Insertion time plus the cache TTL
    pub expires_at: Instant,
}

impl<T> CacheEntry<T> {
    /// Create a new cache entry expiring `ttl` from now
    pub fn new(value: T, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    /// Check if this entry has expired
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    /// Get the remaining time to live
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}

/// Cache statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStats {
    /// Total number of entries, stale ones included
    pub entries: usize,
    /// Number of hits
    pub hits: u64,
    /// Number of misses (absent or stale)
    pub misses: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

#[derive(Debug)]
struct CacheState<K, V> {
    data: HashMap<K, CacheEntry<V>>,
    hits: u64,
    misses: u64,
}

/// Thread-safe in-memory cache with a single fixed TTL
#[derive(Debug)]
pub struct TtlCache<K, V> {
    state: Mutex<CacheState<K, V>>,
    ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Create a new cache whose entries live for `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            state: Mutex::new(CacheState {
                data: HashMap::new(),
                hits: 0,
                misses: 0,
            }),
            ttl,
        }
    }

    /// The TTL applied to every insert
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get a fresh value from the cache
    pub fn get(&self, key: &K) -> Option<V> {
        let mut state = self.state.lock();
        let fresh = match state.data.get(key) {
            Some(entry) if !entry.is_expired() => Some(entry.value.clone()),
            _ => None,
        };
        match fresh {
            Some(value) => {
                state.hits += 1;
                Some(value)
            }
            None => {
                state.misses += 1;
                None
            }
        }
    }

    /// Insert or supersede a value; expiry is recomputed from now
    pub fn insert(&self, key: K, value: V) {
        let entry = CacheEntry::new(value, self.ttl);
        self.state.lock().data.insert(key, entry);
    }

    /// Number of stored entries, stale ones included
    pub fn len(&self) -> usize {
        self.state.lock().data.len()
    }

    /// Check if cache is empty
    pub fn is_empty(&self) -> bool {
        self.state.lock().data.is_empty()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let state = self.state.lock();
        let total_requests = state.hits + state.misses;
        CacheStats {
            entries: state.data.len(),
            hits: state.hits,
            misses: state.misses,
            hit_rate: if total_requests > 0 {
                state.hits as f64 / total_requests as f64
            } else {
                0.0
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_ttl_cache_basic_operations() {
        let cache = TtlCache::new(Duration::from_secs(60));

        cache.insert("key1", "value1");
        assert_eq!(cache.get(&"key1"), Some("value1"));
        assert_eq!(cache.get(&"key2"), None);

        let stats = cache.stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert!((stats.hit_rate - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ttl_cache_expiration() {
        let cache = TtlCache::new(Duration::from_millis(10));

        cache.insert("key1", "value1");
        assert_eq!(cache.get(&"key1"), Some("value1"));

        thread::sleep(Duration::from_millis(20));

        // Stale entries read as misses but stay stored until superseded
        assert_eq!(cache.get(&"key1"), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_ttl_cache_insert_supersedes_stale_entry() {
        let cache = TtlCache::new(Duration::from_millis(10));

        cache.insert("key1", 1);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(cache.get(&"key1"), None);

        cache.insert("key1", 2);
        assert_eq!(cache.get(&"key1"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_entry_expiry_is_insertion_plus_ttl() {
        let before = Instant::now();
        let entry = CacheEntry::new((), Duration::from_secs(30));
        let after = Instant::now();

        assert!(entry.expires_at >= before + Duration::from_secs(30));
        assert!(entry.expires_at <= after + Duration::from_secs(30));
        assert!(!entry.is_expired());
        assert!(entry.ttl_remaining() <= Duration::from_secs(30));
    }
}
