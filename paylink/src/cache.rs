//! Injected TTL cache for collaborator lookups (resolved names, token
//! search results, token decimals).
//!
//! An explicit cache object passed by its owner into whatever needs
//! one; nothing here is global. Entries expire lazily on read.

use std::hash::Hash;
use std::time::{Duration, Instant};

use dashmap::DashMap;

/// A concurrent map whose entries expire after a fixed TTL.
///
/// The key bounds live on the struct because `DashMap`'s trait impls
/// (including `Debug`) require them.
#[derive(Debug)]
pub struct TtlCache<K: Eq + Hash, V> {
    entries: DashMap<K, (V, Instant)>,
    ttl: Duration,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    /// Creates a cache whose entries live for `ttl` after insertion.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Returns the cached value for `key` if it has not expired.
    /// Expired entries are removed on the way out.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) => {
                let (value, inserted_at) = entry.value();
                if inserted_at.elapsed() < self.ttl {
                    return Some(value.clone());
                }
                true
            }
            None => false,
        };
        if expired {
            self.entries.remove(key);
        }
        None
    }

    /// Inserts a value, resetting its TTL.
    pub fn insert(&self, key: K, value: V) {
        self.entries.insert(key, (value, Instant::now()));
    }

    /// Number of entries, including not-yet-evicted expired ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_returns_inserted_value() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("alice.eth".to_owned(), 1u64);
        assert_eq!(cache.get(&"alice.eth".to_owned()), Some(1));
        assert_eq!(cache.get(&"bob.eth".to_owned()), None);
    }

    #[test]
    fn test_entries_expire() {
        let cache = TtlCache::new(Duration::from_millis(10));
        cache.insert("alice.eth".to_owned(), 1u64);
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(cache.get(&"alice.eth".to_owned()), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_is_debug_formattable() {
        let cache: TtlCache<String, u64> = TtlCache::new(Duration::from_secs(1));
        cache.insert("alice.eth".to_owned(), 1);
        assert!(format!("{cache:?}").contains("TtlCache"));
    }

    #[test]
    fn test_insert_resets_ttl() {
        let cache = TtlCache::new(Duration::from_millis(50));
        cache.insert("alice.eth".to_owned(), 1u64);
        std::thread::sleep(Duration::from_millis(30));
        cache.insert("alice.eth".to_owned(), 2u64);
        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(cache.get(&"alice.eth".to_owned()), Some(2));
    }
}
