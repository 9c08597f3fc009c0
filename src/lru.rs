//! Fixed-capacity LRU counter.
//!
//! Tracks how often text fingerprints have been seen during extraction.
//! When the cache is full, the least-recently-used entry is evicted. Both
//! reads and writes refresh recency.

use std::collections::HashMap;

/// LRU mapping from key to occurrence count.
///
/// Recency is tracked with a monotonic stamp per entry; eviction scans for
/// the minimum stamp. With the default capacity of 4096 the scan cost is
/// negligible next to parsing cost.
#[derive(Debug)]
pub struct LruCache {
    capacity: usize,
    clock: u64,
    entries: HashMap<String, (usize, u64)>,
}

impl LruCache {
    /// Create a cache holding at most `capacity` entries.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            clock: 0,
            entries: HashMap::with_capacity(capacity.min(4096)),
        }
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    /// Get the count for `key`, refreshing its recency.
    pub fn get(&mut self, key: &str) -> Option<usize> {
        let stamp = self.tick();
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.1 = stamp;
                Some(entry.0)
            }
            None => None,
        }
    }

    /// Insert or overwrite the count for `key`, evicting the least-recently
    /// used entry when at capacity.
    pub fn put(&mut self, key: &str, value: usize) {
        let stamp = self.tick();
        if let Some(entry) = self.entries.get_mut(key) {
            *entry = (value, stamp);
            return;
        }
        if self.entries.len() >= self.capacity {
            self.evict_oldest();
        }
        self.entries.insert(key.to_string(), (value, stamp));
    }

    /// Increment the count for `key` and return the new value.
    pub fn increment(&mut self, key: &str) -> usize {
        let current = self.get(key).unwrap_or(0);
        let next = current + 1;
        self.put(key, next);
        next
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, (_, stamp))| *stamp)
            .map(|(k, _)| k.clone());
        if let Some(key) = oldest {
            self.entries.remove(&key);
        }
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entry is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.clock = 0;
    }
}
