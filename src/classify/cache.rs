//! A bounded, thread-safe LRU cache of classification results.
use super::category::ContentCategory;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Capacity of the process-wide shared cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

static SHARED_CACHE: Lazy<Arc<ClassificationCache>> =
    Lazy::new(|| Arc::new(ClassificationCache::new(DEFAULT_CACHE_CAPACITY)));

/// Maps normalized text to its category, evicting the least recently used
/// entry once `capacity` is exceeded.
///
/// Entries are kept in recency order inside an [`IndexMap`]: index 0 is the
/// least recently used, the last index the most recent. Every access takes
/// the lock, so concurrent readers and writers never observe a torn entry.
#[derive(Debug)]
pub struct ClassificationCache {
    entries: Mutex<IndexMap<String, ContentCategory>>,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

/// Counters describing cache effectiveness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub len: usize,
    pub capacity: usize,
}

impl ClassificationCache {
    /// Create an empty cache; a zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Mutex::new(IndexMap::with_capacity(capacity.min(DEFAULT_CACHE_CAPACITY) + 1)),
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// The process-wide cache shared by [`crate::classify::Classifier::shared`].
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED_CACHE)
    }

    /// Look up `key`, marking it most recently used on a hit.
    pub fn get(&self, key: &str) -> Option<ContentCategory> {
        let mut entries = self.entries.lock();
        let Some(index) = entries.get_index_of(key) else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            return None;
        };
        let last = entries.len() - 1;
        entries.move_index(index, last);
        self.hits.fetch_add(1, Ordering::Relaxed);
        entries.get_index(last).map(|(_, category)| *category)
    }

    /// Insert or refresh `key`, evicting the oldest entries past capacity.
    pub fn insert(&self, key: String, category: ContentCategory) {
        let mut entries = self.entries.lock();
        let (index, _) = entries.insert_full(key, category);
        let last = entries.len() - 1;
        entries.move_index(index, last);
        while entries.len() > self.capacity {
            entries.shift_remove_index(0);
        }
    }

    /// Whether `key` is cached, without touching its recency.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&self) {
        self.entries.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            len: self.len(),
            capacity: self.capacity,
        }
    }
}

impl Default for ClassificationCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
