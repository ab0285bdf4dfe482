//! Memoizing cache in front of a [`ContentClassifier`].
//!
//! ## Architecture
//!
//! ```text
//! classify(content) → lock → hit?  → stored result
//!                              ↓ miss
//!                        classifier.classify(content) → store → result
//! ```
//!
//! Entries are keyed by the exact content string, so `"AI"` and `"ai"` are
//! distinct entries even though they classify the same way. Once stored, an
//! entry is never updated.
//!
//! The lock is held while a miss is computed. Concurrent callers asking for
//! the same new content wait for the first computation and reuse its result,
//! so the classifier runs at most once per distinct content string while the
//! entry is resident.
//!
//! By default the cache is unbounded and grows with every distinct input for
//! the lifetime of the process. Long-running callers can opt into
//! least-recently-used eviction with [`CacheConfig::bounded`].

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::classifier::{ClassificationResult, ContentClassifier, KeywordClassifier};

/// Cache sizing configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of entries; `None` means unbounded.
    pub capacity: Option<NonZeroUsize>,
}

impl CacheConfig {
    /// Unbounded memoization (the default).
    pub fn unbounded() -> Self {
        Self { capacity: None }
    }

    /// Least-recently-used eviction once `capacity` entries are stored.
    pub fn bounded(capacity: NonZeroUsize) -> Self {
        Self {
            capacity: Some(capacity),
        }
    }

    /// Builds a config from an optional raw capacity; zero means unbounded.
    pub fn from_capacity(capacity: Option<usize>) -> Self {
        Self {
            capacity: capacity.and_then(NonZeroUsize::new),
        }
    }
}

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that ran the classifier.
    pub misses: u64,
    /// Entries currently stored.
    pub entries: usize,
    /// Configured capacity, if bounded.
    pub capacity: Option<usize>,
}

impl CacheStats {
    /// Total number of lookups.
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups answered from the cache.
    pub fn hit_rate(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            n => self.hits as f64 / n as f64,
        }
    }
}

type Entry = Arc<ClassificationResult>;

enum Store {
    Unbounded(HashMap<String, Entry>),
    Bounded(LruCache<String, Entry>),
}

impl Store {
    fn new(config: CacheConfig) -> Self {
        match config.capacity {
            Some(capacity) => Store::Bounded(LruCache::new(capacity)),
            None => Store::Unbounded(HashMap::new()),
        }
    }

    fn get(&mut self, content: &str) -> Option<Entry> {
        match self {
            Store::Unbounded(map) => map.get(content).cloned(),
            Store::Bounded(lru) => lru.get(content).cloned(),
        }
    }

    /// Inserts a new entry, returning the key evicted to make room.
    fn insert(&mut self, content: String, entry: Entry) -> Option<String> {
        match self {
            Store::Unbounded(map) => {
                map.insert(content, entry);
                None
            }
            Store::Bounded(lru) => lru.push(content, entry).map(|(evicted, _)| evicted),
        }
    }

    fn contains(&self, content: &str) -> bool {
        match self {
            Store::Unbounded(map) => map.contains_key(content),
            Store::Bounded(lru) => lru.contains(content),
        }
    }

    fn len(&self) -> usize {
        match self {
            Store::Unbounded(map) => map.len(),
            Store::Bounded(lru) => lru.len(),
        }
    }
}

/// Memoizing classification cache.
///
/// Owned by whichever component composes the engine and shared by reference
/// (or behind an `Arc`) with its callers.
pub struct ClassificationCache<C = KeywordClassifier> {
    classifier: C,
    entries: Mutex<Store>,
    config: CacheConfig,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<C> std::fmt::Debug for ClassificationCache<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassificationCache")
            .field("entries", &self.len())
            .field("capacity", &self.config.capacity)
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish()
    }
}

impl ClassificationCache<KeywordClassifier> {
    /// Creates an unbounded cache over the built-in keyword classifier.
    pub fn new() -> Self {
        Self::with_classifier(KeywordClassifier::new())
    }
}

impl Default for ClassificationCache<KeywordClassifier> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> ClassificationCache<C> {
    /// Creates an unbounded cache over the given classifier.
    pub fn with_classifier(classifier: C) -> Self {
        Self::with_config(classifier, CacheConfig::default())
    }

    /// Creates a cache with explicit sizing.
    pub fn with_config(classifier: C, config: CacheConfig) -> Self {
        Self {
            classifier,
            entries: Mutex::new(Store::new(config)),
            config,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the wrapped classifier.
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Returns the cache configuration.
    pub fn config(&self) -> CacheConfig {
        self.config
    }

    /// Returns true if a result for exactly this content is stored.
    ///
    /// Does not count as a lookup and does not refresh recency.
    pub fn contains(&self, content: &str) -> bool {
        self.entries.lock().contains(content)
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
            capacity: self.config.capacity.map(NonZeroUsize::get),
        }
    }
}

impl<C: ContentClassifier> ClassificationCache<C> {
    /// Returns the classification for `content`, computing it on first sight.
    ///
    /// Repeated calls with identical content return the stored result
    /// without invoking the classifier again.
    pub fn classify(&self, content: &str) -> Arc<ClassificationResult> {
        let mut entries = self.entries.lock();

        if let Some(hit) = entries.get(content) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(len = content.len(), "classification cache hit");
            return hit;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let result = Arc::new(self.classifier.classify(content));
        tracing::debug!(
            classifier = self.classifier.name(),
            category = %result.category,
            tags = result.tags.len(),
            "classification cache miss"
        );

        if let Some(evicted) = entries.insert(content.to_string(), Arc::clone(&result)) {
            tracing::debug!(evicted_len = evicted.len(), "evicted least recently used entry");
        }

        result
    }
}
