//! Mutex-guarded, lazily constructed LRU engine.
//!
//! [`SyncCache`] is what a namespace actually stores its values in. The
//! engine itself is only allocated on the first `get` or `add`, so namespaces
//! that are never read cost nothing beyond this wrapper.

use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{trace, warn};

use crate::byteview::ByteView;
use crate::lru::LruCache;
use crate::stats::CacheStats;

/// Thread-safe wrapper around [`LruCache<ByteView>`].
///
/// A single lock guards both the lazy construction of the engine and every
/// operation on it, so two callers can never race to build two engines.
/// All operations are linearizable with respect to each other.
#[derive(Debug)]
pub struct SyncCache {
    /// Capacity handed to the engine on construction (0 = unbounded).
    max_bytes: usize,

    /// `None` until first use.
    lru: Mutex<Option<LruCache<ByteView>>>,

    /// Shared with the owning namespace; evictions are counted here.
    stats: Arc<CacheStats>,
}

impl SyncCache {
    /// Create an empty cache. No engine is allocated yet.
    pub fn new(max_bytes: usize, stats: Arc<CacheStats>) -> Self {
        Self {
            max_bytes,
            lru: Mutex::new(None),
            stats,
        }
    }

    /// Look up a value, marking it as most recently used.
    ///
    /// Returns `None` on a miss, or if the lock is poisoned.
    pub fn get(&self, key: &str) -> Option<ByteView> {
        let mut guard = self.lock()?;
        let lru = guard.get_or_insert_with(|| self.new_engine());
        lru.get(key).cloned()
    }

    /// Store a value, evicting older entries as needed.
    ///
    /// Silently dropped if the lock is poisoned.
    pub fn add(&self, key: &str, value: ByteView) {
        let Some(mut guard) = self.lock() else {
            return;
        };
        let lru = guard.get_or_insert_with(|| self.new_engine());
        lru.add(key, value);
    }

    /// Number of cached entries (0 before first use).
    pub fn len(&self) -> usize {
        self.lock()
            .and_then(|guard| guard.as_ref().map(LruCache::len))
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Combined size of cached keys and values (0 before first use).
    pub fn bytes(&self) -> usize {
        self.lock()
            .and_then(|guard| guard.as_ref().map(LruCache::bytes))
            .unwrap_or(0)
    }

    /// Whether the engine has been constructed yet.
    pub fn is_initialized(&self) -> bool {
        self.lock().map_or(false, |guard| guard.is_some())
    }

    // Private helper methods

    /// Acquire the lock, returning None if poisoned.
    fn lock(&self) -> Option<MutexGuard<'_, Option<LruCache<ByteView>>>> {
        match self.lru.lock() {
            Ok(guard) => Some(guard),
            Err(_) => {
                warn!("cache lock poisoned, bypassing cache");
                None
            }
        }
    }

    fn new_engine(&self) -> LruCache<ByteView> {
        let stats = Arc::clone(&self.stats);
        LruCache::with_eviction_callback(self.max_bytes, move |key, value: ByteView| {
            stats.record_eviction();
            trace!(key = %key, bytes = value.len(), "evicted");
        })
    }
}
