//! Loader-backed cache namespaces.
//!
//! A [`Namespace`] pairs a name with a [`Loader`] and a [`SyncCache`]. Reads
//! that miss the cache fall through to the loader, and successful loads are
//! stored before being returned.
//!
//! Concurrent misses on the same key are not coalesced: each caller invokes
//! the loader independently and the last one to finish wins the cache slot.

use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::byteview::ByteView;
use crate::cache::SyncCache;
use crate::config::CacheConfig;
use crate::error::{CacheError, CacheResult};
use crate::loader::Loader;
use crate::stats::{CacheStats, StatsSnapshot};

/// A named cache domain with its own loader and storage.
///
/// # Example
/// ```
/// use namespace_cache::{CacheConfig, MapLoader, Namespace};
///
/// let scores = Namespace::new(
///     "scores",
///     CacheConfig::new().max_bytes(2 << 10).build(),
///     MapLoader::new().with("Tom", "630"),
/// );
///
/// let value = scores.get("Tom").unwrap();
/// assert_eq!(value.to_string(), "630");
/// assert!(scores.get("Sam").is_err());
/// ```
pub struct Namespace {
    name: String,
    loader: Box<dyn Loader>,
    main_cache: SyncCache,
    stats: Arc<CacheStats>,
}

impl Namespace {
    /// Create a namespace. Its cache is not allocated until first use.
    pub fn new(
        name: impl Into<String>,
        config: CacheConfig,
        loader: impl Loader + 'static,
    ) -> Self {
        let stats = Arc::new(CacheStats::new());
        Self {
            name: name.into(),
            loader: Box::new(loader),
            main_cache: SyncCache::new(config.engine_max_bytes(), Arc::clone(&stats)),
            stats,
        }
    }

    /// The namespace's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the value for `key`, loading and caching it on a miss.
    ///
    /// # Errors
    /// * [`CacheError::InvalidArgument`] if `key` is empty. Nothing is touched.
    /// * [`CacheError::Loader`] if the loader fails. Nothing is cached, so the
    ///   next call retries the loader.
    pub fn get(&self, key: &str) -> CacheResult<ByteView> {
        if key.is_empty() {
            return Err(CacheError::InvalidArgument("key is required".to_string()));
        }
        self.stats.record_get();

        if let Some(value) = self.main_cache.get(key) {
            self.stats.record_hit();
            debug!(namespace = %self.name, key, "cache hit");
            return Ok(value);
        }

        self.stats.record_miss();
        self.load(key)
    }

    /// Get a snapshot of the namespace statistics.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Number of cached entries.
    pub fn cached_len(&self) -> usize {
        self.main_cache.len()
    }

    /// Combined size of cached keys and values.
    pub fn cached_bytes(&self) -> usize {
        self.main_cache.bytes()
    }

    // Only the local path exists; there are no peers to ask first.
    fn load(&self, key: &str) -> CacheResult<ByteView> {
        self.get_locally(key)
    }

    fn get_locally(&self, key: &str) -> CacheResult<ByteView> {
        // No lock is held here; slow loaders only block their own caller.
        let bytes = match self.loader.load(key) {
            Ok(bytes) => bytes,
            Err(err) => {
                self.stats.record_load_error();
                warn!(namespace = %self.name, key, error = %err, "loader failed");
                return Err(CacheError::loader(key, err));
            }
        };
        self.stats.record_load();

        let value = ByteView::new(bytes);
        debug!(namespace = %self.name, key, bytes = value.len(), "loaded");
        self.populate_cache(key, value.clone());
        Ok(value)
    }

    fn populate_cache(&self, key: &str, value: ByteView) {
        self.main_cache.add(key, value);
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("name", &self.name)
            .field("main_cache", &self.main_cache)
            .finish_non_exhaustive()
    }
}
