//! Configuration for a namespace's cache.
//!
//! This module provides a builder for the byte capacity that bounds a
//! namespace's LRU engine.

/// Configuration for creating a new namespace.
///
/// Use the builder pattern to construct configuration:
///
/// ```
/// use namespace_cache::CacheConfig;
///
/// let config = CacheConfig::new()
///     .max_bytes(2 << 10)
///     .build();
/// assert_eq!(config.get_max_bytes(), Some(2048));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum combined size of keys and values, in bytes.
    /// When exceeded, least recently used entries are evicted.
    /// `None` means unbounded.
    pub(crate) max_bytes: Option<usize>,
}

impl CacheConfig {
    /// Create a new configuration builder with default values (unbounded).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the byte capacity of the cache.
    ///
    /// # Arguments
    /// * `bytes` - Maximum combined key and value size. Use 0 for unbounded.
    pub fn max_bytes(mut self, bytes: usize) -> Self {
        self.max_bytes = if bytes == 0 { None } else { Some(bytes) };
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> Self {
        self
    }

    /// Get the byte capacity, if bounded.
    pub fn get_max_bytes(&self) -> Option<usize> {
        self.max_bytes
    }

    /// Capacity in the engine's encoding, where 0 means unbounded.
    pub(crate) fn engine_max_bytes(&self) -> usize {
        self.max_bytes.unwrap_or(0)
    }
}
