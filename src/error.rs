//! Error types for the namespace cache.
//!
//! Lookups fail for two reasons only: the caller passed an empty key, or the
//! namespace's loader could not produce a value. The remaining variants belong
//! to the registry and the bundled map loader.

use thiserror::Error;

/// Opaque error reported by a [`Loader`](crate::Loader).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The argument was rejected before touching the cache (e.g. an empty key).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The loader failed for `key`. The cache was left unchanged.
    #[error("loader failed for key '{key}': {source}")]
    Loader {
        key: String,
        #[source]
        source: BoxError,
    },

    /// The requested key does not exist in the source of truth.
    #[error("key not found: '{0}'")]
    KeyNotFound(String),

    /// A namespace with this name is already registered.
    #[error("namespace already registered: '{0}'")]
    NamespaceExists(String),

    /// A lock could not be acquired (poisoned).
    #[error("lock error: {0}")]
    LockError(String),
}

impl CacheError {
    /// Wrap a loader failure for `key`.
    pub fn loader(key: impl Into<String>, source: impl Into<BoxError>) -> Self {
        CacheError::Loader {
            key: key.into(),
            source: source.into(),
        }
    }
}

/// A specialized Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;
