//! Source-of-truth loaders for namespaces.
//!
//! A [`Loader`] is asked for a key's bytes whenever a namespace misses. Any
//! type can act as one; [`LoaderFn`] adapts a plain closure and [`MapLoader`]
//! serves a fixed map, which is handy in tests and examples.

use std::collections::HashMap;

use crate::error::{BoxError, CacheError};

/// Fetches the bytes for a key, or fails.
///
/// Loaders are shared by every thread that reads the namespace, and the
/// namespace never holds a lock while calling one.
pub trait Loader: Send + Sync {
    /// Produce the value for `key`. The returned buffer is handed over to the
    /// cache; the loader keeps no access to it.
    fn load(&self, key: &str) -> Result<Vec<u8>, BoxError>;
}

/// Adapts a closure into a [`Loader`].
///
/// ```
/// use namespace_cache::{Loader, LoaderFn};
///
/// let loader = LoaderFn::new(|key| Ok(key.as_bytes().to_vec()));
/// assert_eq!(loader.load("key").unwrap(), b"key".to_vec());
/// ```
pub struct LoaderFn<F>(F);

impl<F> LoaderFn<F> {
    pub fn new(f: F) -> Self
    where
        F: Fn(&str) -> Result<Vec<u8>, BoxError> + Send + Sync,
    {
        Self(f)
    }
}

impl<F> Loader for LoaderFn<F>
where
    F: Fn(&str) -> Result<Vec<u8>, BoxError> + Send + Sync,
{
    fn load(&self, key: &str) -> Result<Vec<u8>, BoxError> {
        (self.0)(key)
    }
}

impl<F> std::fmt::Debug for LoaderFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("LoaderFn")
    }
}

/// Serves values from a fixed map; unknown keys fail with
/// [`CacheError::KeyNotFound`].
#[derive(Debug, Clone, Default)]
pub struct MapLoader {
    values: HashMap<String, Vec<u8>>,
}

impl MapLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for MapLoader
where
    K: Into<String>,
    V: Into<Vec<u8>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Loader for MapLoader {
    fn load(&self, key: &str) -> Result<Vec<u8>, BoxError> {
        self.values
            .get(key)
            .cloned()
            .ok_or_else(|| CacheError::KeyNotFound(key.to_string()).into())
    }
}
