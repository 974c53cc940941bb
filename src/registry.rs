//! Name -> namespace registry.
//!
//! A [`Registry`] hands out shared [`Namespace`] handles by name. Most
//! programs use the process-wide instance through [`new_namespace`] and
//! [`get_namespace`]; tests and embedders can build their own.

use indexmap::IndexMap;
use std::sync::{Arc, OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::info;

use crate::config::CacheConfig;
use crate::error::{CacheError, CacheResult};
use crate::loader::Loader;
use crate::namespace::Namespace;

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// A set of uniquely named namespaces.
#[derive(Debug, Default)]
pub struct Registry {
    /// Registration order is preserved for `names()`.
    namespaces: RwLock<IndexMap<String, Arc<Namespace>>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry, created empty on first access.
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(Registry::new)
    }

    /// Register a namespace under its own name.
    ///
    /// # Errors
    /// [`CacheError::NamespaceExists`] if the name is taken.
    pub fn register(&self, namespace: Namespace) -> CacheResult<Arc<Namespace>> {
        let mut namespaces = self.write_lock()?;

        if namespaces.contains_key(namespace.name()) {
            return Err(CacheError::NamespaceExists(namespace.name().to_string()));
        }

        let namespace = Arc::new(namespace);
        namespaces.insert(namespace.name().to_string(), Arc::clone(&namespace));
        info!(namespace = %namespace.name(), "namespace registered");
        Ok(namespace)
    }

    /// Build a namespace and register it.
    pub fn create(
        &self,
        name: impl Into<String>,
        config: CacheConfig,
        loader: impl Loader + 'static,
    ) -> CacheResult<Arc<Namespace>> {
        self.register(Namespace::new(name, config, loader))
    }

    /// Look up a namespace by name.
    pub fn lookup(&self, name: &str) -> Option<Arc<Namespace>> {
        self.read_lock().ok()?.get(name).cloned()
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> Vec<String> {
        self.read_lock()
            .map(|namespaces| namespaces.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.read_lock().map_or(0, |namespaces| namespaces.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_lock(&self) -> CacheResult<RwLockReadGuard<'_, IndexMap<String, Arc<Namespace>>>> {
        self.namespaces
            .read()
            .map_err(|_| CacheError::LockError("namespace registry poisoned".to_string()))
    }

    fn write_lock(&self) -> CacheResult<RwLockWriteGuard<'_, IndexMap<String, Arc<Namespace>>>> {
        self.namespaces
            .write()
            .map_err(|_| CacheError::LockError("namespace registry poisoned".to_string()))
    }
}

/// Create a namespace in the process-wide registry.
pub fn new_namespace(
    name: impl Into<String>,
    config: CacheConfig,
    loader: impl Loader + 'static,
) -> CacheResult<Arc<Namespace>> {
    Registry::global().create(name, config, loader)
}

/// Look up a namespace in the process-wide registry.
pub fn get_namespace(name: &str) -> Option<Arc<Namespace>> {
    Registry::global().lookup(name)
}
