//! # Namespace Cache
//!
//! An in-process, byte-bounded key-value cache with least-recently-used
//! eviction, organised into named namespaces that load missing values through
//! a caller-supplied [`Loader`].
//!
//! ## Features
//!
//! - **Byte-bounded LRU**: capacity is measured in key + value bytes; the
//!   least recently used entries are evicted once it is exceeded
//! - **Loader-backed namespaces**: a miss calls the loader, caches the result
//!   and returns it
//! - **Immutable values**: cached bytes are handed out as [`ByteView`]s that
//!   cannot be used to alter what the cache holds
//! - **Thread-safe**: namespaces can be shared freely across threads
//! - **Zero unsafe code**: Built entirely with safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use namespace_cache::{CacheConfig, LoaderFn, Namespace};
//!
//! let scores = Namespace::new(
//!     "scores",
//!     CacheConfig::new().max_bytes(2 << 10).build(),
//!     LoaderFn::new(|key| match key {
//!         "Tom" => Ok(b"630".to_vec()),
//!         _ => Err(format!("{} not exist", key).into()),
//!     }),
//! );
//!
//! // First call goes to the loader, the second is served from the cache.
//! assert_eq!(scores.get("Tom").unwrap().to_string(), "630");
//! assert_eq!(scores.get("Tom").unwrap().to_string(), "630");
//! assert_eq!(scores.stats().loads, 1);
//!
//! assert!(scores.get("Sam").is_err());
//! ```
//!
//! ## Thread Safety
//!
//! Each namespace guards its cache with a single mutex that is never held
//! while the loader runs. Concurrent misses on the same key are not
//! coalesced; each caller runs the loader and the last result stored wins.
//!
//! ```rust
//! use namespace_cache::{CacheConfig, MapLoader, Namespace};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let ns = Arc::new(Namespace::new(
//!     "scores",
//!     CacheConfig::default(),
//!     MapLoader::new().with("Tom", "630"),
//! ));
//!
//! let handles: Vec<_> = (0..4).map(|_| {
//!     let ns = Arc::clone(&ns);
//!     thread::spawn(move || ns.get("Tom").unwrap())
//! }).collect();
//!
//! for handle in handles {
//!     assert_eq!(handle.join().unwrap().as_bytes(), b"630");
//! }
//! ```

pub mod byteview;
pub mod cache;
pub mod config;
pub mod error;
pub mod loader;
pub mod lru;
pub mod namespace;
pub mod registry;
pub mod stats;

pub use byteview::ByteView;
pub use cache::SyncCache;
pub use config::CacheConfig;
pub use error::{BoxError, CacheError, CacheResult};
pub use loader::{Loader, LoaderFn, MapLoader};
pub use lru::{EvictionCallback, LruCache, Value};
pub use namespace::Namespace;
pub use registry::{get_namespace, new_namespace, Registry};
pub use stats::{CacheStats, StatsSnapshot};

// Internal modules - not part of public API
pub(crate) mod entry;
