//! Statistics for a namespace.
//!
//! This module provides atomic counters for tracking lookups, loads and
//! evictions, enabling observability without taking the cache lock.

use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics for a namespace and its cache.
///
/// All counters are atomic and can be safely updated from multiple threads.
/// Use `Namespace::stats()` to get a snapshot of the current values.
#[derive(Debug, Default)]
pub struct CacheStats {
    /// Number of `get` calls with a valid key.
    gets: AtomicU64,

    /// Number of lookups served from the cache.
    hits: AtomicU64,

    /// Number of lookups that had to go to the loader.
    misses: AtomicU64,

    /// Number of successful loader calls.
    loads: AtomicU64,

    /// Number of failed loader calls.
    load_errors: AtomicU64,

    /// Number of entries evicted due to byte capacity.
    evictions: AtomicU64,
}

impl CacheStats {
    /// Create a new stats instance with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_get(&self) {
        self.gets.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_load(&self) {
        self.loads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_load_error(&self) {
        self.load_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    // Getters for reading statistics

    pub fn gets(&self) -> u64 {
        self.gets.load(Ordering::Relaxed)
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn loads(&self) -> u64 {
        self.loads.load(Ordering::Relaxed)
    }

    pub fn load_errors(&self) -> u64 {
        self.load_errors.load(Ordering::Relaxed)
    }

    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }

    /// Calculate the hit rate as a percentage (0.0 to 100.0).
    /// Returns 0.0 if no lookups have been performed.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            (hits as f64 / total as f64) * 100.0
        }
    }

    /// Create a snapshot of the current statistics.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            gets: self.gets(),
            hits: self.hits(),
            misses: self.misses(),
            loads: self.loads(),
            load_errors: self.load_errors(),
            evictions: self.evictions(),
            hit_rate: self.hit_rate(),
        }
    }
}

/// A point-in-time snapshot of namespace statistics.
///
/// Unlike `CacheStats`, this struct contains plain values (not atomics)
/// and can be easily compared or logged.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSnapshot {
    pub gets: u64,
    pub hits: u64,
    pub misses: u64,
    pub loads: u64,
    pub load_errors: u64,
    pub evictions: u64,
    pub hit_rate: f64,
}
