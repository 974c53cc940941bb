//! Integration tests for the namespace cache.

use namespace_cache::{
    get_namespace, new_namespace, ByteView, CacheConfig, CacheError, LoaderFn, LruCache,
    MapLoader, Namespace, Registry,
};
use std::collections::HashMap;
use std::error::Error as _;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};
use std::thread;

fn db() -> MapLoader {
    MapLoader::new()
        .with("Tom", "630")
        .with("Jack", "589")
        .with("Sam", "567")
}

#[test]
fn test_basic_workflow() {
    let scores = Namespace::new("scores", CacheConfig::new().max_bytes(2 << 10).build(), db());

    assert_eq!(scores.cached_len(), 0);

    let value = scores.get("Tom").unwrap();
    assert_eq!(value.as_bytes(), b"630");
    assert_eq!(scores.cached_len(), 1);
    assert_eq!(scores.cached_bytes(), "Tom".len() + "630".len());

    // Second read is a hit.
    assert_eq!(scores.get("Tom").unwrap(), value);
    let stats = scores.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.loads, 1);
    assert!((stats.hit_rate - 50.0).abs() < 0.01);
}

#[test]
fn test_loader_error_is_wrapped() {
    let scores = Namespace::new("scores", CacheConfig::default(), db());

    let err = scores.get("unknown").unwrap_err();
    match &err {
        CacheError::Loader { key, .. } => assert_eq!(key, "unknown"),
        other => panic!("expected loader error, got {:?}", other),
    }

    let source = err.source().expect("loader error keeps its source");
    assert!(matches!(
        source.downcast_ref::<CacheError>(),
        Some(CacheError::KeyNotFound(_))
    ));
}

#[test]
fn test_no_negative_caching() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let ns = Namespace::new(
        "always-failing",
        CacheConfig::default(),
        LoaderFn::new(move |key| {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(format!("{} not exist", key).into())
        }),
    );

    assert!(ns.get("x").is_err());
    assert!(ns.get("x").is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(ns.cached_len(), 0);
}

#[test]
fn test_empty_key_is_invalid() {
    let ns = Namespace::new("scores", CacheConfig::default(), db());
    assert!(matches!(ns.get(""), Err(CacheError::InvalidArgument(_))));
    assert_eq!(ns.stats().misses, 0);
}

#[test]
fn test_mutating_returned_bytes_does_not_leak() {
    let ns = Namespace::new("scores", CacheConfig::default(), db());

    let first = ns.get("Jack").unwrap();
    let mut copy = first.byte_slice();
    copy.clear();
    copy.extend_from_slice(b"tampered");

    assert_eq!(ns.get("Jack").unwrap().as_bytes(), b"589");
    assert_eq!(first.as_bytes(), b"589");
}

#[test]
fn test_lru_eviction_in_namespace() {
    // Each entry costs 6 bytes; two fit.
    let ns = Namespace::new("scores", CacheConfig::new().max_bytes(12).build(), db());

    ns.get("Tom").unwrap();
    ns.get("Jack").unwrap();
    ns.get("Tom").unwrap(); // Tom is now most recent
    ns.get("Sam").unwrap(); // evicts Jack

    let loads_before = ns.stats().loads;
    ns.get("Tom").unwrap();
    assert_eq!(ns.stats().loads, loads_before, "Tom should still be cached");

    ns.get("Jack").unwrap();
    assert_eq!(ns.stats().loads, loads_before + 1, "Jack should have been evicted");
    assert!(ns.cached_bytes() <= 12);
}

#[test]
fn test_engine_eviction_callback_sees_removed_entries() {
    let evicted = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&evicted);
    let mut lru = LruCache::with_eviction_callback(12, move |key, value: ByteView| {
        sink.lock().unwrap().push((key, value.to_string()));
    });

    lru.add("k1", ByteView::from("aaaa"));
    lru.add("k2", ByteView::from("bbbb"));
    lru.add("k3", ByteView::from("cccc"));

    assert!(lru.get("k1").is_none());
    assert!(lru.get("k2").is_some());
    assert!(lru.get("k3").is_some());
    assert_eq!(
        *evicted.lock().unwrap(),
        vec![("k1".to_string(), "aaaa".to_string())]
    );
}

#[test]
fn test_concurrent_reads() {
    let ns = Arc::new(Namespace::new("scores", CacheConfig::default(), db()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let ns = Arc::clone(&ns);
            thread::spawn(move || {
                for _ in 0..1000 {
                    for key in ["Tom", "Jack", "Sam"] {
                        assert!(ns.get(key).is_ok());
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let stats = ns.stats();
    assert_eq!(stats.gets, 8 * 1000 * 3);
    assert_eq!(stats.hits + stats.misses, stats.gets);
    assert_eq!(ns.cached_len(), 3);
}

#[test]
fn test_concurrent_misses_are_not_coalesced() {
    const THREADS: usize = 4;

    let calls = Arc::new(AtomicUsize::new(0));
    let gate = Arc::new(Barrier::new(THREADS));
    let (counter, loader_gate) = (Arc::clone(&calls), Arc::clone(&gate));
    let ns = Arc::new(Namespace::new(
        "slow",
        CacheConfig::default(),
        LoaderFn::new(move |key| {
            counter.fetch_add(1, Ordering::SeqCst);
            // Hold every loader until all threads are inside one.
            loader_gate.wait();
            Ok(key.as_bytes().to_vec())
        }),
    ));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let ns = Arc::clone(&ns);
            thread::spawn(move || ns.get("same").unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().as_bytes(), b"same");
    }

    assert_eq!(calls.load(Ordering::SeqCst), THREADS);
    assert_eq!(ns.cached_len(), 1);
}

#[test]
fn test_concurrent_loads_distinct_keys() {
    let seen = Arc::new(Mutex::new(HashMap::<String, usize>::new()));
    let sink = Arc::clone(&seen);
    let ns = Arc::new(Namespace::new(
        "echo",
        CacheConfig::new().max_bytes(1 << 20).build(),
        LoaderFn::new(move |key| {
            *sink.lock().unwrap().entry(key.to_string()).or_default() += 1;
            Ok(key.as_bytes().to_vec())
        }),
    ));

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let ns = Arc::clone(&ns);
            thread::spawn(move || {
                for i in 0..100 {
                    let key = format!("thread_{}_key_{}", t, i);
                    assert_eq!(ns.get(&key).unwrap().as_bytes(), key.as_bytes());
                    assert_eq!(ns.get(&key).unwrap().as_bytes(), key.as_bytes());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert_eq!(ns.cached_len(), 800);
    assert!(seen.lock().unwrap().values().all(|&n| n == 1));
}

#[test]
fn test_registry_is_independent_of_global() {
    let registry = Registry::new();
    let scores = registry
        .create("scores", CacheConfig::default(), db())
        .unwrap();

    assert_eq!(scores.get("Sam").unwrap().to_string(), "567");
    let again = registry.lookup("scores").unwrap();
    assert_eq!(again.stats().loads, 1);
}

#[test]
fn test_global_registry() {
    let name = "integration-global-scores";
    let created = new_namespace(name, CacheConfig::default(), db()).unwrap();

    let found = get_namespace(name).expect("registered globally");
    assert!(Arc::ptr_eq(&created, &found));
    assert!(matches!(
        new_namespace(name, CacheConfig::default(), db()),
        Err(CacheError::NamespaceExists(_))
    ));
    assert!(get_namespace("integration-missing").is_none());
}
