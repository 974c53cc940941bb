//! Byte-bounded least-recently-used engine.
//!
//! [`LruCache`] tracks the combined size of every key and value it holds and
//! evicts from the least-recently-used end whenever that total exceeds the
//! configured maximum. A maximum of `0` means the engine is unbounded.
//!
//! The engine does no locking of its own. Concurrent callers go through
//! [`SyncCache`](crate::SyncCache), which serializes access.
//!
//! Entries live in an arena (`Vec`) and are linked by index into a doubly
//! linked list, head = most recently used, tail = least recently used.
//! A `HashMap` maps keys to arena indices, so `get`, `add` and
//! `remove_oldest` are all O(1). Vacated slots are recycled via a free list.

use bytes::Bytes;
use std::collections::HashMap;
use std::fmt;

use crate::entry::{Entry, NIL};

/// A value that can report its own size in bytes.
///
/// Size accounting only needs this one capability, so values of different
/// types can share the same eviction policy.
pub trait Value {
    /// Size of the value in bytes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Value for String {
    fn len(&self) -> usize {
        String::len(self)
    }
}

impl Value for Vec<u8> {
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl Value for Bytes {
    fn len(&self) -> usize {
        Bytes::len(self)
    }
}

/// Hook invoked with every evicted key and value.
pub type EvictionCallback<V> = Box<dyn FnMut(String, V) + Send>;

/// A byte-bounded LRU cache. Not safe for concurrent access.
///
/// # Example
/// ```
/// use namespace_cache::LruCache;
///
/// // Each entry below costs len(key) + len(value) = 4 bytes.
/// let mut lru = LruCache::new(8);
/// lru.add("k1", "v1".to_string());
/// lru.add("k2", "v2".to_string());
/// lru.add("k3", "v3".to_string()); // evicts k1
///
/// assert!(lru.get("k1").is_none());
/// assert_eq!(lru.get("k3").map(String::as_str), Some("v3"));
/// assert_eq!(lru.len(), 2);
/// ```
pub struct LruCache<V> {
    /// Maximum combined size of keys and values. `0` means unbounded.
    max_bytes: usize,

    /// Combined size of keys and values currently held.
    nbytes: usize,

    /// Key -> arena index.
    map: HashMap<String, usize>,

    /// Arena of entries, linked by index.
    slots: Vec<Entry<V>>,

    /// Indices of vacant slots.
    free: Vec<usize>,

    /// Most recently used entry.
    head: usize,

    /// Least recently used entry.
    tail: usize,

    on_evicted: Option<EvictionCallback<V>>,
}

impl<V: Value> LruCache<V> {
    /// Create an engine holding at most `max_bytes` (0 = unbounded).
    pub fn new(max_bytes: usize) -> Self {
        Self {
            max_bytes,
            nbytes: 0,
            map: HashMap::new(),
            slots: Vec::new(),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
            on_evicted: None,
        }
    }

    /// Create an engine that reports every eviction to `on_evicted`.
    ///
    /// The callback runs after the entry has been fully removed.
    pub fn with_eviction_callback<F>(max_bytes: usize, on_evicted: F) -> Self
    where
        F: FnMut(String, V) + Send + 'static,
    {
        let mut lru = Self::new(max_bytes);
        lru.on_evicted = Some(Box::new(on_evicted));
        lru
    }

    /// Look up a key, marking it as most recently used.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let idx = *self.map.get(key)?;
        self.move_to_front(idx);
        self.slots[idx].value.as_ref()
    }

    /// Insert or replace a value, then evict until back under capacity.
    ///
    /// Replacing a value only charges the size difference; the key is
    /// already accounted for.
    pub fn add(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        let added = value.len();

        if let Some(idx) = self.map.get(&key).copied() {
            self.move_to_front(idx);
            let slot = &mut self.slots[idx];
            let replaced = slot.value.as_ref().map_or(0, Value::len);
            slot.value = Some(value);
            self.nbytes = self.nbytes + added - replaced;
        } else {
            self.nbytes += key.len() + added;
            let idx = self.alloc(Entry::new(key.clone(), value));
            self.map.insert(key, idx);
            self.push_front(idx);
        }

        // A single large insert can push out more than one entry.
        while self.max_bytes != 0 && self.nbytes > self.max_bytes {
            self.remove_oldest();
        }
    }

    /// Remove the least recently used entry. No-op when empty.
    pub fn remove_oldest(&mut self) {
        let idx = self.tail;
        if idx == NIL {
            return;
        }

        self.unlink(idx);
        let Some((key, value)) = self.slots[idx].take() else {
            return;
        };
        self.free.push(idx);
        self.map.remove(&key);
        self.nbytes -= key.len() + value.len();

        if let Some(on_evicted) = self.on_evicted.as_mut() {
            on_evicted(key, value);
        }
    }

    /// Whether `key` is present. Does not touch recency.
    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Combined size of all keys and values currently held.
    pub fn bytes(&self) -> usize {
        self.nbytes
    }

    /// Configured capacity in bytes (0 = unbounded).
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Iterate from most to least recently used. Does not touch recency.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let entry = self.slots.get(cursor)?;
            cursor = entry.next;
            Some((entry.key.as_str(), entry.value.as_ref()?))
        })
    }

    fn alloc(&mut self, entry: Entry<V>) -> usize {
        match self.free.pop() {
            Some(idx) => {
                debug_assert!(self.slots[idx].is_vacant());
                self.slots[idx] = entry;
                idx
            }
            None => {
                self.slots.push(entry);
                self.slots.len() - 1
            }
        }
    }

    fn move_to_front(&mut self, idx: usize) {
        if self.head != idx {
            self.unlink(idx);
            self.push_front(idx);
        }
    }

    fn push_front(&mut self, idx: usize) {
        let old_head = self.head;
        self.slots[idx].prev = NIL;
        self.slots[idx].next = old_head;
        if old_head == NIL {
            self.tail = idx;
        } else {
            self.slots[old_head].prev = idx;
        }
        self.head = idx;
    }

    fn unlink(&mut self, idx: usize) {
        let prev = self.slots[idx].prev;
        let next = self.slots[idx].next;

        if prev == NIL {
            self.head = next;
        } else {
            self.slots[prev].next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.slots[next].prev = prev;
        }

        self.slots[idx].prev = NIL;
        self.slots[idx].next = NIL;
    }
}

impl<V> fmt::Debug for LruCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("max_bytes", &self.max_bytes)
            .field("nbytes", &self.nbytes)
            .field("len", &self.map.len())
            .field("on_evicted", &self.on_evicted.is_some())
            .finish()
    }
}
