//! Arena slot for the LRU engine.

/// Link value marking the end of the recency list.
pub(crate) const NIL: usize = usize::MAX;

/// A single slot in the engine's arena.
///
/// Slots are linked by index into a doubly linked list ordered by recency.
/// A vacant slot (on the free list) has an empty key and no value.
#[derive(Debug)]
pub(crate) struct Entry<V> {
    /// The key, duplicated from the engine's lookup map.
    pub(crate) key: String,

    /// The stored value. `None` only while the slot is vacant.
    pub(crate) value: Option<V>,

    /// Neighbour closer to the most-recently-used end.
    pub(crate) prev: usize,

    /// Neighbour closer to the least-recently-used end.
    pub(crate) next: usize,
}

impl<V> Entry<V> {
    /// Create an unlinked, occupied slot.
    pub(crate) fn new(key: String, value: V) -> Self {
        Self {
            key,
            value: Some(value),
            prev: NIL,
            next: NIL,
        }
    }

    /// Vacate the slot, returning what it held.
    pub(crate) fn take(&mut self) -> Option<(String, V)> {
        let value = self.value.take()?;
        let key = std::mem::take(&mut self.key);
        self.prev = NIL;
        self.next = NIL;
        Some((key, value))
    }

    pub(crate) fn is_vacant(&self) -> bool {
        self.value.is_none()
    }
}
