//! Read-only view over cached bytes.

use bytes::Bytes;
use std::fmt;

use crate::lru::Value;

/// An immutable snapshot of a cached value.
///
/// The payload is never mutated after construction. Cloning a `ByteView` is
/// cheap (the buffer is reference counted), and every accessor that hands out
/// owned bytes returns a fresh copy, so callers cannot corrupt what the cache
/// later returns to someone else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ByteView {
    b: Bytes,
}

impl ByteView {
    /// Take ownership of `bytes` as a new view.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { b: Bytes::from(bytes) }
    }

    /// Copy `bytes` into a new view.
    pub fn copy_from_slice(bytes: &[u8]) -> Self {
        Self {
            b: Bytes::copy_from_slice(bytes),
        }
    }

    /// Length of the payload in bytes.
    pub fn len(&self) -> usize {
        self.b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.b.is_empty()
    }

    /// Return a copy of the payload.
    pub fn byte_slice(&self) -> Vec<u8> {
        self.b.to_vec()
    }

    /// Borrow the payload read-only.
    pub fn as_bytes(&self) -> &[u8] {
        &self.b
    }
}

impl Value for ByteView {
    fn len(&self) -> usize {
        self.b.len()
    }
}

impl From<Vec<u8>> for ByteView {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for ByteView {
    fn from(bytes: &[u8]) -> Self {
        Self::copy_from_slice(bytes)
    }
}

impl From<&str> for ByteView {
    fn from(s: &str) -> Self {
        Self::copy_from_slice(s.as_bytes())
    }
}

impl From<String> for ByteView {
    fn from(s: String) -> Self {
        Self::new(s.into_bytes())
    }
}

impl AsRef<[u8]> for ByteView {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Lossy UTF-8 rendering of the payload.
impl fmt::Display for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.b))
    }
}
