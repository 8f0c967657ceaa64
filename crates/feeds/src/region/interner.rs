//! String interning for the region dataset.
//!
//! The dataset is large and highly repetitive (many districts share one
//! provincial name), so every key and candidate field is deduplicated at
//! load time and handed out as a shared `Arc<str>` handle.

use std::sync::Arc;

use dashmap::DashMap;

/// Append-only string interner backed by a concurrent map.
///
/// Safe for concurrent reads and inserts; interning an already-known string
/// is idempotent and returns the existing handle.
#[derive(Debug, Default)]
pub struct StringInterner {
    strings: DashMap<Arc<str>, ()>,
}

impl StringInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the canonical handle for `s`, inserting it on first sight.
    pub fn intern(&self, s: &str) -> Arc<str> {
        if let Some(entry) = self.strings.get(s) {
            return entry.key().clone();
        }
        let handle: Arc<str> = Arc::from(s);
        self.strings.insert(handle.clone(), ());
        handle
    }

    /// Number of distinct interned strings.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
