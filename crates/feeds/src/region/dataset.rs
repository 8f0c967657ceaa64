//! Keyed reference dataset of region candidates.
//!
//! Built once from the upstream JSON shape (`place name → rows of 2–3
//! strings`) and then shared read-only behind an `Arc`; lookups never lock.

use std::collections::HashMap;
use std::sync::Arc;

use log::warn;

use super::interner::StringInterner;
use super::suffix::strip_admin_suffix;
use crate::models::Candidate;

/// Raw wire shape of the dataset.
pub(crate) type RawDataset = HashMap<String, Vec<Vec<String>>>;

/// Immutable mapping from place names to candidate lists.
///
/// Every key maps to a non-empty list; rows that cannot produce a candidate
/// are dropped at build time.
#[derive(Debug, Default)]
pub struct RegionDataset {
    entries: HashMap<Arc<str>, Vec<Candidate>>,
}

impl RegionDataset {
    /// Build a dataset from the wire shape, interning every string.
    ///
    /// Rows with fewer than two fields are skipped with a warning; a missing
    /// third field becomes an empty parent.
    pub(crate) fn from_raw(raw: RawDataset, interner: &StringInterner) -> Self {
        let mut entries = HashMap::with_capacity(raw.len());

        for (key, rows) in raw {
            let mut candidates = Vec::with_capacity(rows.len());
            for row in &rows {
                let (code, name) = match (row.first(), row.get(1)) {
                    (Some(code), Some(name)) => (code, name),
                    _ => {
                        warn!("Skipping malformed dataset row under '{}': {:?}", key, row);
                        continue;
                    }
                };
                candidates.push(Candidate {
                    code: interner.intern(code),
                    name: interner.intern(name),
                    parent: interner.intern(row.get(2).map(String::as_str).unwrap_or("")),
                });
            }

            if candidates.is_empty() {
                continue;
            }
            entries.insert(interner.intern(&key), candidates);
        }

        Self { entries }
    }

    /// Direct keyed access, no suffix fallback.
    pub fn candidates(&self, key: &str) -> Option<&[Candidate]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Keyed lookup with a single suffix-stripping retry.
    ///
    /// The verbatim key always wins; stripping only runs on a miss.
    pub fn lookup(&self, key: &str) -> Option<&[Candidate]> {
        if let Some(found) = self.candidates(key) {
            return Some(found);
        }
        let stripped = strip_admin_suffix(key);
        if stripped == key {
            return None;
        }
        self.candidates(stripped)
    }

    /// Number of lookup keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
