use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// One dataset entry associated with a lookup key.
///
/// Fields are interned handles; equal strings across the dataset share one
/// allocation.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Location code used by downstream services.
    pub code: Arc<str>,
    /// Display name of the place.
    pub name: Arc<str>,
    /// Parent region name; empty when the dataset row carried no third field.
    pub parent: Arc<str>,
}

/// Externally visible result of a region lookup, derived from exactly one
/// chosen [`Candidate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionMatch {
    pub code: String,
    pub name: String,
    pub province: String,
}
