//! Shared document cache.

use std::sync::{Arc, PoisonError, RwLock};

use ahash::AHashMap;
use sheetdb_core::Document;

use crate::provider::ProviderFailure;

/// Outcome of one completed fetch, as stored in the cache.
///
/// Success entries share the document behind an `Arc`: a cache replacement
/// swaps the slot without touching documents readers already hold.
pub type CacheEntry = Result<Arc<Document>, ProviderFailure>;

/// Cache of the latest fetch outcome per document name.
///
/// At most one entry exists per name. Each completed fetch replaces its
/// entry wholesale under the write lock, so readers observe either the old
/// entry or the new one, never a mixture; across overlapping fetches for
/// one name, whichever completes last owns the slot. Entries are never
/// evicted: they live until replaced or the cache is dropped.
///
/// There is no global instance: construct one per application (or per
/// test) and share it through `SheetDb::with_cache`.
#[derive(Debug, Default)]
pub struct SheetCache {
    entries: RwLock<AHashMap<String, CacheEntry>>,
}

impl SheetCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entry for `document`, returning the stored value.
    pub fn store(&self, document: &str, outcome: CacheEntry) -> CacheEntry {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        entries.insert(document.to_string(), outcome.clone());
        outcome
    }

    /// The current entry for `document`, if any fetch has completed.
    pub fn current(&self, document: &str) -> Option<CacheEntry> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(document).cloned()
    }

    /// Number of cached documents.
    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.len()
    }

    /// Whether no fetch has completed yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
