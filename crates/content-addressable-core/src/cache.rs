//! Bounded identifier cache.
//!
//! An explicit collaborator, never a global: whoever wants memoized
//! identifiers constructs a [`CidCache`] and hands it to the component that
//! should use it. Entries are keyed by canonical bytes, so a changed value
//! can never hit a stale identifier.

use indexmap::IndexMap;
use std::fmt;
use std::sync::Mutex;

use crate::cid::CidOptions;
use crate::content::Content;
use crate::error::Result;
use crate::types::Cid;

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

struct CacheInner {
    /// Canonical bytes -> identifier, least recently used first.
    entries: IndexMap<Vec<u8>, Cid>,
    hits: u64,
    misses: u64,
}

/// Identifier computation with optional least-recently-used memoization.
///
/// A capacity of zero disables caching; every call then hashes.
pub struct CidCache {
    options: CidOptions,
    capacity: usize,
    inner: Mutex<CacheInner>,
}

impl CidCache {
    /// Create a cache holding at most `capacity` identifiers.
    pub fn new(options: CidOptions, capacity: usize) -> Self {
        Self {
            options,
            capacity,
            inner: Mutex::new(CacheInner {
                entries: IndexMap::new(),
                hits: 0,
                misses: 0,
            }),
        }
    }

    /// Identifier computation without memoization.
    pub fn disabled(options: CidOptions) -> Self {
        Self::new(options, 0)
    }

    /// The options identifiers are computed with.
    pub fn options(&self) -> &CidOptions {
        &self.options
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// An empty cache with the same options and capacity.
    pub fn fresh(&self) -> Self {
        Self::new(self.options.clone(), self.capacity)
    }

    /// Compute (or recall) the identifier of some content.
    pub fn cid_of<C: Content + ?Sized>(&self, content: &C) -> Result<Cid> {
        let bytes = content.canonical_bytes()?;
        if self.capacity == 0 {
            return self.options.cid_of_canonical(&bytes);
        }

        {
            let mut inner = self.lock();
            if let Some(index) = inner.entries.get_index_of(&bytes) {
                // Move to the most-recently-used end.
                let last = inner.entries.len() - 1;
                inner.entries.move_index(index, last);
                inner.hits += 1;
                if let Some((_, cid)) = inner.entries.get_index(last) {
                    return Ok(cid.clone());
                }
            }
        }

        let cid = self.options.cid_of_canonical(&bytes)?;

        let mut inner = self.lock();
        inner.misses += 1;
        inner.entries.insert(bytes, cid.clone());
        while inner.entries.len() > self.capacity {
            inner.entries.shift_remove_index(0);
        }
        Ok(cid)
    }

    /// Drop every memoized identifier.
    pub fn clear(&self) {
        self.lock().entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        CacheStats {
            hits: inner.hits,
            misses: inner.misses,
            entries: inner.entries.len(),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheInner> {
        // The map is always left consistent, so a poisoned lock is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for CidCache {
    fn default() -> Self {
        Self::disabled(CidOptions::default())
    }
}

impl fmt::Debug for CidCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CidCache")
            .field("options", &self.options)
            .field("capacity", &self.capacity)
            .field("stats", &self.stats())
            .finish()
    }
}
