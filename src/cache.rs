use std::collections::HashSet;

use crate::candidate::Candidate;

/// Rows the cache may hold before the next overflow check empties it.
pub const DEFAULT_MAX_CACHE_SIZE: usize = 1000;

/// Deduplicated store of candidate rows, kept in insertion order.
///
/// Eviction is all-or-nothing: once the cache grows past its bound the
/// whole thing is cleared rather than trimmed row by row.
#[derive(Debug)]
pub struct CandidateCache {
    rows: Vec<Candidate>,
    seen: HashSet<String>,
    max_size: usize,
}

impl Default for CandidateCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateCache {
    pub fn new() -> Self {
        Self::with_max_size(DEFAULT_MAX_CACHE_SIZE)
    }

    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            rows: Vec::new(),
            seen: HashSet::new(),
            max_size,
        }
    }

    /// Adds a row unless one with the same display form is already stored.
    /// Returns whether the row was new.
    pub fn insert(&mut self, row: Candidate) -> bool {
        if self.seen.contains(row.display_string()) {
            return false;
        }
        self.seen.insert(row.display_string().to_string());
        self.rows.push(row);
        debug_assert_eq!(self.rows.len(), self.seen.len());
        true
    }

    pub fn rows(&self) -> &[Candidate] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.seen.clear();
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Takes effect at the next overflow check; nothing is evicted here.
    pub fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size;
    }

    /// Empties the cache if it has grown past its bound. Returns whether
    /// a clear happened.
    pub fn clear_if_over_capacity(&mut self) -> bool {
        if self.rows.len() > self.max_size {
            log::debug!(
                "candidate cache over capacity ({} > {}), clearing",
                self.rows.len(),
                self.max_size
            );
            self.clear();
            return true;
        }
        false
    }
}
