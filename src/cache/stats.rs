//! Cache Statistics Module
//!
//! Counts reads and the two ways an entry can be dropped without being
//! removed explicitly: it expired, or it no longer decoded.

use serde::Serialize;

// == Cache Stats ==
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Reads that returned a value
    pub hits: u64,
    /// Reads that came back absent, for any reason
    pub misses: u64,
    /// Entries dropped because their TTL ran out
    pub expired: u64,
    /// Entries dropped because the stored text or shape was unreadable
    pub corrupted: u64,
    /// Namespaced entries currently in the persistent store
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// hits / (hits + misses), or 0.0 before the first read.
    pub fn hit_rate(&self) -> f64 {
        match self.hits + self.misses {
            0 => 0.0,
            reads => self.hits as f64 / reads as f64,
        }
    }

    /// All entries dropped on access or sweep.
    pub fn evictions(&self) -> u64 {
        self.expired + self.corrupted
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_expired(&mut self) {
        self.expired += 1;
    }

    pub fn record_corrupted(&mut self) {
        self.corrupted += 1;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
