//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use serde::{Deserialize, Serialize};

use crate::cache::{DEMO_TTL_MS, MS_PER_MINUTE};

// == Cache Entry ==
/// Represents a single cache entry with value and expiry metadata.
///
/// Serialized into the persistent store as
/// `{"data": ..., "writtenAt": ..., "expiresAt": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry<T> {
    /// The stored value
    pub data: T,
    /// Write timestamp (Unix milliseconds)
    pub written_at: u64,
    /// Expiration timestamp (Unix milliseconds), always `written_at + DEMO_TTL_MS`
    pub expires_at: u64,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates a new entry written at `now`, expiring one TTL later.
    pub fn new(data: T, now: u64) -> Self {
        Self {
            data,
            written_at: now,
            expires_at: now.saturating_add(DEMO_TTL_MS),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// Boundary condition: the entry is expired once `now >= expires_at`,
    /// so a read exactly one TTL after the write already misses.
    pub fn is_expired_at(&self, now: u64) -> bool {
        now >= self.expires_at
    }

    // == Time To Live ==
    /// Returns remaining lifetime in milliseconds, 0 once expired.
    pub fn remaining_ms(&self, now: u64) -> u64 {
        self.expires_at.saturating_sub(now)
    }

    /// Returns remaining lifetime in whole minutes, rounded up.
    pub fn remaining_minutes(&self, now: u64) -> u64 {
        self.remaining_ms(now).div_ceil(MS_PER_MINUTE)
    }
}
