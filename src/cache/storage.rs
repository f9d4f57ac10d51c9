//! Persistent Storage Module
//!
//! The string-keyed store the cache mirrors its entries into. It models the
//! browser's local storage: synchronous, shared with unrelated data, and
//! enumerable.

use crate::error::StorageError;

/// Synchronous string-keyed store shared with data the cache does not own.
pub trait Storage: Send + Sync {
    /// Returns the stored text for `key`, or `None` if absent.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;

    /// Lists every key currently in the store, in enumeration order.
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

// == Memory Storage ==
/// In-memory store with insertion-ordered enumeration and an optional
/// byte quota, counted over keys plus values.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: Vec<(String, String)>,
    quota: Option<usize>,
}

impl MemoryStorage {
    // == Constructor ==
    /// Creates an empty store with no quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that rejects writes beyond `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            items: Vec::new(),
            quota: Some(quota),
        }
    }

    /// Bytes currently used by keys and values.
    pub fn used_bytes(&self) -> usize {
        self.items.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    /// Number of stored items, namespaced or not.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.items.iter().position(|(k, _)| k == key)
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.position(key).map(|idx| self.items[idx].1.clone()))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let existing = self.position(key);

        if let Some(quota) = self.quota {
            let replaced = existing
                .map(|idx| key.len() + self.items[idx].1.len())
                .unwrap_or(0);
            let needed = self.used_bytes() - replaced + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
        }

        match existing {
            Some(idx) => self.items[idx].1 = value.to_string(),
            None => self.items.push((key.to_string(), value.to_string())),
        }
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.retain(|(k, _)| k != key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.items.iter().map(|(k, _)| k.clone()).collect())
    }
}
