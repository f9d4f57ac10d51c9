//! Cache Store Module
//!
//! Main cache engine: an in-process mirror in front of a namespaced slice of
//! a persistent string store, with a fixed TTL enforced lazily on access.

use std::collections::HashMap;
use std::fmt;

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::{CacheEntry, CacheMode, CacheStats, Clock, Storage, NAMESPACE_PREFIX};

/// Outcome of reading one entry back from the persistent store.
enum Lookup {
    Live(CacheEntry<Value>),
    Missing,
    Evicted,
}

// == Demo Cache ==
/// Expiring key-value cache backing the demo dashboard.
///
/// Without a persistent store (server rendering) the cache is always active
/// and serves from its mirror alone. With a store, it is active only in
/// [`CacheMode::Demo`]. No operation ever returns an error: store failures
/// are logged and degrade to a no-op or an absent value.
pub struct DemoCache {
    /// Decoded entries keyed by the unprefixed key
    mirror: HashMap<String, CacheEntry<Value>>,
    /// Persistent store, absent during server rendering
    storage: Option<Box<dyn Storage>>,
    /// Demo or authenticated, resolved once at construction
    mode: CacheMode,
    clock: Box<dyn Clock>,
    stats: CacheStats,
}

impl DemoCache {
    // == Constructors ==
    /// Creates a cache for a rendering context with no persistent store.
    pub fn server_side(clock: impl Clock + 'static) -> Self {
        Self::with_mode(None, CacheMode::Demo, clock)
    }

    /// Creates a cache over `storage`, detecting the mode from the
    /// authenticated-session marker.
    pub fn in_browser(storage: impl Storage + 'static, clock: impl Clock + 'static) -> Self {
        let mode = CacheMode::detect(&storage);
        debug!("Demo cache resolved mode {:?}", mode);
        Self::with_mode(Some(Box::new(storage)), mode, clock)
    }

    /// Creates a cache with an explicitly injected mode.
    pub fn with_mode(
        storage: Option<Box<dyn Storage>>,
        mode: CacheMode,
        clock: impl Clock + 'static,
    ) -> Self {
        Self {
            mirror: HashMap::new(),
            storage,
            mode,
            clock: Box::new(clock),
            stats: CacheStats::new(),
        }
    }

    // == Is Active ==
    /// Reports whether the cache should be used at all.
    ///
    /// Always true without a persistent store, so server-rendered markup
    /// matches the demo state the browser will show.
    pub fn is_active(&self) -> bool {
        match self.storage {
            None => true,
            Some(_) => self.mode.is_demo(),
        }
    }

    pub fn mode(&self) -> CacheMode {
        self.mode
    }

    /// Current time according to the cache's clock (Unix milliseconds).
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Read access to the underlying persistent store, if any.
    pub fn storage(&self) -> Option<&dyn Storage> {
        self.storage.as_deref()
    }

    /// Write access to the underlying persistent store, if any.
    ///
    /// The store is shared with data the cache does not own.
    pub fn storage_mut(&mut self) -> Option<&mut (dyn Storage + 'static)> {
        self.storage.as_deref_mut()
    }

    // == Set ==
    /// Stores `value` under `key` with a fresh TTL.
    ///
    /// Overwrites any previous entry wholesale. Does nothing when inactive.
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        if !self.is_active() {
            debug!("Demo cache inactive, skipping write of '{}'", key);
            return;
        }

        let data = match serde_json::to_value(value) {
            Ok(data) => data,
            Err(e) => {
                warn!("Failed to serialize value for '{}': {}", key, e);
                return;
            }
        };

        let entry = CacheEntry::new(data, self.clock.now_ms());
        let text = match serde_json::to_string(&entry) {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to serialize entry for '{}': {}", key, e);
                return;
            }
        };

        self.mirror.insert(key.to_string(), entry);

        if let Some(storage) = self.storage.as_mut() {
            let store_key = namespaced(key);
            if let Err(e) = storage.set_item(&store_key, &text) {
                warn!("Failed to persist '{}': {}", key, e);
                // An older entry left behind would outlive or evict the mirrored one
                if let Err(e) = storage.remove_item(&store_key) {
                    warn!("Failed to drop stale entry for '{}': {}", key, e);
                }
            }
        }
    }

    // == Get ==
    /// Retrieves the value under `key` as `T`.
    ///
    /// Returns `None` when inactive, absent, expired, or when the stored data
    /// does not decode as `T`. Expired and undecodable entries are evicted.
    pub fn get<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        if !self.is_active() {
            return None;
        }

        let now = self.clock.now_ms();
        match self.mirror.get(key).map(|entry| entry.is_expired_at(now)) {
            Some(false) => {
                let data = self.mirror[key].data.clone();
                return self.decode(key, data);
            }
            Some(true) => {
                debug!("Mirrored entry '{}' expired", key);
                self.mirror.remove(key);
                // With a store, the persisted copy is evicted and counted below
                if self.storage.is_none() {
                    self.stats.record_expired();
                }
            }
            None => {}
        }

        match self.load_persisted(key) {
            Lookup::Live(entry) => {
                let data = entry.data.clone();
                self.mirror.insert(key.to_string(), entry);
                self.decode(key, data)
            }
            Lookup::Missing | Lookup::Evicted => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Retrieves the value under `key`, or `default` when it is absent.
    pub fn get_or<T: DeserializeOwned>(&mut self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    // == Has Key ==
    /// Equivalent to `get(key).is_some()`, including its evictions.
    pub fn has_key(&mut self, key: &str) -> bool {
        self.get::<IgnoredAny>(key).is_some()
    }

    // == Remove ==
    /// Removes `key` from both the persistent store and the mirror.
    ///
    /// Missing keys and a missing store are not errors.
    pub fn remove_item(&mut self, key: &str) {
        self.mirror.remove(key);

        if let Some(storage) = self.storage.as_mut() {
            if let Err(e) = storage.remove_item(&namespaced(key)) {
                warn!("Failed to remove '{}': {}", key, e);
            }
        }
    }

    // == Clear ==
    /// Removes every namespaced entry, leaving unrelated store keys intact.
    pub fn clear_all(&mut self) {
        self.mirror.clear();

        let Some(storage) = self.storage.as_mut() else {
            return;
        };

        let keys = match storage.keys() {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Failed to enumerate storage keys: {}", e);
                return;
            }
        };

        let mut removed = 0;
        for key in keys.iter().filter(|k| k.starts_with(NAMESPACE_PREFIX)) {
            match storage.remove_item(key) {
                Ok(()) => removed += 1,
                Err(e) => warn!("Failed to remove '{}': {}", key, e),
            }
        }
        debug!("Cleared {} demo cache entries", removed);
    }

    // == List Keys ==
    /// Lists cache keys (prefix stripped) in store enumeration order.
    ///
    /// Expired entries that have not been read yet are still listed.
    pub fn list_keys(&self) -> Vec<String> {
        let Some(storage) = self.storage.as_ref() else {
            return Vec::new();
        };

        match storage.keys() {
            Ok(keys) => keys
                .iter()
                .filter_map(|k| k.strip_prefix(NAMESPACE_PREFIX))
                .map(str::to_string)
                .collect(),
            Err(e) => {
                warn!("Failed to enumerate storage keys: {}", e);
                Vec::new()
            }
        }
    }

    // == Time Remaining ==
    /// Whole minutes until `key` expires, rounded up.
    ///
    /// Zero when inactive, without a store, for absent keys and for entries
    /// that have already expired.
    pub fn time_remaining(&self, key: &str) -> u64 {
        if !self.is_active() {
            return 0;
        }
        let Some(storage) = self.storage.as_ref() else {
            return 0;
        };

        let raw = match storage.get_item(&namespaced(key)) {
            Ok(Some(raw)) => raw,
            Ok(None) => return 0,
            Err(e) => {
                warn!("Failed to read '{}': {}", key, e);
                return 0;
            }
        };

        match serde_json::from_str::<CacheEntry<IgnoredAny>>(&raw) {
            Ok(entry) => entry.remaining_minutes(self.clock.now_ms()),
            Err(e) => {
                warn!("Corrupted entry for '{}': {}", key, e);
                0
            }
        }
    }

    // == Sweep ==
    /// Reads every namespaced entry once, evicting expired and corrupted ones.
    ///
    /// Returns the number of entries evicted.
    pub fn sweep_expired(&mut self) -> usize {
        if !self.is_active() {
            return 0;
        }

        let mut evicted = 0;
        for key in self.list_keys() {
            if let Lookup::Evicted = self.load_persisted(&key) {
                evicted += 1;
            }
        }

        if evicted > 0 {
            debug!("Sweep evicted {} demo cache entries", evicted);
        }
        evicted
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.list_keys().len());
        stats
    }

    // == Internals ==
    fn load_persisted(&mut self, key: &str) -> Lookup {
        let Some(storage) = self.storage.as_ref() else {
            return Lookup::Missing;
        };

        let raw = match storage.get_item(&namespaced(key)) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Lookup::Missing,
            Err(e) => {
                warn!("Failed to read '{}': {}", key, e);
                return Lookup::Missing;
            }
        };

        let entry: CacheEntry<Value> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Corrupted entry for '{}', evicting: {}", key, e);
                self.evict_corrupted(key);
                return Lookup::Evicted;
            }
        };

        if entry.is_expired_at(self.clock.now_ms()) {
            debug!("Entry '{}' expired, evicting", key);
            self.remove_item(key);
            self.stats.record_expired();
            return Lookup::Evicted;
        }

        Lookup::Live(entry)
    }

    fn decode<T: DeserializeOwned>(&mut self, key: &str, data: Value) -> Option<T> {
        match serde_json::from_value(data) {
            Ok(value) => {
                self.stats.record_hit();
                Some(value)
            }
            Err(e) => {
                warn!("Cached value for '{}' has an unexpected shape, evicting: {}", key, e);
                self.evict_corrupted(key);
                self.stats.record_miss();
                None
            }
        }
    }

    fn evict_corrupted(&mut self, key: &str) {
        self.remove_item(key);
        self.stats.record_corrupted();
    }
}

impl fmt::Debug for DemoCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DemoCache")
            .field("mode", &self.mode)
            .field("has_storage", &self.storage.is_some())
            .field("mirrored", &self.mirror.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

fn namespaced(key: &str) -> String {
    format!("{}{}", NAMESPACE_PREFIX, key)
}
