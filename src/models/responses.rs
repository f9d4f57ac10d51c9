//! Response DTOs for the demo cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::cache::CacheStats;

/// Response body for GET /get/:key
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: Value,
    /// Whole minutes until the entry expires
    pub minutes_remaining: u64,
}

impl GetResponse {
    pub fn new(key: impl Into<String>, value: Value, minutes_remaining: u64) -> Self {
        Self {
            key: key.into(),
            value,
            minutes_remaining,
        }
    }
}

/// Response body for write-style operations (set, delete, clear)
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    /// Human-readable outcome
    pub message: String,
}

impl MessageResponse {
    pub fn set(key: &str) -> Self {
        Self {
            message: format!("Key '{}' set successfully", key),
        }
    }

    pub fn deleted(key: &str) -> Self {
        Self {
            message: format!("Key '{}' deleted successfully", key),
        }
    }

    pub fn cleared() -> Self {
        Self {
            message: "Demo cache cleared".to_string(),
        }
    }
}

/// Response body for GET /ttl/:key
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TtlResponse {
    pub key: String,
    pub minutes_remaining: u64,
}

/// Response body for GET /keys
#[derive(Debug, Clone, Serialize)]
pub struct KeysResponse {
    pub keys: Vec<String>,
}

/// Response body for collection endpoints
#[derive(Debug, Clone, Serialize)]
pub struct CollectionResponse {
    pub key: String,
    pub items: Vec<Map<String, Value>>,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of reads that returned a value
    pub hits: u64,
    /// Number of reads that came back absent
    pub misses: u64,
    /// Entries dropped after their TTL ran out
    pub expired: u64,
    /// Entries dropped because they no longer decoded
    pub corrupted: u64,
    /// Sum of expired and corrupted
    pub evictions: u64,
    /// Current number of cached entries
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Whether the cache is serving demo data
    pub active: bool,
}

impl StatsResponse {
    pub fn new(stats: &CacheStats, active: bool) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            expired: stats.expired,
            corrupted: stats.corrupted,
            evictions: stats.evictions(),
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
            active,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
