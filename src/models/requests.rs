//! Request DTOs for the demo cache API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::cache::MAX_KEY_LENGTH;

/// Request body for the SET operation (PUT /set)
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// Any JSON value to store
    pub value: Value,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_key(&self.key)
    }
}

/// Request body for adding a record to a collection
/// (POST /collections/:key). Must carry a string `id`.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct AddItemRequest {
    pub item: Map<String, Value>,
}

impl AddItemRequest {
    pub fn validate(&self) -> Option<String> {
        match self.item.get("id") {
            Some(Value::String(id)) if !id.is_empty() => None,
            Some(_) => Some("Item id must be a non-empty string".to_string()),
            None => Some("Item is missing an id".to_string()),
        }
    }
}

/// Checks a key received over HTTP.
pub fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    None
}
