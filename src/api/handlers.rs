//! API Handlers
//!
//! HTTP request handlers exposing one demo session's cache.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{Map, Value};

use crate::cache::DemoCache;
use crate::error::{CacheError, Result};
use crate::models::requests::validate_key;
use crate::models::{
    AddItemRequest, CollectionResponse, GetResponse, HealthResponse, KeysResponse,
    MessageResponse, SetRequest, StatsResponse, TtlResponse,
};

/// Application state shared across all handlers.
///
/// Reads can evict expired entries, so most handlers take the write lock.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<RwLock<DemoCache>>,
}

impl AppState {
    pub fn new(cache: DemoCache) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
        }
    }
}

type JsonRecord = Map<String, Value>;

fn check_key(key: &str) -> Result<()> {
    match validate_key(key) {
        Some(msg) => Err(CacheError::InvalidRequest(msg)),
        None => Ok(()),
    }
}

/// Handler for PUT /set
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<MessageResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let mut cache = state.cache.write().await;
    cache.set(&req.key, &req.value);

    Ok(Json(MessageResponse::set(&req.key)))
}

/// Handler for GET /get/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    check_key(&key)?;

    // Write lock: a read may evict
    let mut cache = state.cache.write().await;
    let value = cache
        .get::<Value>(&key)
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;
    let minutes = cache.time_remaining(&key);

    Ok(Json(GetResponse::new(key, value, minutes)))
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<MessageResponse>> {
    check_key(&key)?;

    let mut cache = state.cache.write().await;
    cache.remove_item(&key);

    Ok(Json(MessageResponse::deleted(&key)))
}

/// Handler for GET /ttl/:key
pub async fn ttl_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<TtlResponse>> {
    check_key(&key)?;

    let cache = state.cache.read().await;
    let minutes_remaining = cache.time_remaining(&key);

    Ok(Json(TtlResponse {
        key,
        minutes_remaining,
    }))
}

/// Handler for GET /keys
pub async fn list_keys_handler(State(state): State<AppState>) -> Json<KeysResponse> {
    let cache = state.cache.read().await;
    Json(KeysResponse {
        keys: cache.list_keys(),
    })
}

/// Handler for DELETE /keys
pub async fn clear_handler(State(state): State<AppState>) -> Json<MessageResponse> {
    let mut cache = state.cache.write().await;
    cache.clear_all();
    Json(MessageResponse::cleared())
}

/// Handler for GET /collections/:key
pub async fn list_items_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<CollectionResponse>> {
    check_key(&key)?;

    let mut cache = state.cache.write().await;
    let items = cache.collection::<JsonRecord>(&key).items();

    Ok(Json(CollectionResponse { key, items }))
}

/// Handler for POST /collections/:key
pub async fn add_item_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<AddItemRequest>,
) -> Result<Json<CollectionResponse>> {
    check_key(&key)?;
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let mut cache = state.cache.write().await;
    let items = cache.collection::<JsonRecord>(&key).add_item(req.item);

    Ok(Json(CollectionResponse { key, items }))
}

/// Handler for PATCH /collections/:key/:id
pub async fn update_item_handler(
    State(state): State<AppState>,
    Path((key, id)): Path<(String, String)>,
    Json(patch): Json<Value>,
) -> Result<Json<CollectionResponse>> {
    check_key(&key)?;
    if !patch.is_object() {
        return Err(CacheError::InvalidRequest(
            "Update body must be a JSON object".to_string(),
        ));
    }

    let mut cache = state.cache.write().await;
    let items = cache.collection::<JsonRecord>(&key).update_item(&id, &patch);

    Ok(Json(CollectionResponse { key, items }))
}

/// Handler for DELETE /collections/:key/:id
pub async fn remove_item_handler(
    State(state): State<AppState>,
    Path((key, id)): Path<(String, String)>,
) -> Result<Json<CollectionResponse>> {
    check_key(&key)?;

    let mut cache = state.cache.write().await;
    let items = cache.collection::<JsonRecord>(&key).remove_item(&id);

    Ok(Json(CollectionResponse { key, items }))
}

/// Handler for DELETE /collections/:key
pub async fn clear_items_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<CollectionResponse>> {
    check_key(&key)?;

    let mut cache = state.cache.write().await;
    let items = cache.collection::<JsonRecord>(&key).clear_all();

    Ok(Json(CollectionResponse { key, items }))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::new(&cache.stats(), cache.is_active()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ManualClock, MemoryStorage, DEMO_TTL_MS};
    use serde_json::json;

    fn test_state() -> (AppState, ManualClock) {
        let clock = ManualClock::new(1_700_000_000_000);
        let cache = DemoCache::in_browser(MemoryStorage::new(), clock.clone());
        (AppState::new(cache), clock)
    }

    fn record(value: Value) -> AddItemRequest {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let (state, _) = test_state();

        let req = SetRequest {
            key: "pet".to_string(),
            value: json!({"name": "Buddy"}),
        };
        assert!(set_handler(State(state.clone()), Json(req)).await.is_ok());

        let response = get_handler(State(state), Path("pet".to_string()))
            .await
            .unwrap();
        assert_eq!(response.value, json!({"name": "Buddy"}));
        assert_eq!(response.minutes_remaining, 30);
    }

    #[tokio::test]
    async fn test_get_expired_key() {
        let (state, clock) = test_state();
        let req = SetRequest {
            key: "pet".to_string(),
            value: json!(1),
        };
        assert!(set_handler(State(state.clone()), Json(req)).await.is_ok());

        clock.advance(DEMO_TTL_MS);
        let result = get_handler(State(state), Path("pet".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let (state, _) = test_state();
        let req = SetRequest {
            key: "to_delete".to_string(),
            value: json!("value"),
        };
        assert!(set_handler(State(state.clone()), Json(req)).await.is_ok());

        assert!(delete_handler(State(state.clone()), Path("to_delete".to_string()))
            .await
            .is_ok());

        let result = get_handler(State(state), Path("to_delete".to_string())).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_delete_missing_key_is_ok() {
        let (state, _) = test_state();
        let result = delete_handler(State(state), Path("never".to_string())).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_collection_handlers() {
        let (state, _) = test_state();
        let key = || Path("quick-logs".to_string());

        let added = add_item_handler(
            State(state.clone()),
            key(),
            Json(record(json!({"id": "log-1", "petName": "Buddy", "activityType": "feeding"}))),
        )
        .await
        .unwrap();
        assert_eq!(added.items.len(), 1);

        let updated = update_item_handler(
            State(state.clone()),
            Path(("quick-logs".to_string(), "log-1".to_string())),
            Json(json!({"activityType": "walk"})),
        )
        .await
        .unwrap();
        assert_eq!(updated.items[0]["activityType"], "walk");

        let removed = remove_item_handler(
            State(state.clone()),
            Path(("quick-logs".to_string(), "log-1".to_string())),
        )
        .await
        .unwrap();
        assert!(removed.items.is_empty());

        let listed = list_items_handler(State(state), key()).await.unwrap();
        assert!(listed.items.is_empty());
    }

    #[tokio::test]
    async fn test_list_items_on_plain_value_keeps_it() {
        let (state, _) = test_state();
        let req = SetRequest {
            key: "profile".to_string(),
            value: json!({"name": "Buddy"}),
        };
        assert!(set_handler(State(state.clone()), Json(req)).await.is_ok());

        let listed = list_items_handler(State(state.clone()), Path("profile".to_string()))
            .await
            .unwrap();
        assert!(listed.items.is_empty());

        let response = get_handler(State(state), Path("profile".to_string()))
            .await
            .unwrap();
        assert_eq!(response.value, json!({"name": "Buddy"}));
    }

    #[tokio::test]
    async fn test_add_item_without_id_rejected() {
        let (state, _) = test_state();
        let result = add_item_handler(
            State(state),
            Path("reminders".to_string()),
            Json(record(json!({"title": "Vet"}))),
        )
        .await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_update_with_non_object_rejected() {
        let (state, _) = test_state();
        let result = update_item_handler(
            State(state),
            Path(("reminders".to_string(), "r-1".to_string())),
            Json(json!([1, 2])),
        )
        .await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_keys_and_clear_handlers() {
        let (state, _) = test_state();
        for key in ["a", "b"] {
            let req = SetRequest {
                key: key.to_string(),
                value: json!(true),
            };
            assert!(set_handler(State(state.clone()), Json(req)).await.is_ok());
        }

        assert_eq!(list_keys_handler(State(state.clone())).await.keys, vec!["a", "b"]);

        let cleared = clear_handler(State(state.clone())).await;
        assert_eq!(cleared.message, "Demo cache cleared");
        assert!(list_keys_handler(State(state)).await.keys.is_empty());
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let (state, _) = test_state();

        let response = stats_handler(State(state)).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.misses, 0);
        assert!(response.active);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_set_invalid_request() {
        let (state, _) = test_state();

        let req = SetRequest {
            key: "".to_string(),
            value: json!("value"),
        };
        let result = set_handler(State(state), Json(req)).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }
}
