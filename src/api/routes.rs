//! API Routes
//!
//! Configures the Axum router with all demo cache endpoints.

use axum::{
    routing::{delete, get, patch, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    add_item_handler, clear_handler, clear_items_handler, delete_handler, get_handler,
    health_handler, list_items_handler, list_keys_handler, remove_item_handler, set_handler,
    stats_handler, ttl_handler, update_item_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /set` - Store a JSON value
/// - `GET /get/:key` - Retrieve a value and its remaining minutes
/// - `DELETE /del/:key` - Remove a key
/// - `GET /ttl/:key` - Minutes until a key expires
/// - `GET /keys`, `DELETE /keys` - List or clear all cache keys
/// - `GET|POST|DELETE /collections/:key` - List, append to, or empty a collection
/// - `PATCH|DELETE /collections/:key/:id` - Update or remove one record
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin, the dashboard is served from another port
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/set", put(set_handler))
        .route("/get/:key", get(get_handler))
        .route("/del/:key", delete(delete_handler))
        .route("/ttl/:key", get(ttl_handler))
        .route("/keys", get(list_keys_handler).delete(clear_handler))
        .route(
            "/collections/:key",
            get(list_items_handler)
                .post(add_item_handler)
                .delete(clear_items_handler),
        )
        .route(
            "/collections/:key/:id",
            patch(update_item_handler).delete(remove_item_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
