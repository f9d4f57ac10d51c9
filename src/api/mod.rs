//! API Module
//!
//! HTTP handlers and routing for the demo cache REST API.
//!
//! # Endpoints
//! - `PUT /set`, `GET /get/:key`, `DELETE /del/:key`, `GET /ttl/:key`
//! - `GET /keys`, `DELETE /keys`
//! - `/collections/:key` and `/collections/:key/:id` record CRUD
//! - `GET /stats`, `GET /health`

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
