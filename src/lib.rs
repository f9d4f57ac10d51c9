//! Crittr Demo Cache - expiring client-side cache for the demo dashboard
//!
//! Keeps demo-mode journal entries, quick logs and reminders in a namespaced
//! slice of a persistent key-value store, expiring every entry 30 minutes
//! after its last write.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod seed;
pub mod tasks;

pub use api::AppState;
pub use cache::DemoCache;
pub use config::Config;
pub use seed::seed_demo_data;
pub use tasks::spawn_load_sweep;
