//! Cache Module
//!
//! Expiring demo-mode cache: an in-process mirror over a namespaced slice of
//! a persistent string store, with a fixed TTL enforced on access.

mod clock;
mod collection;
mod entry;
mod mode;
mod stats;
mod storage;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use collection::{Collection, Record};
pub use entry::CacheEntry;
pub use mode::CacheMode;
pub use stats::CacheStats;
pub use storage::{MemoryStorage, Storage};
pub use store::DemoCache;

// == Public Constants ==
/// Milliseconds in one minute
pub const MS_PER_MINUTE: u64 = 60_000;

/// Lifetime of every entry: 30 minutes
pub const DEMO_TTL_MS: u64 = 30 * MS_PER_MINUTE;

/// Prefix marking the cache's own keys in the persistent store
pub const NAMESPACE_PREFIX: &str = "crittr_demo_";

/// Store key whose presence means a signed-in session exists
pub const AUTH_SESSION_KEY: &str = "crittr-auth-session";

/// Maximum allowed key length in bytes for keys arriving over HTTP
pub const MAX_KEY_LENGTH: usize = 256;
