//! Cache Mode Module
//!
//! Decides once, at construction, whether the demo cache applies.

use tracing::warn;

use crate::cache::storage::Storage;
use crate::cache::AUTH_SESSION_KEY;

/// Whether the hosting session is a demo session or a signed-in one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheMode {
    /// No signed-in user; the dashboard runs on cached demo data
    #[default]
    Demo,
    /// A signed-in session exists; the demo cache stays out of the way
    Authenticated,
}

impl CacheMode {
    /// Resolves the mode from the authenticated-session marker.
    ///
    /// The marker is only read. A store that cannot be read is treated as
    /// having no marker.
    pub fn detect(storage: &dyn Storage) -> Self {
        match storage.get_item(AUTH_SESSION_KEY) {
            Ok(Some(_)) => CacheMode::Authenticated,
            Ok(None) => CacheMode::Demo,
            Err(e) => {
                warn!("Could not read session marker, assuming demo mode: {}", e);
                CacheMode::Demo
            }
        }
    }

    pub fn is_demo(self) -> bool {
        self == CacheMode::Demo
    }
}
