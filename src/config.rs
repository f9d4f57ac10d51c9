//! Configuration Module
//!
//! Handles loading and managing demo server configuration from environment
//! variables.

use std::env;

/// Demo server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Install starter collections into a fresh session
    pub seed_demo_data: bool,
    /// Delay before the one-shot load sweep runs, in milliseconds
    pub load_sweep_delay_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SEED_DEMO_DATA` - Seed starter collections (default: true)
    /// - `LOAD_SWEEP_DELAY_MS` - Delay before the load sweep (default: 0)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            seed_demo_data: env::var("SEED_DEMO_DATA")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.seed_demo_data),
            load_sweep_delay_ms: env::var("LOAD_SWEEP_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.load_sweep_delay_ms),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            seed_demo_data: true,
            load_sweep_delay_ms: 0,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
