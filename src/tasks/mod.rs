//! Background Tasks Module
//!
//! Contains tasks that run alongside the demo server.
//!
//! # Tasks
//! - Load sweep: one best-effort pass evicting expired entries once the
//!   session has finished loading

mod sweep;

pub use sweep::spawn_load_sweep;
