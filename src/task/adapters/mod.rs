//! Adapter implementations for task persistence ports.
//!
//! - [`clock`]: a clock pinned to a calendar date
//! - [`memory`]: in-process storage for tests and ephemeral sessions
//! - [`sqlite`]: Diesel-backed `SQLite` storage

pub mod clock;
pub mod memory;
pub mod sqlite;
