//! `SQLite` adapters for task persistence.

mod config;
mod models;
mod repository;
mod schema;

pub use config::SqliteConfig;
pub use repository::{SqliteTaskRepository, TaskSqlitePool};
