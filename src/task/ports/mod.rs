//! Port contracts for task persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by task services. The
//! clock port is [`mockable::Clock`].

pub mod repository;

pub use repository::{StatusBatch, TaskRepository, TaskRepositoryError, TaskRepositoryResult};
