//! Taskwell: a personal task tracker.
//!
//! Tasks carry a title, an optional description and an optional due date,
//! and move between `Pending`, `Done` and `Missed`. The crate provides the
//! status rules that keep those statuses consistent with the calendar and
//! the ordering engine behind the to-do board.
//!
//! # Architecture
//!
//! Taskwell follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `SQLite`)
//!
//! # Modules
//!
//! - [`task`]: Task status lifecycle and to-do ordering

pub mod task;
