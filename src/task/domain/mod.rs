//! Domain model for task status and to-do ordering.
//!
//! The domain holds the task aggregate, the status derivation rules and the
//! display ordering engine while keeping every infrastructure concern
//! outside of the domain boundary.

mod error;
mod ids;
mod ordering;
mod status;
mod task;

pub use error::{ParseSortModeError, ParseTaskStatusError, TaskDomainError};
pub use ids::{DueDate, OrderIndex, TaskId, TaskTitle};
pub use ordering::{ManualOrder, MoveDirection, SortMode, TodoList, sort_tasks};
pub use status::{StatusTransition, open_status_for, reconcile_missed, today, toggle_done};
pub use task::{NewTask, PersistedTaskData, Task, TaskFields, TaskStatus};
