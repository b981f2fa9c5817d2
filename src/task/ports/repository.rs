//! Repository port for task persistence and lookup.

use crate::task::domain::{DueDate, ManualOrder, NewTask, Task, TaskFields, TaskId, TaskStatus};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Status changes applied together by [`TaskRepository::update_status_batch`].
pub type StatusBatch = BTreeMap<TaskId, TaskStatus>;

/// Task persistence contract.
///
/// Batch writes are atomic: either every entry is applied or none is.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Returns every stored task.
    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns tasks whose status is one of `statuses`.
    async fn list_by_status(&self, statuses: &[TaskStatus]) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns tasks due on `due_date`.
    async fn list_by_due_date(&self, due_date: DueDate) -> TaskRepositoryResult<Vec<Task>>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Stores a new task and returns the identifier assigned to it.
    ///
    /// The task starts `Pending`. Without an explicit order index it receives
    /// its own identifier as order index in the same write.
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<TaskId>;

    /// Overwrites title, description, due date and status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update_fields(&self, id: TaskId, fields: &TaskFields) -> TaskRepositoryResult<()>;

    /// Overwrites the status of one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update_status(&self, id: TaskId, status: TaskStatus) -> TaskRepositoryResult<()>;

    /// Applies every status change as one atomic batch.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] and applies nothing when any
    /// task in the batch does not exist.
    async fn update_status_batch(&self, batch: &StatusBatch) -> TaskRepositoryResult<()>;

    /// Applies every manual position as one atomic batch.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] and applies nothing when any
    /// task in the batch does not exist.
    async fn update_order_index_batch(&self, order: &ManualOrder) -> TaskRepositoryResult<()>;

    /// Permanently removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
