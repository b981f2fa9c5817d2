//! Service layer for task creation, editing and status changes.

use crate::task::{
    domain::{
        DueDate, NewTask, OrderIndex, ParseTaskStatusError, StatusTransition, Task,
        TaskDomainError, TaskFields, TaskId, TaskStatus, reconcile_missed, today, toggle_done,
    },
    ports::{StatusBatch, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    due_date: Option<String>,
    order_index: Option<i64>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            due_date: None,
            order_index: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due date as `YYYY-MM-DD` text.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Sets an explicit manual order index.
    #[must_use]
    pub const fn with_order_index(mut self, order_index: i64) -> Self {
        self.order_index = Some(order_index);
        self
    }

    fn into_new_task(self) -> Result<NewTask, TaskDomainError> {
        let mut task = NewTask::new(self.title)?;
        if let Some(description) = self.description {
            task = task.with_description(description);
        }
        if let Some(raw_due_date) = self.due_date.filter(|value| !value.trim().is_empty()) {
            task = task.with_due_date(DueDate::parse(&raw_due_date)?);
        }
        if let Some(order_index) = self.order_index {
            task = task.with_order_index(OrderIndex::new(order_index));
        }
        Ok(task)
    }
}

/// Request payload for the full-field edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTaskRequest {
    task_id: TaskId,
    title: String,
    description: Option<String>,
    due_date: Option<String>,
    status: String,
}

impl EditTaskRequest {
    /// Creates an edit request overwriting title and status.
    ///
    /// Description and due date are cleared unless set.
    #[must_use]
    pub fn new(task_id: TaskId, title: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            task_id,
            title: title.into(),
            description: None,
            due_date: None,
            status: status.into(),
        }
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the replacement due date as `YYYY-MM-DD` text.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Returns the task being edited.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Status text could not be parsed.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns the repository backing this service.
    #[must_use]
    pub const fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Creates a new `Pending` task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] for a blank title or malformed
    /// due date, and [`TaskLifecycleError::Repository`] when the store
    /// rejects the insert.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let new_task = request.into_new_task()?;
        let id = self.repository.insert(&new_task).await?;
        info!(task_id = %id, title = %new_task.title(), "created task");
        self.require(id).await
    }

    /// Overwrites every editable field of a task.
    ///
    /// The submitted status is stored as given; it is not re-derived from
    /// the new due date until the next reconciliation.
    ///
    /// # Errors
    ///
    /// Returns a validation error without writing anything, or
    /// [`TaskRepositoryError::NotFound`] when the task is gone.
    pub async fn edit_task(&self, request: EditTaskRequest) -> TaskLifecycleResult<Task> {
        let EditTaskRequest {
            task_id,
            title,
            description,
            due_date,
            status,
        } = request;
        let parsed_status = TaskStatus::try_from(status.as_str())?;
        let fields = TaskFields::parse(title, description, due_date.as_deref(), parsed_status)?;
        self.repository.update_fields(task_id, &fields).await?;
        debug!(%task_id, status = %fields.status, "edited task");
        self.require(task_id).await
    }

    /// Sets a task's status from user-supplied text.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::InvalidStatus`] for unknown status text
    /// and [`TaskRepositoryError::NotFound`] when the task is gone.
    pub async fn set_status(&self, task_id: TaskId, status: &str) -> TaskLifecycleResult<Task> {
        let parsed_status = TaskStatus::try_from(status)?;
        self.set_explicit_status(task_id, parsed_status).await
    }

    /// Overwrites a task's status without consulting its due date.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task is gone.
    pub async fn set_explicit_status(
        &self,
        task_id: TaskId,
        status: TaskStatus,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.require(task_id).await?;
        self.repository.update_status(task_id, status).await?;
        task.set_explicit_status(status);
        debug!(%task_id, %status, "set explicit status");
        Ok(task)
    }

    /// Applies a checkbox change.
    ///
    /// Checking marks the task `Done`; unchecking derives `Pending` or
    /// `Missed` from the due date and today's date.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task is gone.
    pub async fn toggle_done(&self, task_id: TaskId, checked: bool) -> TaskLifecycleResult<Task> {
        let mut task = self.require(task_id).await?;
        let status = toggle_done(&task, checked, today(&*self.clock));
        self.repository.update_status(task_id, status).await?;
        task.set_explicit_status(status);
        debug!(%task_id, checked, %status, "toggled task");
        Ok(task)
    }

    /// Permanently deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task is gone.
    pub async fn delete_task(&self, task_id: TaskId) -> TaskLifecycleResult<()> {
        self.repository.delete(task_id).await?;
        info!(%task_id, "deleted task");
        Ok(())
    }

    /// Flags overdue open work as `Missed` in one atomic batch.
    ///
    /// Returns the applied transitions; an empty result writes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when loading fails or the
    /// batch is rejected, in which case no status is changed.
    pub async fn reconcile_missed(&self) -> TaskLifecycleResult<Vec<StatusTransition>> {
        let open = self.repository.list_by_status(&TaskStatus::OPEN).await?;
        let transitions = reconcile_missed(&open, today(&*self.clock));
        if transitions.is_empty() {
            return Ok(transitions);
        }

        let batch: StatusBatch = transitions
            .iter()
            .map(|transition| (transition.task_id, transition.to))
            .collect();
        self.repository.update_status_batch(&batch).await?;
        info!(count = transitions.len(), "marked overdue tasks missed");
        Ok(transitions)
    }

    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn find(&self, task_id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(task_id).await?)
    }

    /// Lists every task in storage order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn list_all(&self) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list_all().await?)
    }

    /// Lists open work: tasks that are `Pending` or `Missed`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn list_open(&self) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list_by_status(&TaskStatus::OPEN).await?)
    }

    /// Lists tasks due on a calendar date.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn list_due_on(&self, due_date: DueDate) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list_by_due_date(due_date).await?)
    }

    /// Reconciles overdue work, then lists the open tasks.
    ///
    /// This is the open-work view: a `Pending` task whose due date has passed
    /// is shown as `Missed`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when reconciliation or the
    /// lookup fails.
    pub async fn open_work(&self) -> TaskLifecycleResult<Vec<Task>> {
        self.reconcile_missed().await?;
        self.list_open().await
    }

    /// Reconciles overdue work, then lists tasks due on a calendar date.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when reconciliation or the
    /// lookup fails.
    pub async fn due_on(&self, due_date: DueDate) -> TaskLifecycleResult<Vec<Task>> {
        self.reconcile_missed().await?;
        self.list_due_on(due_date).await
    }

    async fn require(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::Repository(TaskRepositoryError::NotFound(
                task_id,
            )))
    }
}
