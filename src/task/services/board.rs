//! Service layer for the to-do board: sorting, reordering and saving order.
//!
//! The caller owns the current [`TodoList`] snapshot. Every operation takes
//! the snapshot by reference and returns its successor.

use super::lifecycle::{TaskLifecycleResult, TaskLifecycleService};
use crate::task::{
    domain::{MoveDirection, SortMode, TaskId, TodoList},
    ports::TaskRepository,
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info};

/// To-do board orchestration service.
#[derive(Clone)]
pub struct TodoBoardService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    lifecycle: TaskLifecycleService<R, C>,
}

impl<R, C> TodoBoardService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new board service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            lifecycle: TaskLifecycleService::new(repository, clock),
        }
    }

    /// Opens the board: reconciles overdue work, then loads and sorts.
    ///
    /// # Errors
    ///
    /// Returns an error when reconciliation or loading fails.
    pub async fn open(&self, mode: SortMode) -> TaskLifecycleResult<TodoList> {
        self.lifecycle.reconcile_missed().await?;
        self.load(mode).await
    }

    /// Reloads the board under its current mode after reconciling.
    ///
    /// Unsaved manual swaps are discarded.
    ///
    /// # Errors
    ///
    /// Returns an error when reconciliation or loading fails.
    pub async fn refresh(&self, current: &TodoList) -> TaskLifecycleResult<TodoList> {
        self.open(current.mode()).await
    }

    /// Switches the sort mode by reloading from the store.
    ///
    /// Unsaved manual swaps are discarded.
    ///
    /// # Errors
    ///
    /// Returns an error when loading fails.
    pub async fn change_sort_mode(
        &self,
        current: &TodoList,
        mode: SortMode,
    ) -> TaskLifecycleResult<TodoList> {
        debug!(from = %current.mode(), to = %mode, "changing sort mode");
        self.load(mode).await
    }

    /// Persists a checkbox change and returns the updated board.
    ///
    /// Manual mode keeps the unsaved sequence; other modes re-sort.
    ///
    /// # Errors
    ///
    /// Returns [`crate::task::ports::TaskRepositoryError::NotFound`] when the
    /// task is gone, leaving `current` valid.
    pub async fn toggle(
        &self,
        current: &TodoList,
        task_id: TaskId,
        checked: bool,
    ) -> TaskLifecycleResult<TodoList> {
        let task = self.lifecycle.toggle_done(task_id, checked).await?;
        Ok(current.with_status(task.id(), task.status()))
    }

    /// Moves a task one step without persisting it.
    ///
    /// Unknown tasks, boundary moves and non-manual modes leave the sequence
    /// unchanged.
    #[must_use]
    pub fn reorder(&self, current: &TodoList, task_id: TaskId, direction: MoveDirection) -> TodoList {
        current.reorder(task_id, direction)
    }

    /// Persists the current sequence as the manual order in one batch.
    ///
    /// Positions are one-based. An empty board writes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error when the batch is rejected; no order index changes
    /// and `current` remains the caller's valid snapshot.
    pub async fn save_order(&self, current: &TodoList) -> TaskLifecycleResult<TodoList> {
        let order = current.manual_order();
        if order.is_empty() {
            return Ok(current.clone());
        }
        self.lifecycle
            .repository()
            .update_order_index_batch(&order)
            .await?;
        info!(count = order.len(), "saved manual order");
        Ok(current.with_manual_order(&order))
    }

    async fn load(&self, mode: SortMode) -> TaskLifecycleResult<TodoList> {
        let tasks = self.lifecycle.list_all().await?;
        Ok(TodoList::sorted(&tasks, mode))
    }
}
