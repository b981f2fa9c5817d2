//! In-memory repository for task tests and ephemeral sessions.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{DueDate, ManualOrder, NewTask, Task, TaskFields, TaskId, TaskStatus},
    ports::{StatusBatch, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    last_id: i64,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

impl InMemoryTaskState {
    fn get_mut(&mut self, id: TaskId) -> TaskRepositoryResult<&mut Task> {
        self.tasks
            .get_mut(&id)
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    /// Fails with the first identifier that is not stored.
    fn ensure_all_exist(&self, ids: impl IntoIterator<Item = TaskId>) -> TaskRepositoryResult<()> {
        ids.into_iter()
            .find(|id| !self.tasks.contains_key(id))
            .map_or(Ok(()), |missing| Err(TaskRepositoryError::NotFound(missing)))
    }

    fn collect(&self, predicate: impl Fn(&Task) -> bool) -> Vec<Task> {
        self.tasks
            .values()
            .filter(|task| predicate(task))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(state.collect(|_| true))
    }

    async fn list_by_status(&self, statuses: &[TaskStatus]) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(state.collect(|task| statuses.contains(&task.status())))
    }

    async fn list_by_due_date(&self, due_date: DueDate) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(state.collect(|task| task.due_date() == Some(due_date)))
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<TaskId> {
        let mut state = self.write()?;
        let next_id = state.last_id.checked_add(1).ok_or_else(|| {
            TaskRepositoryError::persistence(std::io::Error::other("task identifier overflow"))
        })?;
        let id = TaskId::new(next_id).map_err(TaskRepositoryError::persistence)?;
        state.last_id = next_id;
        state.tasks.insert(id, task.clone().into_task(id));
        Ok(id)
    }

    async fn update_fields(&self, id: TaskId, fields: &TaskFields) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        state.get_mut(id)?.apply_fields(fields.clone());
        Ok(())
    }

    async fn update_status(&self, id: TaskId, status: TaskStatus) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        state.get_mut(id)?.set_explicit_status(status);
        Ok(())
    }

    async fn update_status_batch(&self, batch: &StatusBatch) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        state.ensure_all_exist(batch.keys().copied())?;
        for (id, status) in batch {
            state.get_mut(*id)?.set_explicit_status(*status);
        }
        Ok(())
    }

    async fn update_order_index_batch(&self, order: &ManualOrder) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        state.ensure_all_exist(order.entries().iter().map(|(id, _)| *id))?;
        for (id, index) in order.entries() {
            state.get_mut(*id)?.set_order_index(*index);
        }
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }
}
