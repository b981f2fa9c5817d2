//! Shared world state for task status BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use rstest::fixture;
use taskwell::task::{
    adapters::{clock::FixedClock, memory::InMemoryTaskRepository},
    domain::TaskId,
    services::{TaskLifecycleError, TaskLifecycleService},
};

/// Service type used by the BDD world.
pub type TestTaskService = TaskLifecycleService<InMemoryTaskRepository, FixedClock>;

/// Scenario world for task status behaviour tests.
#[derive(Default)]
pub struct TaskStatusWorld {
    pub repository: Arc<InMemoryTaskRepository>,
    pub today: Option<NaiveDate>,
    pub tasks_by_title: HashMap<String, TaskId>,
    pub last_status_error: Option<TaskLifecycleError>,
}

impl TaskStatusWorld {
    /// Builds a service whose clock reads the scenario's current date.
    ///
    /// # Errors
    ///
    /// Returns an error when no date has been set for the scenario.
    pub fn service(&self) -> Result<TestTaskService, eyre::Report> {
        let today = self
            .today
            .ok_or_else(|| eyre::eyre!("scenario has not set today's date"))?;
        Ok(TaskLifecycleService::new(
            Arc::clone(&self.repository),
            Arc::new(FixedClock::on(today)),
        ))
    }

    /// Looks up a task created earlier in the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when no task with that title exists.
    pub fn task_id(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.tasks_by_title
            .get(title)
            .copied()
            .ok_or_else(|| eyre::eyre!("no task titled {title} in scenario world"))
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskStatusWorld {
    TaskStatusWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
