//! Dispatches parsed commands to the task services.

use std::sync::Arc;

use mockable::Clock;
use taskwell::task::{
    domain::{SortMode, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
    services::{CreateTaskRequest, EditTaskRequest, TaskLifecycleService, TodoBoardService},
};
use tracing::debug;

use crate::cli::{Command, Direction, EditArgs};
use crate::render::{self, Format};

/// Runs one command and returns the rendered output.
pub async fn run<R, C>(
    command: Command,
    format: Format,
    repository: Arc<R>,
    clock: Arc<C>,
) -> eyre::Result<String>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    let service = TaskLifecycleService::new(Arc::clone(&repository), Arc::clone(&clock));
    let board = TodoBoardService::new(repository, clock);
    debug!(?command, "running command");

    match command {
        Command::Add {
            title,
            description,
            due,
        } => {
            let mut request = CreateTaskRequest::new(title);
            if let Some(text) = description {
                request = request.with_description(text);
            }
            if let Some(date) = due {
                request = request.with_due_date(date);
            }
            render::task(&service.create_task(request).await?, format)
        }
        Command::List { sort } => render::board(&board.open(sort).await?, format),
        Command::Open => render::tasks(&service.open_work().await?, format),
        Command::Day { date } => render::tasks(&service.due_on(date).await?, format),
        Command::Check { id } => {
            render::task(&service.toggle_done(TaskId::new(id)?, true).await?, format)
        }
        Command::Uncheck { id } => {
            render::task(&service.toggle_done(TaskId::new(id)?, false).await?, format)
        }
        Command::Status { id, status } => {
            render::task(&service.set_status(TaskId::new(id)?, &status).await?, format)
        }
        Command::Edit(args) => edit(&service, args, format).await,
        Command::Delete { id } => {
            let task_id = TaskId::new(id)?;
            service.delete_task(task_id).await?;
            render::deleted(task_id, format)
        }
        Command::Move { id, direction } => move_task(&board, id, direction, format).await,
        Command::Reconcile => render::transitions(&service.reconcile_missed().await?, format),
    }
}

async fn edit<R, C>(
    service: &TaskLifecycleService<R, C>,
    args: EditArgs,
    format: Format,
) -> eyre::Result<String>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    let EditArgs {
        id,
        title,
        description,
        due,
        status,
    } = args;
    let task_id = TaskId::new(id)?;
    let current = service
        .find(task_id)
        .await?
        .ok_or(TaskRepositoryError::NotFound(task_id))?;

    let mut request = EditTaskRequest::new(
        task_id,
        title.unwrap_or_else(|| current.title().to_string()),
        status.unwrap_or_else(|| current.status().to_string()),
    );
    if let Some(text) = description.or_else(|| current.description().map(str::to_owned)) {
        request = request.with_description(text);
    }
    if let Some(date) = due.or_else(|| current.due_date().map(|value| value.to_string())) {
        request = request.with_due_date(date);
    }
    render::task(&service.edit_task(request).await?, format)
}

async fn move_task<R, C>(
    board: &TodoBoardService<R, C>,
    id: i64,
    direction: Direction,
    format: Format,
) -> eyre::Result<String>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    let task_id = TaskId::new(id)?;
    let current = board.open(SortMode::Manual).await?;
    let moved = board.reorder(&current, task_id, direction.into());
    if moved == current {
        return render::board(&current, format);
    }
    render::board(&board.save_order(&moved).await?, format)
}
