//! Tests for rows written outside the repository, such as older databases.

use crate::sqlite::helpers::{
    BoxError, PreparedRepo, execute_sql, memory_pool, prepared_repo, stored_order_indices,
};
use rstest::rstest;
use taskwell::task::{
    adapters::sqlite::SqliteTaskRepository,
    domain::{SortMode, Task, TaskId, TaskStatus, TaskTitle, TodoList},
    ports::{TaskRepository, TaskRepositoryError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_due_date_reads_as_absent(
    #[future] prepared_repo: Result<PreparedRepo, BoxError>,
) -> Result<(), BoxError> {
    let PreparedRepo { pool, repo } = prepared_repo.await?;
    execute_sql(
        &pool,
        "INSERT INTO tasks (title, due_date, status, order_index) \
         VALUES ('Imported', '31/12/2024', 'Pending', 1)",
    )
    .await?;

    let stored = repo.find_by_id(TaskId::new(1)?).await?.ok_or("task should exist")?;

    assert_eq!(stored.due_date(), None);
    assert_eq!(stored.status(), TaskStatus::Pending);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unset_order_index_falls_back_to_id(
    #[future] prepared_repo: Result<PreparedRepo, BoxError>,
) -> Result<(), BoxError> {
    let PreparedRepo { pool, repo } = prepared_repo.await?;
    execute_sql(
        &pool,
        "INSERT INTO tasks (title, status, order_index) VALUES \
         ('Zero', 'Pending', 0), ('Null', 'Pending', NULL), ('Explicit', 'Pending', 2)",
    )
    .await?;

    let tasks = repo.list_all().await?;
    let indices: Vec<i64> = tasks
        .iter()
        .map(|task| task.order_index().value())
        .collect();
    let manual: Vec<i64> = TodoList::sorted(&tasks, SortMode::Manual)
        .ids()
        .into_iter()
        .map(TaskId::value)
        .collect();

    assert_eq!(indices, vec![1, 2, 2]);
    assert_eq!(manual, vec![1, 2, 3]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_status_literal_is_a_persistence_error(
    #[future] prepared_repo: Result<PreparedRepo, BoxError>,
) -> Result<(), BoxError> {
    let PreparedRepo { pool, repo } = prepared_repo.await?;
    execute_sql(
        &pool,
        "INSERT INTO tasks (title, status) VALUES ('Odd', 'Archived')",
    )
    .await?;

    let result = repo.list_all().await;

    assert!(matches!(result, Err(TaskRepositoryError::Persistence(_))));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn initialize_upgrades_table_without_order_index() -> Result<(), BoxError> {
    let pool = memory_pool()?;
    execute_sql(
        &pool,
        "CREATE TABLE tasks (id INTEGER PRIMARY KEY AUTOINCREMENT, title TEXT NOT NULL, \
         description TEXT, due_date TEXT, status TEXT)",
    )
    .await?;
    execute_sql(
        &pool,
        "INSERT INTO tasks (title, status) VALUES ('Old', 'Pending'), ('Older', NULL)",
    )
    .await?;
    let repo = SqliteTaskRepository::new(pool.clone());

    repo.initialize().await?;
    repo.initialize().await?;
    let tasks = repo.list_all().await?;
    let indices: Vec<i64> = tasks
        .iter()
        .map(|task| task.order_index().value())
        .collect();
    let statuses: Vec<TaskStatus> = tasks.iter().map(Task::status).collect();

    assert_eq!(indices, vec![1, 2]);
    assert_eq!(statuses, vec![TaskStatus::Pending, TaskStatus::Pending]);
    assert_eq!(
        stored_order_indices(&pool).await?,
        vec![(1, Some(0)), (2, Some(0))]
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_title_and_status_read_as_defaults(
    #[future] prepared_repo: Result<PreparedRepo, BoxError>,
) -> Result<(), BoxError> {
    let PreparedRepo { pool, repo } = prepared_repo.await?;
    execute_sql(
        &pool,
        "INSERT INTO tasks (title, status) VALUES ('   ', 'Done'), ('Blank status', ' ')",
    )
    .await?;

    let tasks = repo.list_all().await?;
    let titles: Vec<&str> = tasks.iter().map(|task| task.title().as_str()).collect();
    let statuses: Vec<TaskStatus> = tasks.iter().map(Task::status).collect();

    assert_eq!(titles, vec![TaskTitle::UNTITLED, "Blank status"]);
    assert_eq!(statuses, vec![TaskStatus::Done, TaskStatus::Pending]);
    Ok(())
}
