//! Shared test helpers for `SQLite` integration tests.

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use rstest::fixture;
use taskwell::task::{
    adapters::sqlite::{SqliteTaskRepository, TaskSqlitePool},
    domain::{DueDate, NewTask, TaskId},
    ports::TaskRepository,
};

/// Error type for test setup.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Repository over a private in-memory database, plus raw pool access.
pub struct PreparedRepo {
    /// Pool shared with the repository; holds the only connection.
    pub pool: TaskSqlitePool,
    /// Repository under test.
    pub repo: SqliteTaskRepository,
}

/// Builds a single-connection in-memory database with the schema applied.
///
/// # Errors
///
/// Returns an error if the pool cannot be built or the schema fails.
#[fixture]
pub async fn prepared_repo() -> Result<PreparedRepo, BoxError> {
    let pool = memory_pool()?;
    let repo = SqliteTaskRepository::new(pool.clone());
    repo.initialize().await?;
    Ok(PreparedRepo { pool, repo })
}

/// Builds a single-connection in-memory pool with no schema.
///
/// # Errors
///
/// Returns an error if the pool cannot be built.
pub fn memory_pool() -> Result<TaskSqlitePool, BoxError> {
    let manager = ConnectionManager::<SqliteConnection>::new(":memory:");
    Pool::builder()
        .max_size(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .build(manager)
        .map_err(|e| Box::new(e) as BoxError)
}

/// Inserts a titled task with an optional due date.
///
/// # Errors
///
/// Returns an error if validation or the insert fails.
pub async fn insert_task(
    repo: &SqliteTaskRepository,
    title: &str,
    due: Option<&str>,
) -> Result<TaskId, BoxError> {
    let mut task = NewTask::new(title)?;
    if let Some(raw) = due {
        task = task.with_due_date(DueDate::parse(raw)?);
    }
    Ok(repo.insert(&task).await?)
}

/// Runs raw SQL against the shared connection.
///
/// # Errors
///
/// Returns an error if the connection or statement fails.
pub async fn execute_sql(pool: &TaskSqlitePool, sql: &'static str) -> Result<usize, BoxError> {
    let shared = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut conn = shared.get().map_err(|e| Box::new(e) as BoxError)?;
        diesel::sql_query(sql)
            .execute(&mut conn)
            .map_err(|e| Box::new(e) as BoxError)
    })
    .await
    .map_err(|e| Box::new(e) as BoxError)?
}

/// Helper struct for reading raw order index values.
#[derive(diesel::QueryableByName)]
pub struct OrderIndexRow {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub id: i64,
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::BigInt>)]
    pub order_index: Option<i64>,
}

/// Reads the stored order index column in identifier order.
///
/// # Errors
///
/// Returns an error if the connection or query fails.
pub async fn stored_order_indices(
    pool: &TaskSqlitePool,
) -> Result<Vec<(i64, Option<i64>)>, BoxError> {
    let shared = pool.clone();
    let rows = tokio::task::spawn_blocking(move || {
        let mut conn = shared.get().map_err(|e| Box::new(e) as BoxError)?;
        diesel::sql_query("SELECT id, order_index FROM tasks ORDER BY id")
            .load::<OrderIndexRow>(&mut conn)
            .map_err(|e| Box::new(e) as BoxError)
    })
    .await
    .map_err(|e| Box::new(e) as BoxError)??;
    Ok(rows.into_iter().map(|row| (row.id, row.order_index)).collect())
}
