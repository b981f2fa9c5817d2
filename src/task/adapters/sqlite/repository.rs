//! `SQLite` repository implementation for task storage.

use super::{
    config::SqliteConfig,
    models::{ColumnInfo, NewTaskRow, TaskFieldsChangeset, TaskRow},
    schema::{
        ADD_ORDER_INDEX_COLUMN, CREATE_TASKS_TABLE, FILL_MISSING_STATUSES, TASKS_TABLE_INFO,
        tasks,
    },
};
use crate::task::{
    domain::{
        DueDate, ManualOrder, NewTask, OrderIndex, PersistedTaskData, Task, TaskFields, TaskId,
        TaskStatus, TaskTitle,
    },
    ports::{StatusBatch, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::result::Error as DieselError;
use diesel::sqlite::SqliteConnection;
use std::time::Duration;
use tracing::{debug, info, warn};

/// `SQLite` connection pool type used by task adapters.
pub type TaskSqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// `SQLite`-backed task repository.
#[derive(Debug, Clone)]
pub struct SqliteTaskRepository {
    pool: TaskSqlitePool,
}

/// Failure inside a write transaction.
#[derive(Debug)]
enum WriteError {
    Database(DieselError),
    Missing(TaskId),
}

impl From<DieselError> for WriteError {
    fn from(err: DieselError) -> Self {
        Self::Database(err)
    }
}

impl From<WriteError> for TaskRepositoryError {
    fn from(err: WriteError) -> Self {
        match err {
            WriteError::Database(source) => Self::persistence(source),
            WriteError::Missing(id) => Self::NotFound(id),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct BusyTimeout(Duration);

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for BusyTimeout {
    fn on_acquire(&self, connection: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        connection
            .batch_execute(&format!("PRAGMA busy_timeout = {};", self.0.as_millis()))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

impl SqliteTaskRepository {
    /// Creates a new repository from an existing connection pool.
    #[must_use]
    pub const fn new(pool: TaskSqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool for `config` and creates the schema if needed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the pool cannot be
    /// built or the schema cannot be created.
    pub async fn connect(config: &SqliteConfig) -> TaskRepositoryResult<Self> {
        let manager = ConnectionManager::<SqliteConnection>::new(config.database_url());
        let pool = Pool::builder()
            .max_size(config.max_connections())
            .idle_timeout(None)
            .max_lifetime(None)
            .connection_customizer(Box::new(BusyTimeout(config.busy_timeout())))
            .build(manager)
            .map_err(TaskRepositoryError::persistence)?;
        let repository = Self::new(pool);
        repository.initialize().await?;
        debug!(database = config.database_url(), "opened task store");
        Ok(repository)
    }

    /// Creates the `tasks` table when it does not exist and upgrades tables
    /// written by older versions.
    ///
    /// Older tables gain the `order_index` column, and rows without a status
    /// become `Pending`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the DDL fails.
    pub async fn initialize(&self) -> TaskRepositoryResult<()> {
        self.run_blocking(|connection| {
            connection
                .transaction::<(), DieselError, _>(|tx| {
                    tx.batch_execute(CREATE_TASKS_TABLE)?;
                    let columns = diesel::sql_query(TASKS_TABLE_INFO).load::<ColumnInfo>(tx)?;
                    if !columns.iter().any(|column| column.name == "order_index") {
                        tx.batch_execute(ADD_ORDER_INDEX_COLUMN)?;
                        info!("added order_index column to tasks table");
                    }
                    let filled = diesel::sql_query(FILL_MISSING_STATUSES).execute(tx)?;
                    if filled > 0 {
                        warn!(count = filled, "set missing task statuses to Pending");
                    }
                    Ok(())
                })
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut SqliteConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(|connection| {
            let rows = tasks::table
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list_by_status(&self, statuses: &[TaskStatus]) -> TaskRepositoryResult<Vec<Task>> {
        let literals: Vec<&'static str> = statuses.iter().map(|status| status.as_str()).collect();
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::status.eq_any(literals))
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list_by_due_date(&self, due_date: DueDate) -> TaskRepositoryResult<Vec<Task>> {
        let date_text = due_date.to_string();
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::due_date.eq(date_text))
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.value())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<TaskId> {
        let new_row = to_new_row(task);
        let assign_default_order = task.order_index().is_none();

        let raw_id = self
            .run_blocking(move |connection| {
                connection
                    .transaction::<i64, DieselError, _>(|tx| {
                        let id = diesel::insert_into(tasks::table)
                            .values(&new_row)
                            .returning(tasks::id)
                            .get_result::<i64>(tx)?;
                        if assign_default_order {
                            diesel::update(tasks::table.find(id))
                                .set(tasks::order_index.eq(id))
                                .execute(tx)?;
                        }
                        Ok(id)
                    })
                    .map_err(TaskRepositoryError::persistence)
            })
            .await?;
        TaskId::new(raw_id).map_err(TaskRepositoryError::persistence)
    }

    async fn update_fields(&self, id: TaskId, fields: &TaskFields) -> TaskRepositoryResult<()> {
        let changeset = TaskFieldsChangeset {
            title: fields.title.as_str().to_owned(),
            description: fields.description.clone(),
            due_date: fields.due_date.map(|due| due.to_string()),
            status: fields.status.as_str().to_owned(),
        };
        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.find(id.value()))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            ensure_affected(affected, id)
        })
        .await
    }

    async fn update_status(&self, id: TaskId, status: TaskStatus) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.find(id.value()))
                .set(tasks::status.eq(status.as_str()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            ensure_affected(affected, id)
        })
        .await
    }

    async fn update_status_batch(&self, batch: &StatusBatch) -> TaskRepositoryResult<()> {
        let entries: Vec<(TaskId, TaskStatus)> =
            batch.iter().map(|(id, status)| (*id, *status)).collect();
        debug!(count = entries.len(), "applying status batch");
        self.run_blocking(move |connection| {
            connection
                .transaction::<(), WriteError, _>(|tx| {
                    for (id, status) in entries {
                        let affected = diesel::update(tasks::table.find(id.value()))
                            .set(tasks::status.eq(status.as_str()))
                            .execute(tx)?;
                        if affected == 0 {
                            return Err(WriteError::Missing(id));
                        }
                    }
                    Ok(())
                })
                .map_err(TaskRepositoryError::from)
        })
        .await
    }

    async fn update_order_index_batch(&self, order: &ManualOrder) -> TaskRepositoryResult<()> {
        let entries = order.entries().to_vec();
        debug!(count = entries.len(), "applying order index batch");
        self.run_blocking(move |connection| {
            connection
                .transaction::<(), WriteError, _>(|tx| {
                    for (id, index) in entries {
                        let affected = diesel::update(tasks::table.find(id.value()))
                            .set(tasks::order_index.eq(index.value()))
                            .execute(tx)?;
                        if affected == 0 {
                            return Err(WriteError::Missing(id));
                        }
                    }
                    Ok(())
                })
                .map_err(TaskRepositoryError::from)
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.find(id.value()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            ensure_affected(affected, id)
        })
        .await
    }
}

const fn ensure_affected(affected: usize, id: TaskId) -> TaskRepositoryResult<()> {
    if affected == 0 {
        return Err(TaskRepositoryError::NotFound(id));
    }
    Ok(())
}

fn to_new_row(task: &NewTask) -> NewTaskRow {
    NewTaskRow {
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        due_date: task.due_date().map(|due| due.to_string()),
        status: task.initial_status().as_str().to_owned(),
        order_index: task.order_index().map(OrderIndex::value),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id: raw_id,
        title: persisted_title,
        description,
        due_date: persisted_due_date,
        status: persisted_status,
        order_index,
    } = row;

    let id = TaskId::new(raw_id).map_err(TaskRepositoryError::persistence)?;
    let title = TaskTitle::new(persisted_title).unwrap_or_else(|_| {
        warn!(task_id = %id, "showing blank title as untitled");
        TaskTitle::untitled()
    });
    let status = if persisted_status.trim().is_empty() {
        warn!(task_id = %id, "reading blank status as Pending");
        TaskStatus::Pending
    } else {
        TaskStatus::try_from(persisted_status.as_str()).map_err(TaskRepositoryError::persistence)?
    };
    let due_date = persisted_due_date.as_deref().and_then(|raw| {
        let parsed = DueDate::from_persisted(raw);
        if parsed.is_none() {
            warn!(task_id = %id, due_date = raw, "ignoring malformed due date");
        }
        parsed
    });

    Ok(Task::from_persisted(PersistedTaskData {
        id,
        title,
        description,
        due_date,
        status,
        order_index: OrderIndex::resolve(order_index, id),
    }))
}
