//! Diesel row models for task persistence.

use super::schema::tasks;
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TaskRow {
    /// Task identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional due date text, possibly malformed in legacy rows.
    pub due_date: Option<String>,
    /// Status literal.
    pub status: String,
    /// Optional manual order index.
    pub order_index: Option<i64>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional due date text.
    pub due_date: Option<String>,
    /// Status literal.
    pub status: String,
    /// Explicit manual order index, if requested.
    pub order_index: Option<i64>,
}

/// Full-field update model for the edit form.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskFieldsChangeset {
    /// Replacement title.
    pub title: String,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement due date text.
    pub due_date: Option<String>,
    /// Replacement status literal.
    pub status: String,
}

/// One row of `PRAGMA table_info`.
#[derive(Debug, Clone, QueryableByName)]
pub struct ColumnInfo {
    /// Column name.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub name: String,
}
