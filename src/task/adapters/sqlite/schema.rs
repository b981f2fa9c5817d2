//! Diesel schema for task persistence.

diesel::table! {
    /// Task records for the to-do board.
    tasks (id) {
        /// Store-assigned task identifier.
        id -> BigInt,
        /// Non-empty task title.
        title -> Text,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Optional `YYYY-MM-DD` due date.
        due_date -> Nullable<Text>,
        /// Lifecycle status literal.
        status -> Text,
        /// Manual order index; unset or zero resolves to the identifier.
        order_index -> Nullable<BigInt>,
    }
}

/// Idempotent DDL creating the `tasks` table.
pub const CREATE_TASKS_TABLE: &str = concat!(
    "CREATE TABLE IF NOT EXISTS tasks (",
    "id INTEGER PRIMARY KEY AUTOINCREMENT, ",
    "title TEXT NOT NULL, ",
    "description TEXT, ",
    "due_date TEXT, ",
    "status TEXT NOT NULL DEFAULT 'Pending', ",
    "order_index INTEGER DEFAULT 0",
    ")",
);

/// Adds the manual order column to tables created before manual ordering.
pub const ADD_ORDER_INDEX_COLUMN: &str = "ALTER TABLE tasks ADD COLUMN order_index INTEGER DEFAULT 0";

/// Lists the columns of the `tasks` table.
pub const TASKS_TABLE_INFO: &str = "PRAGMA table_info(tasks)";

/// Gives rows without a status the default open status.
pub const FILL_MISSING_STATUSES: &str =
    "UPDATE tasks SET status = 'Pending' WHERE status IS NULL OR trim(status) = ''";
