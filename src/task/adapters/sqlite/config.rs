//! Connection settings for the `SQLite` task store.

use std::time::Duration;

/// Connection settings for [`super::SqliteTaskRepository`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use taskwell::task::adapters::sqlite::SqliteConfig;
///
/// let config = SqliteConfig::default();
/// assert_eq!(config.database_url(), "tasks.db");
///
/// let ephemeral = SqliteConfig::in_memory();
/// assert_eq!(ephemeral.max_connections(), 1);
///
/// let tuned = SqliteConfig::new("/var/lib/taskwell/tasks.db")
///     .with_max_connections(8)
///     .with_busy_timeout(Duration::from_millis(250));
/// assert_eq!(tuned.max_connections(), 8);
/// assert_eq!(tuned.busy_timeout(), Duration::from_millis(250));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteConfig {
    database_url: String,
    max_connections: u32,
    busy_timeout: Duration,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            database_url: "tasks.db".to_owned(),
            max_connections: 4,
            busy_timeout: Duration::from_secs(5),
        }
    }
}

impl SqliteConfig {
    /// Creates settings for a database file or URL.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Self::default()
        }
    }

    /// Creates settings for a private in-memory database.
    ///
    /// Each `SQLite` connection to `:memory:` opens a separate database, so
    /// the pool is limited to a single connection.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            database_url: ":memory:".to_owned(),
            max_connections: 1,
            ..Self::default()
        }
    }

    /// Sets the maximum number of pooled connections.
    #[must_use]
    pub const fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Sets how long a connection waits on a locked database.
    #[must_use]
    pub const fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }

    /// Returns the database file or URL.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Returns the maximum number of pooled connections.
    #[must_use]
    pub const fn max_connections(&self) -> u32 {
        self.max_connections
    }

    /// Returns the lock wait timeout.
    #[must_use]
    pub const fn busy_timeout(&self) -> Duration {
        self.busy_timeout
    }
}
