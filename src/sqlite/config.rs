use rusqlite::Connection;

use crate::config::ConnectOptions;
use crate::error::DriverError;

/// Options for opening a `SQLite` database.
#[derive(Debug, Clone)]
pub struct SqliteOptions {
    pub db_path: String,
    pub wal: bool,
}

impl SqliteOptions {
    #[must_use]
    pub fn new(db_path: String) -> Self {
        Self { db_path, wal: true }
    }

    #[must_use]
    pub fn with_wal(mut self, wal: bool) -> Self {
        self.wal = wal;
        self
    }

    /// `SQLite` has no server, so only `database` (the file path) is used.
    #[must_use]
    pub fn from_connect_options(opts: &ConnectOptions) -> Self {
        if opts.host.is_some() || opts.port.is_some() {
            tracing::debug!("sqlite ignores host and port");
        }
        Self::new(opts.database.clone())
    }

    #[must_use]
    pub fn is_memory(&self) -> bool {
        self.db_path == ":memory:" || self.db_path.starts_with("file::memory:")
    }

    /// Open the database and apply connection pragmas.
    ///
    /// # Errors
    /// Returns `DriverError::Connect` if the database cannot be opened or configured.
    pub fn open(&self) -> Result<Connection, DriverError> {
        let conn = Connection::open(&self.db_path).map_err(|e| {
            DriverError::Connect(format!("failed to open SQLite database {}: {e}", self.db_path))
        })?;
        if self.wal && !self.is_memory() {
            let mode: String = conn
                .query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))
                .map_err(|e| DriverError::Connect(format!("failed to enable WAL: {e}")))?;
            tracing::debug!(journal_mode = %mode, "sqlite opened");
        }
        Ok(conn)
    }
}
