use std::fmt;

use rusqlite::Connection;

use crate::config::ConnectOptions;
use crate::driver::Driver;
use crate::error::{DriverError, QueryError};
use crate::results::BufferedResult;

use super::config::SqliteOptions;
use super::query::build_result_set;

/// [`Driver`] backed by a single `rusqlite` connection.
///
/// Statements with columns are run to completion on submit and their rows buffered, the
/// same way a client stores a whole result before iterating it.
#[derive(Default)]
pub struct SqliteDriver {
    conn: Option<Connection>,
    pending: Option<BufferedResult>,
    field_count: usize,
    affected: u64,
}

impl SqliteDriver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already open connection.
    #[must_use]
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Some(conn),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn connection(&self) -> Option<&Connection> {
        self.conn.as_ref()
    }

    /// Run one or more statements without collecting results, e.g. schema setup.
    ///
    /// # Errors
    /// Returns `QueryError::ConnectionNotInitialized` before `connect`, or the `SQLite` error.
    pub fn execute_batch(&mut self, sql: &str) -> Result<(), QueryError> {
        let conn = self
            .conn
            .as_ref()
            .ok_or(QueryError::ConnectionNotInitialized)?;
        conn.execute_batch(sql)?;
        Ok(())
    }

    /// Close the connection, dropping any stored result.
    pub fn close(&mut self) {
        self.pending = None;
        if let Some(conn) = self.conn.take() {
            if let Err((_, e)) = conn.close() {
                tracing::warn!(error = %e, "error closing sqlite connection");
            }
        }
    }
}

impl fmt::Debug for SqliteDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteDriver")
            .field("connected", &self.conn.is_some())
            .field("field_count", &self.field_count)
            .field("affected", &self.affected)
            .finish_non_exhaustive()
    }
}

impl Driver for SqliteDriver {
    type Result = BufferedResult;

    fn connect(&mut self, options: &ConnectOptions) -> Result<(), DriverError> {
        self.close();
        let conn = SqliteOptions::from_connect_options(options).open()?;
        self.conn = Some(conn);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    fn submit_query(&mut self, sql: &str) -> Result<(), DriverError> {
        let conn = self.conn.as_ref().ok_or(DriverError::NotConnected)?;
        self.pending = None;
        self.field_count = 0;
        self.affected = 0;

        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| DriverError::Execute(e.to_string()))?;
        let column_count = stmt.column_count();
        if column_count == 0 {
            let changed = stmt
                .execute([])
                .map_err(|e| DriverError::Execute(e.to_string()))?;
            self.affected = changed as u64;
        } else {
            self.pending = Some(
                build_result_set(&mut stmt).map_err(|e| DriverError::Execute(e.to_string()))?,
            );
        }
        self.field_count = column_count;
        Ok(())
    }

    fn store_result(&mut self) -> Result<Option<Self::Result>, DriverError> {
        Ok(self.pending.take())
    }

    fn field_count(&self) -> usize {
        self.field_count
    }

    fn affected_rows(&self) -> u64 {
        self.affected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::ResultHandle;

    fn connected() -> SqliteDriver {
        let mut driver = SqliteDriver::new();
        driver.connect(&ConnectOptions::new(":memory:")).unwrap();
        driver
    }

    #[test]
    fn submit_before_connect_fails() {
        let mut driver = SqliteDriver::new();
        assert!(matches!(
            driver.submit_query("SELECT 1"),
            Err(DriverError::NotConnected)
        ));
    }

    #[test]
    fn select_is_buffered() {
        let mut driver = connected();
        driver.submit_query("SELECT 1, 'a', NULL").unwrap();
        assert_eq!(driver.field_count(), 3);
        let mut result = driver.store_result().unwrap().unwrap();
        assert_eq!(result.row_count(), 1);
        let row = result.fetch_row().unwrap();
        assert_eq!(row.get::<i32>(0), Ok(1));
        assert_eq!(row.get::<String>(1), Ok("a".to_string()));
        assert_eq!(row.get::<Option<i32>>(2), Ok(None));
        // result is handed over once
        assert!(driver.store_result().unwrap().is_none());
    }

    #[test]
    fn statements_report_affected_rows() {
        let mut driver = connected();
        driver
            .execute_batch("CREATE TABLE t (id INTEGER); INSERT INTO t VALUES (1), (2), (3);")
            .unwrap();
        driver.submit_query("UPDATE t SET id = id + 10 WHERE id > 1").unwrap();
        assert_eq!(driver.field_count(), 0);
        assert_eq!(driver.affected_rows(), 2);
        assert!(driver.store_result().unwrap().is_none());
    }

    #[test]
    fn bad_sql_is_an_execute_error() {
        let mut driver = connected();
        assert!(matches!(
            driver.submit_query("SELEC 1"),
            Err(DriverError::Execute(_))
        ));
    }
}
