//! The boundary toward the database client library.
//!
//! The engine never talks to a database directly. It drives a [`Driver`], which connects,
//! submits SQL text and stores the result client side, MySQL-style: a statement either yields
//! a stored result or, when it has no columns, an affected-row count.

use crate::config::ConnectOptions;
use crate::error::DriverError;
use crate::results::ResultHandle;

pub trait Driver {
    type Result: ResultHandle;

    /// Establish the connection handle.
    ///
    /// # Errors
    ///
    /// Returns `DriverError::Connect` (or a backend error) when the session cannot be opened.
    fn connect(&mut self, options: &ConnectOptions) -> Result<(), DriverError>;

    fn is_connected(&self) -> bool;

    /// Send SQL text verbatim.
    ///
    /// # Errors
    ///
    /// Returns `DriverError` if the statement is rejected or the transport fails.
    fn submit_query(&mut self, sql: &str) -> Result<(), DriverError>;

    /// Take the result of the last submitted statement. `Ok(None)` when there is none.
    ///
    /// # Errors
    ///
    /// Returns `DriverError::Fetch` if the result could not be retrieved.
    fn store_result(&mut self) -> Result<Option<Self::Result>, DriverError>;

    /// Column count of the last submitted statement.
    fn field_count(&self) -> usize;

    /// Rows changed by the last submitted statement.
    fn affected_rows(&self) -> u64;
}
