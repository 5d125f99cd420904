//! An in-memory [`Driver`] with scripted responses, for exercising the engine without a
//! database.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::ConnectOptions;
use crate::driver::Driver;
use crate::error::DriverError;
use crate::results::{BufferedResult, BufferedRow, RawRow, ResultHandle};

/// How the scripted driver answers one SQL text.
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    /// A result set. `None` rows simulate a failed row fetch.
    Rows {
        columns: usize,
        rows: Vec<Option<BufferedRow>>,
    },
    /// A statement without a result set.
    Statement { affected: u64 },
    /// Columns are reported but the result cannot be stored.
    MissingResult { columns: usize },
    /// The statement is rejected.
    Error(String),
}

impl ScriptedResponse {
    #[must_use]
    pub fn rows(columns: usize, rows: Vec<Option<BufferedRow>>) -> Self {
        Self::Rows { columns, rows }
    }

    /// A result set built from text columns.
    #[must_use]
    pub fn text_rows(columns: usize, rows: &[&[Option<&str>]]) -> Self {
        Self::Rows {
            columns,
            rows: rows
                .iter()
                .map(|r| Some(BufferedRow::from_text(r)))
                .collect(),
        }
    }

    #[must_use]
    pub fn statement(affected: u64) -> Self {
        Self::Statement { affected }
    }

    #[must_use]
    pub fn missing_result(columns: usize) -> Self {
        Self::MissingResult { columns }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }
}

#[derive(Debug, Default)]
struct Counters {
    released: AtomicUsize,
    fetched: AtomicUsize,
}

/// Result handed out by [`ScriptedDriver`]; counts fetches and releases.
#[derive(Debug)]
pub struct ScriptedResult {
    inner: BufferedResult,
    counters: Arc<Counters>,
}

impl ResultHandle for ScriptedResult {
    fn column_count(&self) -> usize {
        self.inner.column_count()
    }

    fn row_count(&self) -> usize {
        self.inner.row_count()
    }

    fn fetch_row(&mut self) -> Option<RawRow<'_>> {
        self.counters.fetched.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_row()
    }

    fn release(&mut self) {
        if !self.inner.is_released() {
            self.counters.released.fetch_add(1, Ordering::SeqCst);
        }
        self.inner.release();
    }
}

enum Pending {
    Rows(BufferedResult),
    Missing,
}

/// Scripted stand-in for a database client.
///
/// Unscripted SQL is rejected with an execution error.
#[derive(Default)]
pub struct ScriptedDriver {
    connected: bool,
    connect_error: Option<String>,
    scripts: HashMap<String, ScriptedResponse>,
    submitted: Vec<String>,
    pending: Option<Pending>,
    field_count: usize,
    affected: u64,
    counters: Arc<Counters>,
}

impl ScriptedDriver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `connect` call fail with `message`.
    #[must_use]
    pub fn failing_connect(message: impl Into<String>) -> Self {
        Self {
            connect_error: Some(message.into()),
            ..Self::default()
        }
    }

    /// Answer `sql` with `response` every time it is submitted.
    pub fn script(&mut self, sql: impl Into<String>, response: ScriptedResponse) -> &mut Self {
        self.scripts.insert(sql.into(), response);
        self
    }

    /// Let subsequent `connect` calls succeed.
    pub fn clear_connect_error(&mut self) {
        self.connect_error = None;
    }

    /// SQL texts submitted so far, in order.
    #[must_use]
    pub fn submitted(&self) -> &[String] {
        &self.submitted
    }

    /// Number of results released so far.
    #[must_use]
    pub fn released(&self) -> usize {
        self.counters.released.load(Ordering::SeqCst)
    }

    /// Number of row fetches attempted so far.
    #[must_use]
    pub fn rows_fetched(&self) -> usize {
        self.counters.fetched.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for ScriptedDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedDriver")
            .field("connected", &self.connected)
            .field("scripts", &self.scripts.len())
            .field("submitted", &self.submitted)
            .finish_non_exhaustive()
    }
}

impl Driver for ScriptedDriver {
    type Result = ScriptedResult;

    fn connect(&mut self, _options: &ConnectOptions) -> Result<(), DriverError> {
        if let Some(message) = &self.connect_error {
            self.connected = false;
            return Err(DriverError::Connect(message.clone()));
        }
        self.connected = true;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn submit_query(&mut self, sql: &str) -> Result<(), DriverError> {
        if !self.connected {
            return Err(DriverError::NotConnected);
        }
        self.submitted.push(sql.to_string());
        self.pending = None;
        self.field_count = 0;
        self.affected = 0;
        match self.scripts.get(sql).cloned() {
            Some(ScriptedResponse::Rows { columns, rows }) => {
                self.field_count = columns;
                self.pending = Some(Pending::Rows(BufferedResult::new(columns, rows)));
                Ok(())
            }
            Some(ScriptedResponse::Statement { affected }) => {
                self.affected = affected;
                Ok(())
            }
            Some(ScriptedResponse::MissingResult { columns }) => {
                self.field_count = columns;
                self.pending = Some(Pending::Missing);
                Ok(())
            }
            Some(ScriptedResponse::Error(message)) => Err(DriverError::Execute(message)),
            None => Err(DriverError::Execute(format!("no script for {sql:?}"))),
        }
    }

    fn store_result(&mut self) -> Result<Option<Self::Result>, DriverError> {
        match self.pending.take() {
            Some(Pending::Rows(inner)) => Ok(Some(ScriptedResult {
                inner,
                counters: Arc::clone(&self.counters),
            })),
            Some(Pending::Missing) | None => Ok(None),
        }
    }

    fn field_count(&self) -> usize {
        self.field_count
    }

    fn affected_rows(&self) -> u64 {
        self.affected
    }
}
