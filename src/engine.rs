//! The query engine: submit SQL, walk the stored result, collect typed records.

use crate::config::{ConnectOptions, EngineOptions, FetchGapPolicy};
use crate::driver::Driver;
use crate::error::QueryError;
use crate::handler::{RowHandler, check_field_count};
use crate::record::{Holder, Record};
use crate::results::{ResultHandle, ResultSlot};

/// What a successful [`QueryEngine::query`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryOutcome {
    /// Records appended to the output collection by this call.
    pub records_added: usize,
    /// Rows the server reported in the result set.
    pub rows_returned: usize,
    /// Rows the driver could not hand over and that were skipped.
    pub rows_skipped: usize,
    /// Affected-row count of a statement without a result set.
    pub rows_affected: u64,
    /// Whether the statement produced a result set at all.
    pub has_result_set: bool,
}

impl QueryOutcome {
    fn statement(rows_affected: u64) -> Self {
        Self {
            rows_affected,
            ..Self::default()
        }
    }

    fn result_set(rows_returned: usize) -> Self {
        Self {
            rows_returned,
            has_result_set: true,
            ..Self::default()
        }
    }
}

/// Owns one driver connection and runs queries against it.
///
/// Not meant to be shared between threads without external locking; every operation takes
/// `&mut self` and blocks until the driver answers.
///
/// ```rust,no_run
/// # fn run() -> Result<(), sql_record_binder::QueryError> {
/// use sql_record_binder::prelude::*;
/// use sql_record_binder::record_handler;
/// use sql_record_binder::sqlite::SqliteDriver;
///
/// #[derive(Debug, Default)]
/// struct Row {
///     id: i64,
///     name: String,
/// }
/// record_handler!(Row => RowsHandler { id, name });
///
/// let mut engine = QueryEngine::new(SqliteDriver::new());
/// engine.connect(&ConnectOptions::new("app.db"))?;
/// let mut rows: Vec<Row> = Vec::new();
/// engine.query(&RowsHandler, "SELECT id, name FROM t ORDER BY id", &mut rows)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct QueryEngine<D: Driver> {
    driver: D,
    options: EngineOptions,
}

impl<D: Driver> QueryEngine<D> {
    #[must_use]
    pub fn new(driver: D) -> Self {
        Self::with_options(driver, EngineOptions::default())
    }

    #[must_use]
    pub fn with_options(driver: D, options: EngineOptions) -> Self {
        Self { driver, options }
    }

    #[must_use]
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn set_fetch_gap_policy(&mut self, policy: FetchGapPolicy) {
        self.options.fetch_gap_policy = policy;
    }

    #[must_use]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.driver.is_connected()
    }

    /// Open the connection handle.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::Config` for unusable options and `QueryError::Connection` (or a
    /// backend error) when the driver cannot connect. Retrying with corrected options is fine.
    pub fn connect(&mut self, options: &ConnectOptions) -> Result<(), QueryError> {
        let res = options
            .validate()
            .and_then(|()| self.driver.connect(options).map_err(QueryError::from));
        match &res {
            Ok(()) => tracing::debug!(database = %options.database, "connected"),
            Err(err) => tracing::error!(database = %options.database, error = %err, "connect failed"),
        }
        res
    }

    /// Run `sql` and append one record per successfully converted row to `out`.
    ///
    /// Rows are appended in server order. A statement without a result set succeeds with no
    /// records and reports its affected-row count in the outcome. The stored result is
    /// released before returning, on success and on every error.
    ///
    /// # Errors
    ///
    /// - `ConnectionNotInitialized` if `connect` has not succeeded
    /// - `QueryExecution` if the driver rejects the SQL
    /// - `ResultFetch` if a result was expected but unavailable (or a row was missing under
    ///   [`FetchGapPolicy::Fail`])
    /// - `SchemaMismatch` if the record's field count differs from the column count
    /// - `RowConversion` if a row fails to convert; records appended for earlier rows stay in
    ///   `out`, later rows are not attempted
    pub fn query<H, C>(
        &mut self,
        handler: &H,
        sql: &str,
        out: &mut Vec<C>,
    ) -> Result<QueryOutcome, QueryError>
    where
        H: RowHandler,
        C: Holder<H::Record>,
    {
        let res = self.run_query(handler, sql, out);
        match &res {
            Ok(outcome) => tracing::debug!(
                sql,
                records = outcome.records_added,
                skipped = outcome.rows_skipped,
                "query finished"
            ),
            Err(err) => tracing::error!(sql, error = %err, "query failed"),
        }
        res
    }

    fn run_query<H, C>(
        &mut self,
        handler: &H,
        sql: &str,
        out: &mut Vec<C>,
    ) -> Result<QueryOutcome, QueryError>
    where
        H: RowHandler,
        C: Holder<H::Record>,
    {
        if !self.driver.is_connected() {
            return Err(QueryError::ConnectionNotInitialized);
        }

        tracing::debug!(sql, "submitting query");
        self.driver
            .submit_query(sql)
            .map_err(|e| QueryError::QueryExecution {
                sql: sql.to_string(),
                message: e.to_string(),
            })?;

        let stored = self
            .driver
            .store_result()
            .map_err(|e| QueryError::ResultFetch(e.to_string()))?;

        let Some(result) = stored else {
            if self.driver.field_count() == 0 {
                let affected = self.driver.affected_rows();
                tracing::info!(rows_affected = affected, "empty result, statement has no result set");
                return Ok(QueryOutcome::statement(affected));
            }
            return Err(QueryError::ResultFetch(format!(
                "statement reported {} columns but no result set",
                self.driver.field_count()
            )));
        };

        let mut slot = ResultSlot::new(result);
        let res = collect_rows(self.options.fetch_gap_policy, handler, &mut slot, out);
        slot.release();
        res
    }
}

fn collect_rows<H, C, R>(
    policy: FetchGapPolicy,
    handler: &H,
    slot: &mut ResultSlot<R>,
    out: &mut Vec<C>,
) -> Result<QueryOutcome, QueryError>
where
    H: RowHandler,
    C: Holder<H::Record>,
    R: ResultHandle,
{
    let Some(result) = slot.get_mut() else {
        return Err(QueryError::ResultFetch("result already released".into()));
    };

    let row_count = result.row_count();
    let mut outcome = QueryOutcome::result_set(row_count);
    if row_count == 0 {
        tracing::info!("got result set, no rows");
        return Ok(outcome);
    }

    check_field_count(<H::Record as Record>::FIELD_COUNT, result.column_count())?;

    for index in 0..row_count {
        let Some(row) = result.fetch_row() else {
            match policy {
                FetchGapPolicy::Skip => {
                    tracing::warn!(row = index, "row unavailable from driver, skipping");
                    outcome.rows_skipped += 1;
                    continue;
                }
                FetchGapPolicy::Fail => {
                    return Err(QueryError::ResultFetch(format!(
                        "row {index} unavailable from driver"
                    )));
                }
            }
        };

        let mut instance = C::make_instance();
        handler
            .handle_row(&row, instance.record_mut())
            .map_err(|source| QueryError::RowConversion {
                row: index,
                source: Box::new(source),
            })?;
        out.push(instance);
        outcome.records_added += 1;
    }

    Ok(outcome)
}
