use thiserror::Error;

/// Failure converting one raw column value into a typed field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("unexpected NULL")]
    UnexpectedNull,

    #[error("column {index} is not present in the row")]
    MissingColumn { index: usize },

    #[error("reported length {length} exceeds the {available} buffered bytes")]
    LengthOutOfBounds { length: usize, available: usize },

    #[error("expected exactly {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("value is not valid UTF-8")]
    InvalidUtf8,

    #[error("cannot parse {text:?} as {target}")]
    Parse { target: &'static str, text: String },
}

/// Errors reported by a [`Driver`](crate::driver::Driver) implementation.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("driver is not connected")]
    NotConnected,

    #[error("Connection error: {0}")]
    Connect(String),

    #[error("SQL execution error: {0}")]
    Execute(String),

    #[error("Result fetch error: {0}")]
    Fetch(String),

    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

/// Coarse classification of a [`QueryError`], handy for matching in callers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ConnectionNotInitialized,
    Connection,
    QueryExecution,
    ResultFetch,
    SchemaMismatch,
    FieldConversion,
    RowConversion,
    Config,
    Backend,
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("client connection is not initialized")]
    ConnectionNotInitialized,

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("{sql} failed; error: {message}")]
    QueryExecution { sql: String, message: String },

    #[error("failed to get the result: {0}")]
    ResultFetch(String),

    #[error("record declares {expected} fields but the result has {actual} columns")]
    SchemaMismatch { expected: usize, actual: usize },

    #[error("failed to get {field} (column {index}): {source}")]
    FieldConversion {
        field: &'static str,
        index: usize,
        #[source]
        source: FieldError,
    },

    #[error("failed to handle row {row}: {source}")]
    RowConversion {
        row: usize,
        #[source]
        source: Box<QueryError>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

impl QueryError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            QueryError::ConnectionNotInitialized => ErrorKind::ConnectionNotInitialized,
            QueryError::Connection(_) => ErrorKind::Connection,
            QueryError::QueryExecution { .. } => ErrorKind::QueryExecution,
            QueryError::ResultFetch(_) => ErrorKind::ResultFetch,
            QueryError::SchemaMismatch { .. } => ErrorKind::SchemaMismatch,
            QueryError::FieldConversion { .. } => ErrorKind::FieldConversion,
            QueryError::RowConversion { .. } => ErrorKind::RowConversion,
            QueryError::Config(_) => ErrorKind::Config,
            #[cfg(feature = "sqlite")]
            QueryError::Sqlite(_) => ErrorKind::Backend,
        }
    }

    /// The innermost error of a [`QueryError::RowConversion`] chain, or `self`.
    #[must_use]
    pub fn root(&self) -> &QueryError {
        match self {
            QueryError::RowConversion { source, .. } => source.root(),
            other => other,
        }
    }
}

impl From<DriverError> for QueryError {
    fn from(err: DriverError) -> Self {
        match err {
            DriverError::NotConnected => QueryError::ConnectionNotInitialized,
            DriverError::Connect(msg) => QueryError::Connection(msg),
            DriverError::Execute(msg) => QueryError::QueryExecution {
                sql: String::new(),
                message: msg,
            },
            DriverError::Fetch(msg) => QueryError::ResultFetch(msg),
            #[cfg(feature = "sqlite")]
            DriverError::Sqlite(e) => QueryError::Sqlite(e),
        }
    }
}
