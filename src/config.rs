use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::QueryError;

/// Connection parameters handed to [`Driver::connect`](crate::driver::Driver::connect).
///
/// Network drivers use all fields; file-backed drivers such as `SQLite` only read `database`.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConnectOptions {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl ConnectOptions {
    #[must_use]
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn builder(database: impl Into<String>) -> ConnectOptionsBuilder {
        ConnectOptionsBuilder::new(database)
    }

    /// Parse options from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::Config` if the document is not valid.
    pub fn from_json_str(json: &str) -> Result<Self, QueryError> {
        let opts: ConnectOptions = serde_json::from_str(json)
            .map_err(|e| QueryError::Config(format!("invalid connect options: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Read options from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::Config` if the file cannot be read or parsed.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, QueryError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| QueryError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// # Errors
    ///
    /// Returns `QueryError::Config` when `database` is empty.
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.database.trim().is_empty() {
            return Err(QueryError::Config("database must not be empty".into()));
        }
        Ok(())
    }
}

impl fmt::Debug for ConnectOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectOptions")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

/// Fluent builder for [`ConnectOptions`].
#[derive(Debug, Clone)]
pub struct ConnectOptionsBuilder {
    opts: ConnectOptions,
}

impl ConnectOptionsBuilder {
    #[must_use]
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            opts: ConnectOptions::new(database),
        }
    }

    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.opts.host = Some(host.into());
        self
    }

    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.opts.port = Some(port);
        self
    }

    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.opts.user = user.into();
        self
    }

    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.opts.password = password.into();
        self
    }

    #[must_use]
    pub fn finish(self) -> ConnectOptions {
        self.opts
    }
}

/// What the engine does when the driver cannot hand over a row it reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchGapPolicy {
    /// Log a warning, count the row as skipped and continue.
    #[default]
    Skip,
    /// Abort the query with `ResultFetch`.
    Fail,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    pub fetch_gap_policy: FetchGapPolicy,
}

impl EngineOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_fetch_gap_policy(mut self, policy: FetchGapPolicy) -> Self {
        self.fetch_gap_policy = policy;
        self
    }
}
