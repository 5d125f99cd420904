use clap::Parser;
use std::path::PathBuf;

use sql_record_binder::{ConnectOptions, QueryError};

#[derive(Parser, Debug)]
#[command(author, version, about = "Print employees fetched through sql-record-binder")]
pub(crate) struct Args {
    /// SQLite database path
    #[arg(long, default_value = ":memory:")]
    pub(crate) database: String,
    /// JSON file with connect options; overrides --database
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
    /// Query to run; must return the six employee columns
    #[arg(long)]
    pub(crate) sql: Option<String>,
    #[arg(long, default_value_t = 10)]
    pub(crate) limit: usize,
    /// Create and fill a demo employees table first
    #[arg(long)]
    pub(crate) seed: bool,
    #[arg(long, short)]
    pub(crate) verbose: bool,
}

impl Args {
    pub(crate) fn connect_options(&self) -> Result<ConnectOptions, QueryError> {
        match &self.config {
            Some(path) => ConnectOptions::from_json_file(path),
            None => Ok(ConnectOptions::builder(self.database.clone())
                .user("test")
                .password("test")
                .finish()),
        }
    }

    pub(crate) fn query(&self) -> String {
        self.sql.clone().unwrap_or_else(|| {
            format!(
                "SELECT * FROM employees ORDER BY first_name LIMIT {}",
                self.limit
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_query_uses_limit() {
        let args = Args::parse_from(["employees", "--limit", "3"]);
        assert_eq!(
            args.query(),
            "SELECT * FROM employees ORDER BY first_name LIMIT 3"
        );
        assert_eq!(args.connect_options().unwrap().database, ":memory:");
    }

    #[test]
    fn explicit_sql_wins() {
        let args = Args::parse_from(["employees", "--sql", "SELECT 1"]);
        assert_eq!(args.query(), "SELECT 1");
    }
}
