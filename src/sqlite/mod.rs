// SQLite driver
//
// - config: opening the database from `ConnectOptions`
// - query: running a statement and buffering its rows as text-protocol bytes
// - connection: the `Driver` implementation

pub mod config;
pub mod connection;
pub mod query;

pub use config::SqliteOptions;
pub use connection::SqliteDriver;
pub use query::build_result_set;
