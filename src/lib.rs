//! Run SQL and get back strongly typed records.
//!
//! A [`QueryEngine`] owns one [`Driver`] connection. Callers describe their record type with
//! [`Record`] and a [`RowHandler`] (or the [`record_handler!`] macro), and the engine converts
//! each raw row through [`FromRawField`] into a fresh record, appending it to a caller-owned
//! collection of either values or boxes.

#[macro_use]
mod macros;

pub mod config;
pub mod conversion;
pub mod driver;
pub mod engine;
pub mod error;
pub mod handler;
pub mod prelude;
pub mod record;
pub mod results;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{ConnectOptions, ConnectOptionsBuilder, EngineOptions, FetchGapPolicy};
pub use conversion::{FromRawField, convert_field};
pub use driver::Driver;
pub use engine::{QueryEngine, QueryOutcome};
pub use error::{DriverError, ErrorKind, FieldError, QueryError};
pub use handler::{FieldReader, RowHandler, check_field_count};
pub use record::{Holder, Record};
pub use results::{BufferedResult, BufferedRow, RawRow, ResultHandle, ResultSlot};
