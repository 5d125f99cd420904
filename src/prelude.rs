//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and functions
//! to make it easier to get started with the library.

pub use crate::config::{ConnectOptions, EngineOptions, FetchGapPolicy};
pub use crate::conversion::{FromRawField, convert_field};
pub use crate::driver::Driver;
pub use crate::engine::{QueryEngine, QueryOutcome};
pub use crate::error::{ErrorKind, FieldError, QueryError};
pub use crate::handler::{FieldReader, RowHandler};
pub use crate::record::{Holder, Record};
pub use crate::results::{RawRow, ResultHandle};

#[cfg(feature = "sqlite")]
pub use crate::sqlite::SqliteDriver;
