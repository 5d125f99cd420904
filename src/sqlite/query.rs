use rusqlite::Statement;
use rusqlite::types::ValueRef;

use crate::error::DriverError;
use crate::results::{BufferedResult, BufferedRow};

/// Render one `SQLite` value the way a text-protocol client receives it.
///
/// Integers and reals become their decimal text, text is passed through, blobs are copied
/// verbatim and NULL stays `None`.
#[must_use]
pub fn render_value(value: ValueRef<'_>) -> Option<Vec<u8>> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string().into_bytes()),
        ValueRef::Real(f) => Some(f.to_string().into_bytes()),
        ValueRef::Text(s) => Some(s.to_vec()),
        ValueRef::Blob(b) => Some(b.to_vec()),
    }
}

/// Run a prepared statement that has columns and buffer all of its rows.
///
/// # Errors
/// Returns `DriverError` if stepping the statement or reading a column fails.
pub fn build_result_set(stmt: &mut Statement<'_>) -> Result<BufferedResult, DriverError> {
    let column_count = stmt.column_count();
    let mut rows_iter = stmt.query([])?;
    let mut rows = Vec::new();

    while let Some(row) = rows_iter.next()? {
        let mut values = Vec::with_capacity(column_count);
        for i in 0..column_count {
            values.push(render_value(row.get_ref(i)?));
        }
        rows.push(Some(BufferedRow::new(values)));
    }

    Ok(BufferedResult::new(column_count, rows))
}
