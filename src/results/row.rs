use crate::conversion::{FromRawField, convert_field};
use crate::error::FieldError;

/// One fetched row as the driver hands it over.
///
/// Each column is an optional byte buffer (`None` for SQL NULL) with a parallel byte length.
/// Buffers are not NUL-terminated; only the reported length is meaningful. A `RawRow`
/// borrows from the result it was fetched from, so it cannot outlive the next fetch or the
/// release of that result.
#[derive(Debug, Clone, Copy)]
pub struct RawRow<'a> {
    columns: &'a [Option<Vec<u8>>],
    lengths: &'a [usize],
}

impl<'a> RawRow<'a> {
    #[must_use]
    pub fn new(columns: &'a [Option<Vec<u8>>], lengths: &'a [usize]) -> Self {
        Self { columns, lengths }
    }

    /// Number of columns in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    #[must_use]
    pub fn lengths(&self) -> &'a [usize] {
        self.lengths
    }

    /// Raw buffer and reported length of column `index`.
    ///
    /// # Errors
    ///
    /// Returns `FieldError::MissingColumn` if the row has no such column or no length for it.
    pub fn column(&self, index: usize) -> Result<(Option<&'a [u8]>, usize), FieldError> {
        let value = self
            .columns
            .get(index)
            .ok_or(FieldError::MissingColumn { index })?;
        let length = *self
            .lengths
            .get(index)
            .ok_or(FieldError::MissingColumn { index })?;
        Ok((value.as_deref(), length))
    }

    /// Convert column `index` into `T`.
    ///
    /// # Errors
    ///
    /// Returns `FieldError` if the column is missing or conversion fails.
    pub fn get<T: FromRawField>(&self, index: usize) -> Result<T, FieldError> {
        let (value, length) = self.column(index)?;
        convert_field(value, length)
    }
}

/// An owned row, as buffered by [`BufferedResult`](super::BufferedResult).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferedRow {
    pub values: Vec<Option<Vec<u8>>>,
    pub lengths: Vec<usize>,
}

impl BufferedRow {
    /// Build a row whose lengths are the full buffer sizes (0 for NULL).
    #[must_use]
    pub fn new(values: Vec<Option<Vec<u8>>>) -> Self {
        let lengths = values
            .iter()
            .map(|v| v.as_ref().map_or(0, Vec::len))
            .collect();
        Self { values, lengths }
    }

    /// Convenience for rows whose columns are all text.
    #[must_use]
    pub fn from_text<S: AsRef<str>>(values: &[Option<S>]) -> Self {
        Self::new(
            values
                .iter()
                .map(|v| v.as_ref().map(|s| s.as_ref().as_bytes().to_vec()))
                .collect(),
        )
    }

    #[must_use]
    pub fn as_raw(&self) -> RawRow<'_> {
        RawRow::new(&self.values, &self.lengths)
    }
}
