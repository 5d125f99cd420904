use super::row::{BufferedRow, RawRow};

/// A stored result set held by the engine for the duration of one query.
pub trait ResultHandle {
    /// Number of columns in every row.
    fn column_count(&self) -> usize;

    /// Number of rows the server reported.
    fn row_count(&self) -> usize;

    /// Fetch the next row. `None` means the row (or its lengths) could not be fetched.
    fn fetch_row(&mut self) -> Option<RawRow<'_>>;

    /// Free the server or client side buffers. Must be safe to call more than once.
    fn release(&mut self);
}

/// A fully client-side buffered result, the shape most drivers hand back after
/// storing a result.
///
/// A `None` entry in `rows` stands for a row the driver failed to fetch.
#[derive(Debug, Clone, Default)]
pub struct BufferedResult {
    column_count: usize,
    rows: Vec<Option<BufferedRow>>,
    cursor: usize,
    released: bool,
}

impl BufferedResult {
    #[must_use]
    pub fn new(column_count: usize, rows: Vec<Option<BufferedRow>>) -> Self {
        Self {
            column_count,
            rows,
            cursor: 0,
            released: false,
        }
    }

    #[must_use]
    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl ResultHandle for BufferedResult {
    fn column_count(&self) -> usize {
        self.column_count
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn fetch_row(&mut self) -> Option<RawRow<'_>> {
        if self.released {
            return None;
        }
        let index = self.cursor;
        self.cursor += 1;
        self.rows.get(index)?.as_ref().map(BufferedRow::as_raw)
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.rows = Vec::new();
        self.released = true;
    }
}

/// Owns at most one result and releases it exactly once: on [`ResultSlot::release`] or on
/// drop, whichever comes first.
#[derive(Debug)]
pub struct ResultSlot<R: ResultHandle> {
    result: Option<R>,
}

impl<R: ResultHandle> ResultSlot<R> {
    #[must_use]
    pub fn new(result: R) -> Self {
        Self {
            result: Some(result),
        }
    }

    /// A slot that never acquired a result.
    #[must_use]
    pub fn empty() -> Self {
        Self { result: None }
    }

    #[must_use]
    pub fn is_held(&self) -> bool {
        self.result.is_some()
    }

    pub fn get_mut(&mut self) -> Option<&mut R> {
        self.result.as_mut()
    }

    /// Release the held result, if any. Calling this again is a no-op.
    pub fn release(&mut self) {
        if let Some(mut result) = self.result.take() {
            result.release();
            tracing::trace!("result released");
        }
    }
}

impl<R: ResultHandle> Drop for ResultSlot<R> {
    fn drop(&mut self) {
        self.release();
    }
}
