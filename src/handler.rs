//! Row handlers map one raw row onto one record.

use crate::conversion::{FromRawField, convert_field};
use crate::error::QueryError;
use crate::record::Record;
use crate::results::RawRow;

/// Per-record-type strategy turning a [`RawRow`] into a [`Record`].
///
/// Implementors normally only write [`read_fields`](RowHandler::read_fields); the provided
/// [`handle_row`](RowHandler::handle_row) checks the column count first. The
/// [`record_handler!`](crate::record_handler) macro writes both for plain structs.
pub trait RowHandler {
    type Record: Record;

    /// Read every declared field, in order, into `record`. Stop at the first failure.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::FieldConversion` for the first field that fails.
    fn read_fields(
        &self,
        fields: &mut FieldReader<'_, '_>,
        record: &mut Self::Record,
    ) -> Result<(), QueryError>;

    /// # Errors
    ///
    /// Returns `QueryError::SchemaMismatch` before converting anything if the row's column
    /// count differs from the record's field count, otherwise whatever `read_fields` returns.
    fn handle_row(&self, row: &RawRow<'_>, record: &mut Self::Record) -> Result<(), QueryError> {
        check_field_count(record.field_count(), row.len())?;
        let mut fields = FieldReader::new(row);
        self.read_fields(&mut fields, record)
    }
}

/// # Errors
///
/// Returns `QueryError::SchemaMismatch` when the counts differ.
pub fn check_field_count(expected: usize, actual: usize) -> Result<(), QueryError> {
    if expected == actual {
        Ok(())
    } else {
        Err(QueryError::SchemaMismatch { expected, actual })
    }
}

/// Sequential cursor over the columns of a row.
#[derive(Debug)]
pub struct FieldReader<'r, 'a> {
    row: &'r RawRow<'a>,
    next: usize,
}

impl<'r, 'a> FieldReader<'r, 'a> {
    #[must_use]
    pub fn new(row: &'r RawRow<'a>) -> Self {
        Self { row, next: 0 }
    }

    /// Index of the column the next read will use.
    #[must_use]
    pub fn position(&self) -> usize {
        self.next
    }

    /// Convert the next column into a `T`.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::FieldConversion` naming `field` if conversion fails.
    pub fn read<T: FromRawField>(&mut self, field: &'static str) -> Result<T, QueryError> {
        let index = self.next;
        self.next += 1;
        self.row
            .column(index)
            .and_then(|(value, length)| convert_field(value, length))
            .map_err(|source| QueryError::FieldConversion {
                field,
                index,
                source,
            })
    }

    /// Convert the next column straight into `slot`. `slot` is untouched on failure.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::FieldConversion` naming `field` if conversion fails.
    pub fn read_into<T: FromRawField>(
        &mut self,
        field: &'static str,
        slot: &mut T,
    ) -> Result<(), QueryError> {
        *slot = self.read(field)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, FieldError};
    use crate::results::BufferedRow;

    #[derive(Debug, Default, PartialEq)]
    struct Item {
        id: i32,
        name: String,
        price: f64,
    }

    impl Record for Item {
        const FIELD_COUNT: usize = 3;
    }

    struct ItemHandler;

    impl RowHandler for ItemHandler {
        type Record = Item;

        fn read_fields(
            &self,
            fields: &mut FieldReader<'_, '_>,
            record: &mut Item,
        ) -> Result<(), QueryError> {
            fields.read_into("id", &mut record.id)?;
            fields.read_into("name", &mut record.name)?;
            fields.read_into("price", &mut record.price)?;
            Ok(())
        }
    }

    #[test]
    fn converts_every_field_in_order() {
        let row = BufferedRow::from_text(&[Some("3"), Some("lamp"), Some("19.99")]);
        let mut item = Item::default();
        ItemHandler.handle_row(&row.as_raw(), &mut item).unwrap();
        assert_eq!(
            item,
            Item {
                id: 3,
                name: "lamp".into(),
                price: 19.99
            }
        );
    }

    #[test]
    fn mismatch_converts_nothing() {
        let row = BufferedRow::from_text(&[Some("3"), Some("lamp")]);
        let mut item = Item::default();
        let err = ItemHandler.handle_row(&row.as_raw(), &mut item).unwrap_err();
        assert!(matches!(
            err,
            QueryError::SchemaMismatch {
                expected: 3,
                actual: 2
            }
        ));
        assert_eq!(item, Item::default());
    }

    #[test]
    fn first_failure_short_circuits() {
        let row = BufferedRow::from_text(&[Some("3"), None, Some("19.99")]);
        let mut item = Item::default();
        let err = ItemHandler.handle_row(&row.as_raw(), &mut item).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FieldConversion);
        match err {
            QueryError::FieldConversion {
                field,
                index,
                source,
            } => {
                assert_eq!(field, "name");
                assert_eq!(index, 1);
                assert_eq!(source, FieldError::UnexpectedNull);
            }
            other => panic!("unexpected error: {other}"),
        }
        // id was written, price was never attempted
        assert_eq!(item.id, 3);
        assert_eq!(item.price, 0.0);
    }

    #[test]
    fn reader_tracks_position() {
        let row = BufferedRow::from_text(&[Some("1"), Some("2")]);
        let raw = row.as_raw();
        let mut reader = FieldReader::new(&raw);
        assert_eq!(reader.read::<u8>("a").unwrap(), 1);
        assert_eq!(reader.position(), 1);
        assert_eq!(reader.read::<u8>("b").unwrap(), 2);
        assert!(reader.read::<u8>("c").is_err());
    }
}
