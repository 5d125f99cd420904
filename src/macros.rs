/// Declare a [`Record`](crate::Record) and a matching [`RowHandler`](crate::RowHandler) for a
/// plain struct whose fields map one-to-one, in order, onto the query's columns.
///
/// ```rust
/// use sql_record_binder::record_handler;
///
/// #[derive(Debug, Default)]
/// pub struct Department {
///     dept_no: String,
///     dept_name: String,
/// }
///
/// record_handler!(Department => pub DepartmentHandler { dept_no, dept_name });
///
/// use sql_record_binder::Record;
/// assert_eq!(Department::FIELD_COUNT, 2);
/// ```
#[macro_export]
macro_rules! record_handler {
    (@count) => { 0usize };
    (@count $head:ident $($tail:ident)*) => {
        1usize + $crate::record_handler!(@count $($tail)*)
    };
    ($record:ty => $vis:vis $handler:ident { $($field:ident),+ $(,)? }) => {
        impl $crate::Record for $record {
            const FIELD_COUNT: usize = $crate::record_handler!(@count $($field)+);
        }

        #[derive(Debug, Default, Clone, Copy)]
        $vis struct $handler;

        impl $crate::RowHandler for $handler {
            type Record = $record;

            fn read_fields(
                &self,
                fields: &mut $crate::FieldReader<'_, '_>,
                record: &mut $record,
            ) -> ::std::result::Result<(), $crate::QueryError> {
                $( fields.read_into(stringify!($field), &mut record.$field)?; )+
                Ok(())
            }
        }
    };
}
