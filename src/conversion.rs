//! Field conversion.
//!
//! Every column arrives as raw bytes plus an explicit length. Most targets parse the bytes as
//! text; binary targets (`Vec<u8>`, `[u8; N]`) copy them verbatim so embedded zero bytes
//! survive.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::FieldError;

/// A type that can be produced from one raw column value.
///
/// Implement this for your own field types to take part in row handling:
///
/// ```rust
/// use sql_record_binder::prelude::*;
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Gender(char);
///
/// impl FromRawField for Gender {
///     fn from_raw(bytes: &[u8]) -> Result<Self, FieldError> {
///         match bytes {
///             b"M" | b"F" => Ok(Gender(char::from(bytes[0]))),
///             _ => Err(FieldError::Parse {
///                 target: "Gender",
///                 text: String::from_utf8_lossy(bytes).into_owned(),
///             }),
///         }
///     }
/// }
///
/// assert_eq!(convert_field::<Gender>(Some(&b"F"[..]), 1), Ok(Gender('F')));
/// ```
pub trait FromRawField: Sized {
    /// Convert exactly the bytes of one column.
    ///
    /// # Errors
    ///
    /// Returns `FieldError` if the bytes do not represent a valid value of `Self`.
    fn from_raw(bytes: &[u8]) -> Result<Self, FieldError>;

    /// Value to use for SQL NULL. Only `Option<T>` accepts NULL by default.
    ///
    /// # Errors
    ///
    /// Returns `FieldError::UnexpectedNull` unless overridden.
    fn from_null() -> Result<Self, FieldError> {
        Err(FieldError::UnexpectedNull)
    }
}

/// Convert one column value, honouring the reported byte length.
///
/// `value` is `None` for SQL NULL. Only the first `length` bytes of the buffer are handed to
/// the target type; the buffer is never treated as NUL-terminated.
///
/// # Errors
///
/// Returns `FieldError::LengthOutOfBounds` when `length` exceeds the buffer, or whatever the
/// target's [`FromRawField`] implementation reports.
pub fn convert_field<T: FromRawField>(value: Option<&[u8]>, length: usize) -> Result<T, FieldError> {
    let Some(buf) = value else {
        return T::from_null();
    };
    let bytes = buf.get(..length).ok_or(FieldError::LengthOutOfBounds {
        length,
        available: buf.len(),
    })?;
    let converted = T::from_raw(bytes);
    tracing::trace!(length, ok = converted.is_ok(), "converted field");
    converted
}

fn as_text(bytes: &[u8]) -> Result<&str, FieldError> {
    std::str::from_utf8(bytes).map_err(|_| FieldError::InvalidUtf8)
}

fn parse_trimmed<T: FromStr>(bytes: &[u8], target: &'static str) -> Result<T, FieldError> {
    let text = as_text(bytes)?;
    text.trim_matches(|c: char| c.is_ascii_whitespace())
        .parse::<T>()
        .map_err(|_| FieldError::Parse {
            target,
            text: text.to_string(),
        })
}

macro_rules! impl_from_text {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl FromRawField for $ty {
                fn from_raw(bytes: &[u8]) -> Result<Self, FieldError> {
                    parse_trimmed::<$ty>(bytes, stringify!($ty))
                }
            }
        )+
    };
}

impl_from_text!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

impl FromRawField for bool {
    fn from_raw(bytes: &[u8]) -> Result<Self, FieldError> {
        let text = as_text(bytes)?;
        match text.trim_matches(|c: char| c.is_ascii_whitespace()) {
            "1" => Ok(true),
            "0" => Ok(false),
            t if t.eq_ignore_ascii_case("true") => Ok(true),
            t if t.eq_ignore_ascii_case("false") => Ok(false),
            _ => Err(FieldError::Parse {
                target: "bool",
                text: text.to_string(),
            }),
        }
    }
}

impl FromRawField for char {
    fn from_raw(bytes: &[u8]) -> Result<Self, FieldError> {
        let text = as_text(bytes)?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(FieldError::Parse {
                target: "char",
                text: text.to_string(),
            }),
        }
    }
}

impl FromRawField for String {
    fn from_raw(bytes: &[u8]) -> Result<Self, FieldError> {
        as_text(bytes).map(str::to_string)
    }
}

impl FromRawField for NaiveDate {
    fn from_raw(bytes: &[u8]) -> Result<Self, FieldError> {
        let text = as_text(bytes)?;
        NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|_| FieldError::Parse {
            target: "NaiveDate",
            text: text.to_string(),
        })
    }
}

impl FromRawField for NaiveTime {
    fn from_raw(bytes: &[u8]) -> Result<Self, FieldError> {
        let text = as_text(bytes)?;
        NaiveTime::parse_from_str(text.trim(), "%H:%M:%S%.f").map_err(|_| FieldError::Parse {
            target: "NaiveTime",
            text: text.to_string(),
        })
    }
}

impl FromRawField for NaiveDateTime {
    fn from_raw(bytes: &[u8]) -> Result<Self, FieldError> {
        let text = as_text(bytes)?;
        let trimmed = text.trim();
        // "YYYY-MM-DD HH:MM:SS[.fff]" or the ISO "T" separator
        NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f"))
            .map_err(|_| FieldError::Parse {
                target: "NaiveDateTime",
                text: text.to_string(),
            })
    }
}

impl FromRawField for Vec<u8> {
    fn from_raw(bytes: &[u8]) -> Result<Self, FieldError> {
        Ok(bytes.to_vec())
    }
}

impl<const N: usize> FromRawField for [u8; N] {
    fn from_raw(bytes: &[u8]) -> Result<Self, FieldError> {
        <[u8; N]>::try_from(bytes).map_err(|_| FieldError::LengthMismatch {
            expected: N,
            actual: bytes.len(),
        })
    }
}

impl<T: FromRawField> FromRawField for Option<T> {
    fn from_raw(bytes: &[u8]) -> Result<Self, FieldError> {
        T::from_raw(bytes).map(Some)
    }

    fn from_null() -> Result<Self, FieldError> {
        Ok(None)
    }
}
