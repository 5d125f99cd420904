pub mod result_set;
pub mod row;

pub use result_set::{BufferedResult, ResultHandle, ResultSlot};
pub use row::{BufferedRow, RawRow};
