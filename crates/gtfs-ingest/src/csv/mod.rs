//! CSV reading and header validation.

mod header;
mod reader;

pub use header::{ColumnIndex, validate_header};
pub use reader::{csv_reader, is_blank, read_all, strip_bom};
