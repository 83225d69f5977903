//! CSV import and export.
//!
//! Imports decode the file (UTF-8 or Shift_JIS), treat the first record as
//! the header row and derive source columns from it. Exports write target
//! column names as headers and one field per target column, optionally
//! behind a UTF-8 byte order mark for spreadsheet applications.

#![deny(unsafe_code)]

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{IngestError, Result};
pub use reader::{ImportedTable, decode, detect_encoding, read_csv_bytes, read_csv_path};
pub use writer::{ExportOptions, UTF8_BOM, write_csv_bytes, write_csv_path, write_csv_string};
