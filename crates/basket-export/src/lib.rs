//! CSV export of an item list.

#![deny(unsafe_code)]

pub mod error;
pub mod writer;

pub use error::{ExportError, Result};
pub use writer::{
    DEFAULT_EXPORT_FILENAME, EXPORT_HEADER, ExportOptions, to_csv_string, write_csv,
    write_csv_file,
};
