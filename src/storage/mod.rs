//! File system storage operations
//!
//! CSV reading and writing for the extracted dataset. Markdown report
//! output lives in [`crate::report`].

mod csv_file;

pub use csv_file::{CsvFileWriter, CsvReader, CsvRow};
