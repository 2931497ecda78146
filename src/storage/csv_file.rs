//! CSV file operations

use crate::error::EtlError;
use crate::etl::{Extractor, Loader};

use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use eyre::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One data row with access to its fields by header name
#[derive(Clone, Debug)]
pub struct CsvRow {
    headers: Arc<StringRecord>,
    record: StringRecord,
    line: u64,
}

impl CsvRow {
    pub fn new(headers: Arc<StringRecord>, record: StringRecord, line: u64) -> Self {
        Self {
            headers,
            record,
            line,
        }
    }

    /// Field under `column`
    ///
    /// A row shorter than the header yields `""` for the missing cells.
    ///
    /// # Errors
    /// [`EtlError::MissingColumn`] if the header has no such column
    pub fn field(&self, column: &'static str) -> Result<&str> {
        let index = self
            .headers
            .iter()
            .position(|h| h == column)
            .ok_or(EtlError::MissingColumn(column))?;
        Ok(self.record.get(index).unwrap_or_default())
    }

    /// 1-based line number in the source file
    pub fn line(&self) -> u64 {
        self.line
    }
}

/// Read a headed CSV file into [`CsvRow`]s
pub struct CsvReader {
    path: PathBuf,
}

impl CsvReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read every data row, in file order
    pub fn read(&self) -> Result<Vec<CsvRow>> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)
            .with_context(|| format!("Failed to open CSV file: {}", self.path.display()))?;

        let headers = Arc::new(
            reader
                .headers()
                .with_context(|| format!("Failed to read CSV header: {}", self.path.display()))?
                .clone(),
        );

        reader
            .records()
            .map(|record| {
                let record = record
                    .with_context(|| format!("Failed to read CSV row: {}", self.path.display()))?;
                let line = record.position().map_or(0, |p| p.line());
                Ok(CsvRow::new(headers.clone(), record, line))
            })
            .collect()
    }
}

impl Extractor for CsvReader {
    type Item = CsvRow;

    async fn extract(&self) -> Result<Vec<Self::Item>> {
        self.read()
    }
}

/// Write raw records to a CSV file, replacing whatever was there
pub struct CsvFileWriter {
    path: PathBuf,
}

impl CsvFileWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Write records in order, creating parent directories as needed
    pub fn write(&self, records: &[StringRecord]) -> Result<usize> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut writer = WriterBuilder::new()
            .flexible(true)
            .terminator(Terminator::Any(b'\n'))
            .from_path(&self.path)
            .with_context(|| format!("Failed to create CSV file: {}", self.path.display()))?;

        for record in records {
            writer.write_record(record)?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to write CSV file: {}", self.path.display()))?;

        Ok(records.len())
    }
}

impl Loader for CsvFileWriter {
    type Item = StringRecord;

    async fn load(&self, items: Vec<Self::Item>) -> Result<usize> {
        self.write(&items)
    }
}
