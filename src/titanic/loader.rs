//! Titanic table loader
//!
//! Creates `default.Titanic` on first use and bulk-inserts passengers into it.

use super::passenger::{Passenger, PassengerParser};
use super::schema::{QUALIFIED_TABLE, create_table_statement, show_table_statement};
use crate::client::{SqlConnector, SqlSession, tuple};
use crate::etl::{Loader, Pipeline};
use crate::storage::CsvReader;
use eyre::{Context, Result};
use std::path::Path;

/// Whether the destination table had to be created
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableStatus {
    Created,
    Existing,
}

/// Loader for the Titanic table
///
/// Every call to [`Loader::load`] issues a single multi-row `INSERT`. Rows are
/// appended; loading the same file twice doubles the table.
pub struct TitanicLoader<'a, S> {
    session: &'a S,
}

impl<'a, S: SqlSession> TitanicLoader<'a, S> {
    pub fn new(session: &'a S) -> Self {
        Self { session }
    }

    /// Create the table unless `SHOW TABLES` already lists it
    ///
    /// An existing table is reused as-is; its columns are not checked.
    pub async fn ensure_table(&self) -> Result<TableStatus> {
        let existing = self
            .session
            .execute(&show_table_statement())
            .await
            .with_context(|| format!("Failed to look up table {}", QUALIFIED_TABLE))?;

        if !existing.is_empty() {
            log::info!("Table {} exists, skipping creation", QUALIFIED_TABLE);
            return Ok(TableStatus::Existing);
        }

        self.session
            .execute(&create_table_statement())
            .await
            .with_context(|| format!("Failed to create table {}", QUALIFIED_TABLE))?;
        log::info!("Created table {}", QUALIFIED_TABLE);

        Ok(TableStatus::Created)
    }
}

/// `INSERT INTO default.Titanic VALUES (...), (...)` in input order
pub fn insert_statement(passengers: &[Passenger]) -> String {
    let rows: Vec<String> = passengers.iter().map(|p| tuple(&p.values())).collect();
    format!("INSERT INTO {} VALUES\n{}", QUALIFIED_TABLE, rows.join(",\n"))
}

impl<S: SqlSession> Loader for TitanicLoader<'_, S> {
    type Item = Passenger;

    async fn load(&self, items: Vec<Self::Item>) -> Result<usize> {
        if items.is_empty() {
            log::warn!("No passengers to insert into {}", QUALIFIED_TABLE);
            return Ok(0);
        }

        self.session
            .execute(&insert_statement(&items))
            .await
            .with_context(|| {
                format!("Failed to insert {} row(s) into {}", items.len(), QUALIFIED_TABLE)
            })?;

        log::info!("Inserted {} row(s) into {}", items.len(), QUALIFIED_TABLE);
        Ok(items.len())
    }
}

/// Load an extracted CSV file into the Titanic table
///
/// Opens one session for the whole load: ensure the table, parse the file,
/// insert everything in one statement. Any failure aborts the load.
///
/// Returns a status line starting with `Success`.
pub async fn load_dataset<C: SqlConnector>(
    connector: &C,
    dataset: impl AsRef<Path>,
) -> Result<String> {
    let dataset = dataset.as_ref();

    let session = connector
        .connect()
        .context("Failed to connect to the SQL warehouse")?;
    let loader = TitanicLoader::new(&session);
    let table = loader.ensure_table().await?;
    log::debug!("Table status: {:?}", table);

    let count = Pipeline::new(CsvReader::new(dataset), PassengerParser, loader)
        .run()
        .await
        .with_context(|| format!("Failed to load {}", dataset.display()))?;

    Ok(format!(
        "Success: loaded {} row(s) from {} into {}",
        count,
        dataset.display(),
        QUALIFIED_TABLE
    ))
}
