//! Dataset extractor
//!
//! Downloads the passenger CSV over plain HTTP(S) and keeps the first rows.

use crate::client::Auth;
use crate::config::ExtractConfig;
use crate::error::EtlError;
use crate::etl::{Extractor, IdentityTransformer, Pipeline};
use crate::storage::CsvFileWriter;
use csv::{ReaderBuilder, StringRecord};
use eyre::{Context, Result};
use reqwest::Client;
use std::path::PathBuf;
use url::Url;

/// Extractor for a CSV dataset served over HTTP
///
/// Yields raw records with the header as the first one, truncated to
/// `max_rows` records in total. A source with fewer rows is returned whole.
///
/// # Example
/// ```no_run
/// use titanic_etl::etl::Extractor;
/// use titanic_etl::titanic::DatasetExtractor;
///
/// # async fn example() -> eyre::Result<()> {
/// let extractor = DatasetExtractor::try_new("https://example.com/titanic.csv", 5)?;
/// let rows = extractor.extract().await?;
/// assert!(rows.len() <= 5);
/// # Ok(())
/// # }
/// ```
pub struct DatasetExtractor {
    client: Client,
    url: Url,
    max_rows: usize,
}

impl DatasetExtractor {
    /// # Errors
    /// [`EtlError::Fetch`] if `url` does not parse
    pub fn try_new(url: &str, max_rows: usize) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| EtlError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        let client = Client::builder()
            .default_headers(Auth::None.headers()?)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            url,
            max_rows,
        })
    }

    /// GET the resource body
    async fn fetch(&self) -> Result<String> {
        log::debug!("Fetching dataset from {}", self.url);

        let fetch_error = |reason: String| EtlError::Fetch {
            url: self.url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        if !response.status().is_success() {
            return Err(fetch_error(format!("HTTP {}", response.status())).into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;
        log::debug!("Fetched {} bytes", body.len());

        Ok(body)
    }

    /// First `max_rows` CSV records of `body`, header included
    fn truncate(&self, body: &str) -> Result<Vec<StringRecord>> {
        ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(body.as_bytes())
            .into_records()
            .take(self.max_rows)
            .map(|r| r.context("Failed to parse downloaded CSV"))
            .collect()
    }
}

impl Extractor for DatasetExtractor {
    type Item = StringRecord;

    async fn extract(&self) -> Result<Vec<Self::Item>> {
        let body = self.fetch().await?;
        let rows = self.truncate(&body)?;
        log::info!("Extracted {} row(s) from {}", rows.len(), self.url);
        Ok(rows)
    }
}

/// Download the dataset and write the truncated copy to `config.file_path`
///
/// Any existing file at that path is replaced. Returns the path written.
pub async fn extract_dataset(config: &ExtractConfig) -> Result<PathBuf> {
    let extractor = DatasetExtractor::try_new(&config.url, config.max_rows)?;
    let writer = CsvFileWriter::new(&config.file_path);

    let count = Pipeline::new(extractor, IdentityTransformer::new(), writer)
        .run()
        .await?;
    log::info!(
        "Wrote {} row(s) to {}",
        count,
        config.file_path.display()
    );

    Ok(config.file_path.clone())
}
