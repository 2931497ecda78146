//! Databricks SQL client
//!
//! Runs statements against a SQL warehouse through the Statement Execution
//! REST API. Each client is one "connection": it holds the HTTP client, the
//! workspace URL and the warehouse id, and is closed when dropped.

use super::statement::{
    ResultChunk, STATEMENTS_PATH, StatementRequest, StatementResponse, StatementState,
};
use super::{Auth, QueryResult, SqlSession};
use crate::config::DatabricksConfig;
use crate::error::EtlError;
use eyre::{Context, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Databricks SQL warehouse client
///
/// # Example
/// ```no_run
/// use titanic_etl::client::{DatabricksClient, SqlSession};
/// use titanic_etl::config::DatabricksConfig;
///
/// # async fn example() -> eyre::Result<()> {
/// let config = DatabricksConfig::from_env()?;
/// let client = DatabricksClient::try_new(&config)?;
/// let result = client.execute("SELECT 1 AS one").await?;
/// assert_eq!(result.columns, vec!["one"]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct DatabricksClient {
    client: Client,
    url: Url,
    warehouse_id: String,
}

impl DatabricksClient {
    /// Create a client for the warehouse named by `config`
    ///
    /// # Errors
    /// Returns an error if:
    /// - The host is not a valid URL or the HTTP path names no warehouse
    /// - The HTTP client cannot be built
    pub fn try_new(config: &DatabricksConfig) -> Result<Self> {
        let url = config.base_url()?;
        let warehouse_id = config.warehouse_id()?.to_string();
        let auth = Auth::Bearer(config.access_token.clone());

        let client = Client::builder()
            .default_headers(auth.headers()?)
            .build()
            .context("Failed to build Databricks HTTP client")?;

        log::debug!("Opened Databricks session on {} ({})", url, warehouse_id);

        Ok(Self {
            client,
            url,
            warehouse_id,
        })
    }

    /// Submit a statement and wait for it to reach a terminal state
    async fn submit(&self, statement: &str) -> Result<StatementResponse> {
        let request = StatementRequest::inline(&self.warehouse_id, statement);
        let response = self
            .client
            .post(self.url.join(STATEMENTS_PATH)?)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("Failed to reach Databricks at {}", self.url))?;

        let mut status: StatementResponse = Self::parse(response).await?;

        while !status.status.state.is_terminal() {
            log::trace!(
                "Statement {} is {}, polling",
                status.statement_id,
                status.status.state
            );
            tokio::time::sleep(POLL_INTERVAL).await;
            let path = format!("{}{}", STATEMENTS_PATH, status.statement_id);
            status = self.get(&path).await?;
        }

        Ok(status)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .client
            .get(self.url.join(path)?)
            .send()
            .await
            .with_context(|| format!("Failed to reach Databricks at {}", self.url))?;
        Self::parse(response).await
    }

    /// Decode a JSON body, mapping HTTP failures to [`EtlError::Database`]
    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EtlError::Database {
                state: status.to_string(),
                message: body,
            }
            .into());
        }

        response
            .json()
            .await
            .context("Failed to parse Databricks response")
    }

    /// Follow `next_chunk_internal_link` until the result set is complete
    async fn collect_rows(&self, first: ResultChunk) -> Result<Vec<Vec<Option<String>>>> {
        let mut next = first.next_chunk_internal_link.clone();
        let mut rows = first.into_rows();

        while let Some(link) = next {
            log::trace!("Fetching result chunk {}", link);
            let chunk: ResultChunk = self.get(&link).await?;
            next = chunk.next_chunk_internal_link.clone();
            rows.extend(chunk.into_rows());
        }

        Ok(rows)
    }
}

impl SqlSession for DatabricksClient {
    async fn execute(&self, statement: &str) -> Result<QueryResult> {
        log::debug!("Executing: {}", abbreviate(statement));

        let response = self.submit(statement).await?;

        if response.status.state != StatementState::Succeeded {
            let message = response.status.error.unwrap_or_default().to_string();
            return Err(EtlError::Database {
                state: response.status.state.to_string(),
                message,
            }
            .into());
        }

        let columns = response
            .manifest
            .map(|m| m.schema.columns.into_iter().map(|c| c.name).collect())
            .unwrap_or_default();
        let rows = match response.result {
            Some(chunk) => self.collect_rows(chunk).await?,
            None => Vec::new(),
        };

        log::debug!("Statement {} returned {} row(s)", response.statement_id, rows.len());

        Ok(QueryResult { columns, rows })
    }
}

impl Drop for DatabricksClient {
    fn drop(&mut self) {
        log::trace!("Closed Databricks session on {}", self.url);
    }
}

impl std::fmt::Display for DatabricksClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (warehouse: {})", self.url, self.warehouse_id)
    }
}

/// First line of a statement, capped, for log output
fn abbreviate(statement: &str) -> String {
    const MAX: usize = 120;
    let line = statement.trim().lines().next().unwrap_or_default();
    match line.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &line[..idx]),
        None if statement.trim().lines().count() > 1 => format!("{}...", line),
        None => line.to_string(),
    }
}
