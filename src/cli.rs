//! CLI helper functions
//!
//! Each stage prints a progress line to stdout before it starts; details go
//! to the log.

use crate::{
    client::SqlConnector,
    config::{Config, ExtractConfig, ReportConfig},
    report::{ReportSummary, Reporter},
    titanic::{self, REPORT_QUERIES},
};
use eyre::Result;
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

/// Download the dataset and write the truncated copy
pub async fn run_extract(config: &ExtractConfig) -> Result<PathBuf> {
    println!("Extracting data...");
    let path = titanic::extract_dataset(config).await?;
    println!("Dataset saved to {}", path.display().bright_black());
    Ok(path)
}

/// Ensure the table exists and insert the extracted rows
pub async fn run_load<C: SqlConnector>(connector: &C, dataset: &Path) -> Result<String> {
    println!("Transforming and loading data into Databricks...");
    let status = titanic::load_dataset(connector, dataset).await?;
    println!("{}", status.green());
    Ok(status)
}

/// Run the report queries and rewrite the report file
pub async fn run_query<C: SqlConnector>(
    connector: &C,
    config: &ReportConfig,
) -> Result<ReportSummary> {
    println!(
        "\nPerforming queries and generating {}...",
        config.path.display().bright_black()
    );
    let summary = Reporter::new(connector, &REPORT_QUERIES, &config.path)
        .generate()
        .await?;

    if summary.written.is_empty() {
        log::warn!("No report sections were written");
    }
    println!(
        "Queries executed ({}). Check {} for results.",
        summary.cyan(),
        config.path.display().bright_black()
    );
    Ok(summary)
}

/// Extract, load and report, strictly in that order
///
/// Extraction and load failures stop the run; report query failures only
/// drop their section.
pub async fn run_pipeline<C: SqlConnector>(
    connector: &C,
    extract: &ExtractConfig,
    report: &ReportConfig,
) -> Result<ReportSummary> {
    let dataset = run_extract(extract).await?;
    run_load(connector, &dataset).await?;
    run_query(connector, report).await
}

/// Full run against the Databricks warehouse in `config`
pub async fn run_all(config: &Config) -> Result<ReportSummary> {
    log::info!("Using warehouse {}", config.databricks.http_path.bright_black());
    run_pipeline(&config.databricks, &config.extract, &config.report).await
}
