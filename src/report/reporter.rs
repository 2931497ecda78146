//! Query runner that writes the Markdown report

use super::MarkdownReport;
use crate::client::{QueryResult, SqlConnector, SqlSession};
use eyre::Result;
use std::path::Path;

/// A named read-only query and the column headings for its section
#[derive(Clone, Copy, Debug)]
pub struct ReportQuery {
    pub name: &'static str,
    pub sql: &'static str,
    pub columns: &'static [&'static str],
}

/// How a single report query ended
#[derive(Clone, Debug, PartialEq)]
pub enum QueryOutcome {
    Succeeded(QueryResult),
    /// Error text; already logged
    Failed(String),
}

/// Which sections made it into the report
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReportSummary {
    pub written: Vec<&'static str>,
    pub empty: Vec<&'static str>,
    pub failed: Vec<&'static str>,
}

impl std::fmt::Display for ReportSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} section(s) written, {} empty, {} failed",
            self.written.len(),
            self.empty.len(),
            self.failed.len()
        )
    }
}

/// Runs each query on its own session and appends non-empty results
///
/// Query failures never abort the report: they are logged and the section
/// is left out. Failing to write the report file does abort.
pub struct Reporter<'a, C> {
    connector: &'a C,
    queries: &'a [ReportQuery],
    report: MarkdownReport,
}

impl<'a, C: SqlConnector> Reporter<'a, C> {
    pub fn new(connector: &'a C, queries: &'a [ReportQuery], path: impl AsRef<Path>) -> Self {
        Self {
            connector,
            queries,
            report: MarkdownReport::new(path),
        }
    }

    /// Connect, execute, disconnect
    async fn execute_scoped(&self, sql: &str) -> Result<QueryResult> {
        let session = self.connector.connect()?;
        session.execute(sql).await
    }

    /// Run one query, turning any error into [`QueryOutcome::Failed`]
    pub async fn run_query(&self, query: &ReportQuery) -> QueryOutcome {
        log::info!("Performing {}...", query.name);

        match self.execute_scoped(query.sql).await {
            Ok(result) => {
                log::info!("{}: {} row(s)", query.name, result.len());
                QueryOutcome::Succeeded(result)
            }
            Err(e) => {
                log::error!("{} failed: {:#}", query.name, e);
                QueryOutcome::Failed(format!("{:#}", e))
            }
        }
    }

    /// Rebuild the report from scratch
    pub async fn generate(&self) -> Result<ReportSummary> {
        self.report.reset()?;
        let mut summary = ReportSummary::default();

        for query in self.queries {
            match self.run_query(query).await {
                QueryOutcome::Succeeded(result) if result.is_empty() => {
                    log::info!("{} returned no rows, skipping section", query.name);
                    summary.empty.push(query.name);
                }
                QueryOutcome::Succeeded(result) => {
                    self.report
                        .append_section(query.name, query.columns, &result.rows)?;
                    summary.written.push(query.name);
                }
                QueryOutcome::Failed(_) => summary.failed.push(query.name),
            }
        }

        log::info!("Report {}: {}", self.report.path().display(), summary);
        Ok(summary)
    }
}
