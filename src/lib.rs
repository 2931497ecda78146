//! Titanic ETL
//!
//! Extract the Titanic passenger CSV, load it into a Databricks SQL table and
//! write a Markdown report of a few fixed queries over it.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod etl;
pub mod report;
pub mod storage;
pub mod titanic;

// Re-exports for convenience
pub use client::{DatabricksClient, QueryResult, SqlConnector, SqlSession};
pub use config::{Config, DatabricksConfig, ExtractConfig, ReportConfig};
pub use error::EtlError;
pub use etl::{Extractor, IdentityTransformer, Loader, Pipeline, Transformer};
pub use report::{QueryOutcome, ReportSummary, Reporter};
