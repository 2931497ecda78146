//! Domain errors raised by the pipeline stages
//!
//! Everything propagates as [`eyre::Report`]; these variants are the typed
//! causes underneath, recoverable with `report.downcast_ref::<EtlError>()`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EtlError {
    /// A required environment variable is unset or empty
    #[error("required environment variable {0} is not set")]
    MissingEnv(&'static str),

    /// A configuration value is present but unusable
    #[error("configuration error: {0}")]
    Config(String),

    /// The dataset could not be downloaded
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// A CSV header the loader depends on is absent
    #[error("CSV header is missing column '{0}'")]
    MissingColumn(&'static str),

    /// A CSV field could not be coerced to its column type
    #[error("line {line}: cannot parse {column} value '{value}': {reason}")]
    Parse {
        line: u64,
        column: &'static str,
        value: String,
        reason: String,
    },

    /// The SQL warehouse rejected or failed a statement
    #[error("database error ({state}): {message}")]
    Database { state: String, message: String },
}
