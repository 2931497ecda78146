//! Wire types for the Databricks SQL Statement Execution API
//!
//! Only the fields this crate reads are modelled; everything else in the
//! responses is ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const STATEMENTS_PATH: &str = "/api/2.0/sql/statements/";

/// Body of `POST /api/2.0/sql/statements/`
#[derive(Debug, Serialize)]
pub struct StatementRequest<'a> {
    pub warehouse_id: &'a str,
    pub statement: &'a str,
    pub wait_timeout: &'a str,
    pub on_wait_timeout: &'a str,
    pub disposition: &'a str,
    pub format: &'a str,
}

impl<'a> StatementRequest<'a> {
    /// Inline JSON results, waiting server-side before falling back to polling
    pub fn inline(warehouse_id: &'a str, statement: &'a str) -> Self {
        Self {
            warehouse_id,
            statement,
            wait_timeout: "30s",
            on_wait_timeout: "CONTINUE",
            disposition: "INLINE",
            format: "JSON_ARRAY",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StatementResponse {
    pub statement_id: String,
    pub status: StatementStatus,
    #[serde(default)]
    pub manifest: Option<ResultManifest>,
    #[serde(default)]
    pub result: Option<ResultChunk>,
}

#[derive(Debug, Deserialize)]
pub struct StatementStatus {
    pub state: StatementState,
    #[serde(default)]
    pub error: Option<ServiceError>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatementState {
    Pending,
    Running,
    Succeeded,
    Failed,
    Canceled,
    Closed,
    #[serde(other)]
    Unknown,
}

impl StatementState {
    /// Whether the statement will not change state any more
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending | Self::Running)
    }
}

impl std::fmt::Display for StatementState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Pending => "PENDING",
            Self::Running => "RUNNING",
            Self::Succeeded => "SUCCEEDED",
            Self::Failed => "FAILED",
            Self::Canceled => "CANCELED",
            Self::Closed => "CLOSED",
            Self::Unknown => "UNKNOWN",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ServiceError {
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.error_code, &self.message) {
            (Some(code), Some(message)) => write!(f, "{}: {}", code, message),
            (None, Some(message)) => write!(f, "{}", message),
            (Some(code), None) => write!(f, "{}", code),
            (None, None) => write!(f, "no error detail returned"),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ResultManifest {
    #[serde(default)]
    pub schema: ResultSchema,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResultSchema {
    #[serde(default)]
    pub columns: Vec<ColumnInfo>,
}

#[derive(Debug, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
}

/// One page of inline results
#[derive(Debug, Default, Deserialize)]
pub struct ResultChunk {
    #[serde(default)]
    pub data_array: Vec<Vec<Value>>,
    #[serde(default)]
    pub next_chunk_internal_link: Option<String>,
}

impl ResultChunk {
    /// Rows as nullable text cells. `JSON_ARRAY` sends every value as a
    /// string; anything else is stringified as JSON.
    pub fn into_rows(self) -> Vec<Vec<Option<String>>> {
        self.data_array
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| match cell {
                        Value::Null => None,
                        Value::String(s) => Some(s),
                        other => Some(other.to_string()),
                    })
                    .collect()
            })
            .collect()
    }
}
