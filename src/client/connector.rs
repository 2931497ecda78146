//! Connection seam between the pipeline stages and the SQL warehouse

use super::DatabricksClient;
use crate::config::DatabricksConfig;
use eyre::Result;

/// Rows returned by a statement, every cell as nullable text
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl QueryResult {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// An open connection that can run statements
pub trait SqlSession: Send + Sync {
    /// Execute one statement and collect its full result set
    ///
    /// # Errors
    /// Transport failures and statements the warehouse reports as failed
    fn execute(
        &self,
        statement: &str,
    ) -> impl std::future::Future<Output = Result<QueryResult>> + Send;
}

/// Opens sessions. Each call yields an independent session that is closed
/// when dropped.
pub trait SqlConnector: Send + Sync {
    type Session: SqlSession;

    /// # Errors
    /// Returns an error if the session cannot be established
    fn connect(&self) -> Result<Self::Session>;
}

impl SqlConnector for DatabricksConfig {
    type Session = DatabricksClient;

    fn connect(&self) -> Result<Self::Session> {
        DatabricksClient::try_new(self)
    }
}
