//! Databricks SQL client and connection seam.
//!
//! This module provides the [`DatabricksClient`] for running statements on a
//! SQL warehouse, the [`SqlConnector`]/[`SqlSession`] traits the pipeline
//! stages are written against, and [`SqlValue`] literals for inline inserts.

mod auth;
mod connector;
mod databricks;
pub mod statement;
mod value;

pub use auth::Auth;
pub use connector::{QueryResult, SqlConnector, SqlSession};
pub use databricks::DatabricksClient;
pub use value::{SqlValue, tuple};
