//! Runtime configuration
//!
//! Built once at process start and handed by reference to the stages that
//! need it. Databricks credentials come from the environment (optionally
//! seeded from a dotenv file by `main`); everything else has defaults that
//! the CLI can override.

use crate::error::EtlError;
use eyre::Result;
use std::path::PathBuf;
use url::Url;

pub const SERVER_HOSTNAME_VAR: &str = "SERVER_HOSTNAME";
pub const HTTP_PATH_VAR: &str = "HTTP_PATH";
pub const ACCESS_TOKEN_VAR: &str = "DATABRICKS_KEY";

pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/datasciencedojo/datasets/master/titanic.csv";
pub const DEFAULT_DATASET_PATH: &str = "../data/titanic.csv";
/// Header included
pub const DEFAULT_MAX_ROWS: usize = 200;
pub const DEFAULT_REPORT_PATH: &str = "log.md";

/// Connection settings for a Databricks SQL warehouse
#[derive(Clone)]
pub struct DatabricksConfig {
    pub server_hostname: String,
    pub http_path: String,
    pub access_token: String,
}

impl DatabricksConfig {
    /// Read `SERVER_HOSTNAME`, `HTTP_PATH` and `DATABRICKS_KEY` from the
    /// process environment
    ///
    /// # Errors
    /// [`EtlError::MissingEnv`] naming the first variable that is unset or empty
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup, so callers can supply fixture credentials
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &'static str| -> Result<String> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| EtlError::MissingEnv(key).into())
        };

        Ok(Self {
            server_hostname: require(SERVER_HOSTNAME_VAR)?,
            http_path: require(HTTP_PATH_VAR)?,
            access_token: require(ACCESS_TOKEN_VAR)?,
        })
    }

    /// Workspace base URL; a bare hostname is assumed to be HTTPS
    pub fn base_url(&self) -> Result<Url> {
        let raw = if self.server_hostname.contains("://") {
            self.server_hostname.clone()
        } else {
            format!("https://{}", self.server_hostname)
        };
        Url::parse(&raw).map_err(|e| {
            EtlError::Config(format!(
                "invalid {} '{}': {}",
                SERVER_HOSTNAME_VAR, self.server_hostname, e
            ))
            .into()
        })
    }

    /// Warehouse id, the last segment of `/sql/1.0/warehouses/<id>`
    ///
    /// Cluster paths (`sql/protocolv1/o/<org>/<cluster>`) are rejected; the
    /// Statement Execution API only runs on SQL warehouses.
    pub fn warehouse_id(&self) -> Result<&str> {
        let mut segments = self.http_path.trim_end_matches('/').rsplit('/');
        match (segments.next(), segments.next()) {
            (Some(id), Some("warehouses")) if !id.is_empty() => Ok(id),
            _ => Err(EtlError::Config(format!(
                "{} '{}' does not name a SQL warehouse",
                HTTP_PATH_VAR, self.http_path
            ))
            .into()),
        }
    }
}

impl std::fmt::Debug for DatabricksConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabricksConfig")
            .field("server_hostname", &self.server_hostname)
            .field("http_path", &self.http_path)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Where the dataset comes from and where the truncated copy goes
#[derive(Clone, Debug)]
pub struct ExtractConfig {
    pub url: String,
    pub file_path: PathBuf,
    pub max_rows: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            file_path: PathBuf::from(DEFAULT_DATASET_PATH),
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ReportConfig {
    pub path: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_REPORT_PATH),
        }
    }
}

/// Everything a full extract, load and report run needs
#[derive(Clone, Debug)]
pub struct Config {
    pub databricks: DatabricksConfig,
    pub extract: ExtractConfig,
    pub report: ReportConfig,
}

impl Config {
    /// Credentials from the environment, defaults for the rest
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            databricks: DatabricksConfig::from_env()?,
            extract: ExtractConfig::default(),
            report: ReportConfig::default(),
        })
    }
}
