//! Extractor trait for pulling records out of a source

use eyre::Result;

/// Extractor trait for extracting records from a source
///
/// Implementors define where records come from:
/// - A CSV file on disk
/// - A dataset served over HTTP
///
/// # Example
/// ```no_run
/// use titanic_etl::etl::Extractor;
/// use eyre::Result;
/// use std::path::PathBuf;
///
/// struct LineExtractor {
///     path: PathBuf,
/// }
///
/// impl Extractor for LineExtractor {
///     type Item = String;
///
///     async fn extract(&self) -> Result<Vec<Self::Item>> {
///         let text = std::fs::read_to_string(&self.path)?;
///         Ok(text.lines().map(str::to_string).collect())
///     }
/// }
/// ```
pub trait Extractor: Send + Sync {
    /// The type of items extracted
    type Item: Send;

    /// Extract items from the source
    ///
    /// # Errors
    /// Returns an error if extraction fails (network, I/O, parsing, etc.)
    fn extract(&self) -> impl std::future::Future<Output = Result<Vec<Self::Item>>> + Send;
}
