//! Loader trait for writing records to a destination

use eyre::Result;

/// Loader trait for loading records to a destination
///
/// Implementors define where records end up:
/// - A CSV file on disk
/// - A remote SQL table
///
/// Loaders are always invoked by [`Pipeline`](super::Pipeline), even with an
/// empty batch, so they must decide for themselves what "nothing to load"
/// means for their destination.
///
/// # Example
/// ```no_run
/// use titanic_etl::etl::Loader;
/// use eyre::Result;
///
/// struct CountingLoader;
///
/// impl Loader for CountingLoader {
///     type Item = String;
///
///     async fn load(&self, items: Vec<Self::Item>) -> Result<usize> {
///         Ok(items.len())
///     }
/// }
/// ```
pub trait Loader: Send + Sync {
    /// The type of items to load
    type Item: Send;

    /// Load items to the destination
    ///
    /// Returns the number of items successfully loaded
    ///
    /// # Errors
    /// Returns an error if loading fails (network, I/O, SQL, etc.)
    fn load(
        &self,
        items: Vec<Self::Item>,
    ) -> impl std::future::Future<Output = Result<usize>> + Send;
}
