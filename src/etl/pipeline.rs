//! Pipeline orchestration for ETL operations

use super::{Extractor, Loader, Transformer};
use eyre::Result;

/// ETL Pipeline that chains an Extractor, a Transformer and a Loader
///
/// # Type Parameters
/// - `E`: Extractor type
/// - `T`: Transformer type (must transform from E::Item)
/// - `L`: Loader type (must load T::Output)
///
/// # Example
/// ```no_run
/// use titanic_etl::etl::{IdentityTransformer, Pipeline};
/// use titanic_etl::storage::CsvFileWriter;
/// # use titanic_etl::etl::{Extractor, Loader};
///
/// # async fn example() -> eyre::Result<()> {
/// # struct Rows;
/// # impl Extractor for Rows {
/// #     type Item = csv::StringRecord;
/// #     async fn extract(&self) -> eyre::Result<Vec<Self::Item>> { Ok(vec![]) }
/// # }
/// let pipeline = Pipeline::new(
///     Rows,
///     IdentityTransformer::new(),
///     CsvFileWriter::new("copy.csv"),
/// );
///
/// let count = pipeline.run().await?;
/// println!("Copied {} rows", count);
/// # Ok(())
/// # }
/// ```
pub struct Pipeline<E, T, L> {
    extractor: E,
    transformer: T,
    loader: L,
}

impl<E, T, L> Pipeline<E, T, L>
where
    E: Extractor,
    T: Transformer<Input = E::Item>,
    L: Loader<Item = T::Output>,
{
    /// Create a new pipeline
    pub fn new(extractor: E, transformer: T, loader: L) -> Self {
        Self {
            extractor,
            transformer,
            loader,
        }
    }

    /// Run the complete ETL pipeline
    ///
    /// Steps:
    /// 1. Extract items from source
    /// 2. Transform each item
    /// 3. Load items to destination
    ///
    /// The loader runs even when nothing was extracted.
    ///
    /// Returns the number of items loaded
    ///
    /// # Errors
    /// Returns an error if any stage fails
    pub async fn run(&self) -> Result<usize> {
        log::debug!("Starting ETL pipeline");

        log::debug!("Extracting from source...");
        let items = self.extractor.extract().await?;
        log::debug!("Extracted {} items", items.len());

        if items.is_empty() {
            log::warn!("No items extracted");
        }

        log::debug!("Transforming items...");
        let transformed = self.transformer.transform_many(items)?;
        log::debug!("Transformed {} items", transformed.len());

        log::debug!("Loading to destination...");
        let count = self.loader.load(transformed).await?;
        log::debug!("Loaded {} items", count);

        Ok(count)
    }
}
