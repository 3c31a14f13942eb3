//! Pipeline orchestration for ETL operations

use super::{Extractor, ItemFailure, Loader};
use eyre::Result;

/// What happened to one extract/load run
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The source does not exist, nothing was loaded
    Skipped,
    /// The source was read and every item was offered to the loader
    Completed {
        total: u64,
        successful: u64,
        failures: Vec<ItemFailure>,
    },
}

impl Outcome {
    /// True when the run was skipped or every expected item was loaded
    pub fn is_complete(&self) -> bool {
        match self {
            Self::Skipped => true,
            Self::Completed {
                total, successful, ..
            } => total == successful,
        }
    }

    /// Per-item failures, empty for a skipped run
    pub fn failures(&self) -> &[ItemFailure] {
        match self {
            Self::Skipped => &[],
            Self::Completed { failures, .. } => failures,
        }
    }
}

/// ETL Pipeline that orchestrates Extract and Load operations
///
/// # Type Parameters
/// - `E`: Extractor type
/// - `L`: Loader type (must load E::Item)
///
/// # Example
/// ```no_run
/// use kibana_io::etl::Pipeline;
/// # use kibana_io::etl::{Batch, Extractor, LoadReport, Loader};
/// # use eyre::Result;
/// # struct MyExtractor;
/// # impl Extractor for MyExtractor {
/// #     type Item = i32;
/// #     async fn extract(&self) -> Result<Option<Batch<Self::Item>>> { Ok(Some(Batch::new(vec![]))) }
/// # }
/// # struct MyLoader;
/// # impl Loader for MyLoader {
/// #     type Item = i32;
/// #     async fn load(&self, items: Vec<Self::Item>) -> Result<LoadReport> { Ok(LoadReport::new()) }
/// # }
///
/// # async fn example() -> Result<()> {
/// let pipeline = Pipeline::new(MyExtractor, MyLoader);
///
/// let outcome = pipeline.run().await?;
/// println!("Complete: {}", outcome.is_complete());
/// # Ok(())
/// # }
/// ```
pub struct Pipeline<E, L> {
    extractor: E,
    loader: L,
}

impl<E, L> Pipeline<E, L>
where
    E: Extractor,
    L: Loader<Item = E::Item>,
{
    /// Create a new pipeline
    pub fn new(extractor: E, loader: L) -> Self {
        Self { extractor, loader }
    }

    /// Run the complete pipeline
    ///
    /// Steps:
    /// 1. Extract items from source (skip if the source is absent)
    /// 2. Load items to destination
    /// 3. Merge the failures of both stages into one outcome
    ///
    /// An empty batch is still handed to the loader so that it can prepare
    /// its destination.
    ///
    /// # Errors
    /// Returns an error if either stage fails as a whole
    pub async fn run(&self) -> Result<Outcome> {
        log::debug!("Extracting from source...");
        let Some(batch) = self.extractor.extract().await? else {
            log::debug!("Source not found, pipeline skipped");
            return Ok(Outcome::Skipped);
        };
        log::debug!(
            "Extracted {} of {} item(s)",
            batch.items.len(),
            batch.total
        );

        log::debug!("Loading to destination...");
        let report = self.loader.load(batch.items).await?;
        log::debug!("Loaded {} item(s)", report.loaded);

        let mut failures = batch.failures;
        failures.extend(report.failures);

        Ok(Outcome::Completed {
            total: batch.total,
            successful: report.loaded,
            failures,
        })
    }
}
