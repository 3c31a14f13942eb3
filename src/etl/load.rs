//! Loader trait for loading data to destinations

use super::ItemFailure;
use eyre::Result;

/// Result of a load: how many items landed and which ones did not
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: u64,
    pub failures: Vec<ItemFailure>,
}

impl LoadReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one successfully loaded item
    pub fn success(&mut self) {
        self.loaded += 1;
    }

    /// Record an item that could not be loaded
    pub fn failure(&mut self, failure: ItemFailure) {
        self.failures.push(failure);
    }
}

/// Loader trait for loading data to a destination
///
/// Implementors define how to load items to destinations:
/// - The store's document API
/// - A directory of JSON files
///
/// Loading is best-effort: a failing item is recorded in the returned
/// [`LoadReport`] and the remaining items are still processed.
///
/// # Example
/// ```no_run
/// use kibana_io::etl::{LoadReport, Loader};
/// use eyre::Result;
/// use std::path::PathBuf;
///
/// struct FileLoader {
///     output_dir: PathBuf,
/// }
///
/// impl Loader for FileLoader {
///     type Item = String;
///
///     async fn load(&self, items: Vec<Self::Item>) -> Result<LoadReport> {
///         let mut report = LoadReport::new();
///         for _ in items {
///             report.success();
///         }
///         Ok(report)
///     }
/// }
/// ```
pub trait Loader: Send + Sync {
    /// The type of items to load
    type Item: Send;

    /// Load items to the destination
    ///
    /// # Errors
    /// Returns an error only if the destination itself is unusable (for
    /// example, the output directory cannot be created).
    fn load(
        &self,
        items: Vec<Self::Item>,
    ) -> impl std::future::Future<Output = Result<LoadReport>> + Send;
}
