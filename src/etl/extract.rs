//! Extractor trait for data extraction from various sources

use super::ItemFailure;
use eyre::Result;

/// A batch of extracted items.
///
/// `total` is the number of items the source claims to hold. It can differ
/// from `items.len()`: the store may report more matches than it returned
/// in one page, and items that failed to extract are listed in `failures`
/// instead of `items`.
#[derive(Debug)]
pub struct Batch<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub failures: Vec<ItemFailure>,
}

impl<T> Batch<T> {
    /// Create a batch whose total is the number of items
    pub fn new(items: Vec<T>) -> Self {
        let total = items.len() as u64;
        Self {
            items,
            total,
            failures: Vec::new(),
        }
    }

    /// Override the expected total
    pub fn with_total(mut self, total: u64) -> Self {
        self.total = total;
        self
    }

    /// Record items that could not be extracted
    pub fn with_failures(mut self, failures: Vec<ItemFailure>) -> Self {
        self.failures = failures;
        self
    }
}

/// Extractor trait for extracting data from a source
///
/// Implementors define how to extract items from sources like:
/// - The store's search API
/// - A directory of JSON files
///
/// # Example
/// ```no_run
/// use kibana_io::etl::{Batch, Extractor};
/// use eyre::Result;
/// use std::path::PathBuf;
///
/// struct FileExtractor {
///     path: PathBuf,
/// }
///
/// impl Extractor for FileExtractor {
///     type Item = String;
///
///     async fn extract(&self) -> Result<Option<Batch<Self::Item>>> {
///         // Read files and return items
///         Ok(Some(Batch::new(vec![])))
///     }
/// }
/// ```
pub trait Extractor: Send + Sync {
    /// The type of items extracted
    type Item: Send;

    /// Extract items from the source
    ///
    /// Returns `None` when the source does not exist and there is nothing
    /// to do.
    ///
    /// # Errors
    /// Returns an error if extraction fails as a whole (network, I/O,
    /// parsing, etc.). Such errors abort the run.
    fn extract(&self)
    -> impl std::future::Future<Output = Result<Option<Batch<Self::Item>>>> + Send;
}
