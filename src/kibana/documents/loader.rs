//! Documents loader
//!
//! Loads document files into the store via PUT `<index>/<type>/<id>`

use super::{DocumentFile, DocumentType};
use crate::client::StoreClient;
use crate::etl::{ItemFailure, LoadReport, Loader};
use eyre::Result;
use reqwest::StatusCode;

/// Loader for the documents of one type
///
/// Each file is uploaded as is with one create-or-replace request. Only
/// `200 OK` and `201 Created` count as success; anything else, including a
/// request that never got a response, is recorded as a failure and the
/// next file is uploaded.
///
/// # Example
/// ```no_run
/// use kibana_io::client::StoreClient;
/// use kibana_io::etl::Loader;
/// use kibana_io::kibana::documents::{DocumentFile, DocumentType, DocumentsLoader};
/// use url::Url;
///
/// # async fn example() -> eyre::Result<()> {
/// let url = Url::parse("https://localhost:9200")?;
/// let client = StoreClient::try_new(url, ".kibana", true)?;
/// let loader = DocumentsLoader::new(client, DocumentType::Search);
///
/// let files = vec![DocumentFile::new("my-search", br#"{"title":"Errors"}"#.to_vec())];
/// let report = loader.load(files).await?;
/// # Ok(())
/// # }
/// ```
pub struct DocumentsLoader {
    client: StoreClient,
    doc_type: DocumentType,
}

impl DocumentsLoader {
    /// Create a new documents loader
    ///
    /// # Arguments
    /// * `client` - Index-scoped store client
    /// * `doc_type` - Type the documents are written as
    pub fn new(client: StoreClient, doc_type: DocumentType) -> Self {
        Self { client, doc_type }
    }

    /// Upload one document, returning the failure if it did not land
    async fn put_document(&self, file: DocumentFile) -> Option<ItemFailure> {
        let response = match self
            .client
            .put_json(self.doc_type.as_str(), &file.id, file.body)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                return Some(ItemFailure::new(
                    &file.id,
                    format!("Failed to import file {}: {}", file.id, e),
                ));
            }
        };

        let status = response.status();
        if matches!(status, StatusCode::OK | StatusCode::CREATED) {
            log::debug!("Imported {} \"{}\" ({})", self.doc_type, file.id, status);
            return None;
        }

        let body = response.text().await.unwrap_or_default();
        Some(ItemFailure::new(
            &file.id,
            format!(
                "Failed to import file {} code={}: {}",
                file.id,
                status.as_u16(),
                body
            ),
        ))
    }
}

impl Loader for DocumentsLoader {
    type Item = DocumentFile;

    async fn load(&self, items: Vec<Self::Item>) -> Result<LoadReport> {
        let mut report = LoadReport::new();

        for file in items {
            match self.put_document(file).await {
                None => report.success(),
                Some(failure) => report.failure(failure),
            }
        }

        log::debug!(
            "Loaded {} \"{}\" document(s) to {}",
            report.loaded,
            self.doc_type,
            self.client
        );
        Ok(report)
    }
}
