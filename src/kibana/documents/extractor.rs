//! Documents extractor
//!
//! Extracts one document type from the store via
//! GET `<index>/<type>/_search?size=5000`

use super::{Document, DocumentType, SearchResponse};
use crate::client::StoreClient;
use crate::etl::{Batch, Extractor};

use eyre::{Context, Result};
use reqwest::StatusCode;

/// Extractor for the documents of one type
///
/// Fetches a single page of documents. The batch total is the number of
/// matches reported by the store, which exceeds the batch length when the
/// store holds more documents than fit in one page.
///
/// A 404 from the store means the type does not exist: extraction returns
/// `None` and the type is skipped. Any other unsuccessful status is an
/// error.
///
/// # Example
/// ```no_run
/// use kibana_io::client::StoreClient;
/// use kibana_io::etl::Extractor;
/// use kibana_io::kibana::documents::{DocumentType, DocumentsExtractor};
/// use url::Url;
///
/// # async fn example() -> eyre::Result<()> {
/// let url = Url::parse("http://localhost:9200")?;
/// let client = StoreClient::try_new(url, ".kibana", false)?;
///
/// let extractor = DocumentsExtractor::new(client, DocumentType::Dashboard);
/// if let Some(batch) = extractor.extract().await? {
///     println!("{} of {} dashboards", batch.items.len(), batch.total);
/// }
/// # Ok(())
/// # }
/// ```
pub struct DocumentsExtractor {
    client: StoreClient,
    doc_type: DocumentType,
}

impl DocumentsExtractor {
    /// Create a new documents extractor
    ///
    /// # Arguments
    /// * `client` - Index-scoped store client
    /// * `doc_type` - Type of documents to fetch
    pub fn new(client: StoreClient, doc_type: DocumentType) -> Self {
        Self { client, doc_type }
    }

    /// Fetch one page of documents from the store
    async fn search_documents(&self) -> Result<Option<Batch<Document>>> {
        let response = self
            .client
            .search(self.doc_type.as_str())
            .await
            .with_context(|| format!("Failed to search \"{}\" documents", self.doc_type))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            log::debug!("No \"{}\" documents in {}", self.doc_type, self.client);
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            eyre::bail!(
                "Failed to create dump \"{}\", code={} text={}",
                self.doc_type,
                status.as_u16(),
                body
            );
        }

        let body: SearchResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse \"{}\" search response", self.doc_type))?;

        let total = body.hits.total.value();
        let documents: Vec<Document> = body.hits.hits.into_iter().map(Document::from).collect();

        log::debug!(
            "Fetched {} of {} \"{}\" document(s)",
            documents.len(),
            total,
            self.doc_type
        );

        Ok(Some(Batch::new(documents).with_total(total)))
    }
}

impl Extractor for DocumentsExtractor {
    type Item = Document;

    async fn extract(&self) -> Result<Option<Batch<Self::Item>>> {
        self.search_documents().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn extractor_for(server: &MockServer, doc_type: DocumentType) -> DocumentsExtractor {
        let url = Url::parse(&server.uri()).unwrap();
        let client = StoreClient::try_new(url, ".kibana", false).unwrap();
        DocumentsExtractor::new(client, doc_type)
    }

    #[tokio::test]
    async fn test_extract_documents() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/.kibana/search/_search"))
            .and(query_param("size", "5000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "hits": {
                    "total": 3,
                    "hits": [
                        {"_id": "a", "_source": {"k": 1}},
                        {"_id": "b", "_source": {"k": 2}}
                    ]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let extractor = extractor_for(&server, DocumentType::Search);
        let batch = extractor.extract().await.unwrap().unwrap();

        assert_eq!(batch.total, 3);
        assert_eq!(batch.items.len(), 2);
        assert_eq!(batch.items[0], Document::new("a", json!({"k": 1})));
        assert!(batch.failures.is_empty());
    }

    #[tokio::test]
    async fn test_not_found_is_skipped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/.kibana/index-pattern/_search"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let extractor = extractor_for(&server, DocumentType::IndexPattern);
        assert!(extractor.extract().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unexpected_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/.kibana/dashboard/_search"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let extractor = extractor_for(&server, DocumentType::Dashboard);
        let err = extractor.extract().await.unwrap_err().to_string();
        assert!(err.contains("code=500"));
        assert!(err.contains("text=boom"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/.kibana/visualization/_search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let extractor = extractor_for(&server, DocumentType::Visualization);
        let err = extractor.extract().await.unwrap_err().to_string();
        assert!(err.contains("Failed to parse \"visualization\" search response"));
    }
}
