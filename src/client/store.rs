//! Store client module
//!
//! Provides `StoreClient` for making document API requests against one
//! index of the store (`<url>/<index>`).

use eyre::{Context, Result, eyre};
use reqwest::{Client, Method, header};
use url::Url;

/// Number of documents requested by a single search. No further pages are
/// ever fetched.
pub const SEARCH_PAGE_SIZE: usize = 5000;

/// Store client for making document API requests.
///
/// Every request path is built below the index endpoint, with each segment
/// percent-encoded, so `client.endpoint(&["search", "_search"])` for index
/// `.kibana` on `http://localhost:9200` is
/// `http://localhost:9200/.kibana/search/_search`.
///
/// # Example
/// ```no_run
/// use kibana_io::client::StoreClient;
/// use url::Url;
///
/// # async fn example() -> eyre::Result<()> {
/// let url = Url::parse("http://localhost:9200")?;
/// let client = StoreClient::try_new(url, ".kibana", false)?;
///
/// let response = client.search("dashboard").await?;
/// println!("{}", response.status());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct StoreClient {
    client: Client,
    url: Url,
}

impl StoreClient {
    /// Create a new StoreClient scoped to `index` on the store at `url`.
    ///
    /// # Arguments
    /// * `url` - Base store URL
    /// * `index` - Index holding the documents (e.g. `.kibana`)
    /// * `accept_invalid_certs` - Skip TLS certificate validation
    ///
    /// # Errors
    /// Returns an error if:
    /// - The URL cannot carry a path (e.g. `mailto:`)
    /// - The index name is empty
    /// - The HTTP client cannot be built
    pub fn try_new(url: Url, index: &str, accept_invalid_certs: bool) -> Result<Self> {
        if index.is_empty() {
            eyre::bail!("Index name must not be empty");
        }

        if url.cannot_be_a_base() {
            eyre::bail!("URL cannot be used as a base: {}", url);
        }

        let mut url = url;
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push(index);
        }

        if accept_invalid_certs {
            log::debug!("TLS certificate validation disabled for {}", url);
        }

        let client = Client::builder()
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .with_context(|| "Failed to build HTTP client")?;

        Ok(Self { client, url })
    }

    /// Get the index endpoint URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Build the URL of a path below the index endpoint.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.extend(segments);
        }
        url
    }

    /// Search all documents of a type, one page of [`SEARCH_PAGE_SIZE`].
    ///
    /// `GET <url>/<index>/<type>/_search?size=5000`
    pub async fn search(&self, doc_type: &str) -> Result<reqwest::Response> {
        let url = self.endpoint(&[doc_type, "_search"]);
        log::debug!("GET {}", url);
        self.client
            .request(Method::GET, url)
            .query(&[("size", SEARCH_PAGE_SIZE)])
            .send()
            .await
            .map_err(|e| eyre!("Failed to send request: {}", e))
    }

    /// Create or replace one document from a raw JSON body.
    ///
    /// `PUT <url>/<index>/<type>/<id>`
    pub async fn put_json(
        &self,
        doc_type: &str,
        id: &str,
        body: Vec<u8>,
    ) -> Result<reqwest::Response> {
        let url = self.endpoint(&[doc_type, id]);
        log::debug!("PUT {} ({} bytes)", url, body.len());
        self.client
            .request(Method::PUT, url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| eyre!("Failed to send request: {}", e))
    }
}

impl std::fmt::Display for StoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}
