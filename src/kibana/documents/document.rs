//! Document types and the store's search response format
//!
//! Example search response:
//! ```json
//! {
//!   "hits": {
//!     "total": 2,
//!     "hits": [
//!       {"_id": "a", "_source": {"title": "First"}},
//!       {"_id": "b", "_source": {"title": "Second"}}
//!     ]
//!   }
//! }
//! ```

use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// The document types moved between the store and the file system
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocumentType {
    Dashboard,
    Visualization,
    Search,
    IndexPattern,
}

impl DocumentType {
    /// Export order. Reading has no dependency requirement.
    pub const EXPORT_ORDER: [DocumentType; 4] = [
        Self::Dashboard,
        Self::Visualization,
        Self::Search,
        Self::IndexPattern,
    ];

    /// Import order: referenced types are written before the types that
    /// reference them.
    pub const IMPORT_ORDER: [DocumentType; 4] = [
        Self::IndexPattern,
        Self::Search,
        Self::Visualization,
        Self::Dashboard,
    ];

    /// Name used in store paths and as the directory name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Visualization => "visualization",
            Self::Search => "search",
            Self::IndexPattern => "index-pattern",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dashboard" => Ok(Self::Dashboard),
            "visualization" => Ok(Self::Visualization),
            "search" => Ok(Self::Search),
            "index-pattern" => Ok(Self::IndexPattern),
            _ => Err(()),
        }
    }
}

/// A document read from the store: its id and its `_source` payload
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub id: String,
    pub source: Value,
}

impl Document {
    pub fn new(id: impl Into<String>, source: Value) -> Self {
        Self {
            id: id.into(),
            source,
        }
    }

    /// File name the document is stored under
    pub fn file_name(&self) -> String {
        format!("{}.json", self.id)
    }
}

/// A document read from disk, ready to be uploaded as is
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentFile {
    /// Id derived from the file name
    pub id: String,
    /// Raw file content
    pub body: Vec<u8>,
}

impl DocumentFile {
    pub fn new(id: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            body,
        }
    }
}

/// Body of `GET <index>/<type>/_search`
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub hits: SearchHits,
}

#[derive(Debug, Deserialize)]
pub struct SearchHits {
    pub total: HitsTotal,
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

/// Total number of matching documents.
///
/// Older stores report a bare number, newer ones an object such as
/// `{"value": 12, "relation": "eq"}`.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum HitsTotal {
    Count(u64),
    Object { value: u64 },
}

impl HitsTotal {
    pub fn value(&self) -> u64 {
        match self {
            Self::Count(value) | Self::Object { value } => *value,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_source", default)]
    pub source: Value,
}

impl From<SearchHit> for Document {
    fn from(hit: SearchHit) -> Self {
        Document::new(hit.id, hit.source)
    }
}
