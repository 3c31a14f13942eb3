//! Kibana documents stored in the store's index
//!
//! Provides extract and load operations for dashboards, visualizations,
//! searches and index-patterns.
//! File layout: `<dir>/<type>/<id>.json` (JSON - the document source only)

mod document;
mod extractor;
mod loader;

pub use document::{
    Document, DocumentFile, DocumentType, HitsTotal, SearchHit, SearchHits, SearchResponse,
};
pub use extractor::DocumentsExtractor;
pub use loader::DocumentsLoader;
