//! Kibana IO
//!
//! Export Kibana dashboards, visualizations, searches and index-patterns
//! from the store's index to a directory of JSON files, and import them
//! back.

pub mod cli;
pub mod client;
pub mod etl;
pub mod kibana;
pub mod storage;

// Re-exports for convenience
pub use cli::{Mode, TransferOptions, TransferReport, TypeReport};
pub use client::StoreClient;
pub use etl::{Extractor, Loader, Pipeline};
pub use kibana::documents::{Document, DocumentFile, DocumentType};
pub use storage::{DirectoryReader, DirectoryWriter};
