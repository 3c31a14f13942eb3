//! Kibana object implementations
//!
//! This module provides ETL extractors and loaders for the Kibana objects
//! kept in the store's index.

pub mod documents;

pub use documents::{Document, DocumentFile, DocumentType, DocumentsExtractor, DocumentsLoader};
