//! File system storage operations
//!
//! This module handles all file I/O: one directory per document type,
//! one JSON file per document.

mod directory;

pub use directory::{DirectoryReader, DirectoryWriter, document_id};
