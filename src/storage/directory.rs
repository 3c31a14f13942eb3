//! Directory-based document storage
//!
//! Each document type lives in its own directory, one `<id>.json` file
//! per document.

use crate::etl::{Batch, Extractor, ItemFailure, LoadReport, Loader};
use crate::kibana::documents::{Document, DocumentFile, DocumentType};
use eyre::{Context, Result};
use std::path::{Path, PathBuf};

/// Read document files from `<root>/<type>`
pub struct DirectoryReader {
    path: PathBuf,
}

impl DirectoryReader {
    pub fn new(root: impl AsRef<Path>, doc_type: DocumentType) -> Self {
        Self {
            path: root.as_ref().join(doc_type.as_str()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List the files directly inside the directory, sorted by name.
    ///
    /// Subdirectories are ignored. Symlinks to files are followed.
    pub fn list_files(&self) -> Result<Vec<PathBuf>> {
        if !self.path.is_dir() {
            eyre::bail!("Folder not found: {}", self.path.display());
        }

        let mut files = Vec::new();
        let entries = std::fs::read_dir(&self.path)
            .with_context(|| format!("Failed to read directory: {}", self.path.display()))?;

        for entry in entries {
            let entry = entry
                .with_context(|| format!("Failed to read directory: {}", self.path.display()))?;
            let path = entry.path();
            if path.is_file() {
                files.push(path);
            } else {
                log::debug!("Ignoring {}", path.display());
            }
        }

        files.sort();
        Ok(files)
    }

    /// Read every file, deriving each document id from the file name.
    ///
    /// Files that cannot be read are returned as failures and still count
    /// towards the batch total.
    pub fn read_all(&self) -> Result<Batch<DocumentFile>> {
        let files = self.list_files()?;
        let total = files.len() as u64;

        let mut items = Vec::with_capacity(files.len());
        let mut failures = Vec::new();

        for path in files {
            match read_document_file(&path) {
                Ok(file) => items.push(file),
                Err(e) => {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    failures.push(ItemFailure::new(name, format!("{:#}", e)));
                }
            }
        }

        Ok(Batch::new(items)
            .with_total(total)
            .with_failures(failures))
    }
}

/// Document id for a file: the file name without its last extension
pub fn document_id(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|s| s.to_str())
}

/// Reject ids that would not land as a single file inside the type directory
fn check_file_id(id: &str) -> Result<()> {
    if id.is_empty() || id == "." || id == ".." {
        eyre::bail!("Invalid document id: {:?}", id);
    }
    if id.chars().any(std::path::is_separator) || Path::new(id).is_absolute() {
        eyre::bail!("Document id contains a path separator: {:?}", id);
    }
    Ok(())
}

fn read_document_file(path: &Path) -> Result<DocumentFile> {
    let id = document_id(path)
        .ok_or_else(|| eyre::eyre!("Invalid file name: {}", path.display()))?;
    let body = std::fs::read(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(DocumentFile::new(id, body))
}

// Implement Extractor trait for reading from directories
impl Extractor for DirectoryReader {
    type Item = DocumentFile;

    async fn extract(&self) -> Result<Option<Batch<Self::Item>>> {
        self.read_all().map(Some)
    }
}

/// Write documents to `<root>/<type>`
///
/// The directory is created on the first load, not on construction, so a
/// skipped type leaves no trace on disk.
pub struct DirectoryWriter {
    path: PathBuf,
    doc_type: DocumentType,
}

impl DirectoryWriter {
    pub fn new(root: impl AsRef<Path>, doc_type: DocumentType) -> Self {
        Self {
            path: root.as_ref().join(doc_type.as_str()),
            doc_type,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write each document source, pretty-printed, to `<id>.json`
    pub fn write_all(&self, items: &[Document]) -> Result<LoadReport> {
        std::fs::create_dir_all(&self.path)
            .with_context(|| format!("Failed to create directory: {}", self.path.display()))?;

        let mut report = LoadReport::new();

        for item in items {
            let file_name = item.file_name();
            match self.write_one(&file_name, item) {
                Ok(()) => report.success(),
                Err(e) => report.failure(ItemFailure::new(
                    &item.id,
                    format!(
                        "Failed to backup {} \"{}\": {:#}",
                        self.doc_type, file_name, e
                    ),
                )),
            }
        }

        Ok(report)
    }

    fn write_one(&self, file_name: &str, item: &Document) -> Result<()> {
        check_file_id(&item.id)?;
        let json = serde_json::to_string_pretty(&item.source)?;
        std::fs::write(self.path.join(file_name), json)?;
        Ok(())
    }
}

// Implement Loader trait for writing to directories
impl Loader for DirectoryWriter {
    type Item = Document;

    async fn load(&self, items: Vec<Self::Item>) -> Result<LoadReport> {
        self.write_all(&items)
    }
}
