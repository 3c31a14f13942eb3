//! CLI helper functions
//!
//! Runs the export and import pipelines for every document type and
//! collects what happened into a [`TransferReport`]. Nothing in here exits
//! the process or prints; the binary renders the report and picks the exit
//! status.

use crate::{
    client::StoreClient,
    etl::{Outcome, Pipeline},
    kibana::documents::{DocumentType, DocumentsExtractor, DocumentsLoader},
    storage::{DirectoryReader, DirectoryWriter},
};
use eyre::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// Index holding the Kibana objects unless told otherwise
pub const DEFAULT_INDEX: &str = ".kibana";

/// Transfer direction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Store to directory
    Export,
    /// Directory to store
    Import,
}

impl Mode {
    /// Document types in the order this mode processes them
    pub fn order(&self) -> [DocumentType; 4] {
        match self {
            Self::Export => DocumentType::EXPORT_ORDER,
            Self::Import => DocumentType::IMPORT_ORDER,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Export => write!(f, "export"),
            Self::Import => write!(f, "import"),
        }
    }
}

/// Parameters of one run
#[derive(Clone, Debug)]
pub struct TransferOptions {
    /// Store base URL, e.g. `http://localhost:9200`
    pub url: Url,
    /// Index below the base URL
    pub index: String,
    /// Root of the per-type directories
    pub dir: PathBuf,
    /// Skip TLS certificate validation when importing
    pub accept_invalid_certs: bool,
}

impl TransferOptions {
    /// Options for the default index. Import accepts invalid certificates
    /// unless [`TransferOptions::with_accept_invalid_certs`] says otherwise.
    pub fn new(url: Url, dir: impl AsRef<Path>) -> Self {
        Self {
            url,
            index: DEFAULT_INDEX.to_string(),
            dir: dir.as_ref().to_path_buf(),
            accept_invalid_certs: true,
        }
    }

    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = index.into();
        self
    }

    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Client for the given direction. Export always validates certificates.
    pub fn client(&self, mode: Mode) -> Result<StoreClient> {
        let accept_invalid_certs = match mode {
            Mode::Export => false,
            Mode::Import => self.accept_invalid_certs,
        };
        StoreClient::try_new(self.url.clone(), &self.index, accept_invalid_certs)
    }
}

/// What happened to one document type
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeReport {
    pub mode: Mode,
    pub doc_type: DocumentType,
    pub outcome: Outcome,
}

impl TypeReport {
    /// True when the type was skipped or every document made it across
    pub fn is_complete(&self) -> bool {
        self.outcome.is_complete()
    }

    pub fn is_skipped(&self) -> bool {
        self.outcome == Outcome::Skipped
    }
}

impl fmt::Display for TypeReport {
    /// Summary line of the type
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let doc_type = self.doc_type;
        match (&self.outcome, self.mode) {
            (Outcome::Skipped, _) => {
                write!(f, "[WARN] Documents \"{}\" not found, skipping", doc_type)
            }
            (Outcome::Completed { total, .. }, Mode::Export) if self.is_complete() => {
                write!(f, "[OK] Exported {} {}", total, doc_type)
            }
            (Outcome::Completed { total, .. }, Mode::Import) if self.is_complete() => {
                write!(f, "[OK] Imported all {} {}(-s/-es)", total, doc_type)
            }
            (
                Outcome::Completed {
                    total, successful, ..
                },
                Mode::Export,
            ) => write!(
                f,
                "[ERR] Exported only ({}/{}) {}(-s/-es)",
                successful, total, doc_type
            ),
            (
                Outcome::Completed {
                    total, successful, ..
                },
                Mode::Import,
            ) => write!(
                f,
                "[ERR] Imported only ({}/{}) {}(-s/-es)",
                successful, total, doc_type
            ),
        }
    }
}

/// Everything that happened during one run
#[derive(Debug)]
pub struct TransferReport {
    pub mode: Mode,
    /// Reports of the types processed, in processing order
    pub types: Vec<TypeReport>,
    /// The error that stopped the run early, if any
    pub fatal: Option<eyre::Report>,
}

impl TransferReport {
    fn new(mode: Mode) -> Self {
        Self {
            mode,
            types: Vec::new(),
            fatal: None,
        }
    }

    /// Process exit status: 1 after a fatal error, else 0. Partial
    /// per-document failures do not count.
    pub fn exit_code(&self) -> i32 {
        match self.fatal {
            Some(_) => 1,
            None => 0,
        }
    }

    /// Report of one document type, if it was processed
    pub fn get(&self, doc_type: DocumentType) -> Option<&TypeReport> {
        self.types.iter().find(|r| r.doc_type == doc_type)
    }
}

/// Export one document type from the store to `<dir>/<type>`
///
/// Pipeline: DocumentsExtractor → DirectoryWriter
///
/// # Errors
/// Returns an error if the search fails with anything but 404, or if the
/// output directory cannot be created.
pub async fn export_documents(
    client: &StoreClient,
    dir: impl AsRef<Path>,
    doc_type: DocumentType,
) -> Result<TypeReport> {
    let extractor = DocumentsExtractor::new(client.clone(), doc_type);
    let writer = DirectoryWriter::new(dir, doc_type);
    log::debug!("Exporting {} to {}", doc_type, writer.path().display());

    let outcome = Pipeline::new(extractor, writer).run().await?;

    Ok(TypeReport {
        mode: Mode::Export,
        doc_type,
        outcome,
    })
}

/// Import one document type from `<dir>/<type>` into the store
///
/// Pipeline: DirectoryReader → DocumentsLoader
///
/// # Errors
/// Returns an error if `<dir>/<type>` does not exist or cannot be listed.
/// No request is sent in that case.
pub async fn import_documents(
    client: &StoreClient,
    dir: impl AsRef<Path>,
    doc_type: DocumentType,
) -> Result<TypeReport> {
    let reader = DirectoryReader::new(dir, doc_type);
    log::debug!("Importing {} from {}", doc_type, reader.path().display());
    let loader = DocumentsLoader::new(client.clone(), doc_type);

    let outcome = Pipeline::new(reader, loader).run().await?;

    Ok(TypeReport {
        mode: Mode::Import,
        doc_type,
        outcome,
    })
}

/// Run every document type in the order of `mode`
///
/// Types are processed one after another. A per-document failure only
/// shows in that type's report; an error aborts the run and is kept in
/// [`TransferReport::fatal`] next to the reports of the types done so far.
pub async fn run(mode: Mode, options: &TransferOptions) -> TransferReport {
    run_with(mode, options, |_| {}).await
}

/// Like [`run`], calling `on_report` with each type report as soon as the
/// type is done
pub async fn run_with(
    mode: Mode,
    options: &TransferOptions,
    mut on_report: impl FnMut(&TypeReport),
) -> TransferReport {
    let mut report = TransferReport::new(mode);

    let client = match options.client(mode) {
        Ok(client) => client,
        Err(e) => {
            report.fatal = Some(e);
            return report;
        }
    };
    log::info!("Running {} against {}", mode, client);

    for doc_type in mode.order() {
        let result = match mode {
            Mode::Export => export_documents(&client, &options.dir, doc_type).await,
            Mode::Import => import_documents(&client, &options.dir, doc_type).await,
        };

        match result {
            Ok(type_report) => {
                on_report(&type_report);
                report.types.push(type_report);
            }
            Err(e) => {
                report.fatal = Some(e);
                break;
            }
        }
    }

    report
}
