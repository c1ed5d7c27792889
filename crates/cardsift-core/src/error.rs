//! Error types for the cardsift-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the cardsift library.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Failure listing or opening a document source.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// Failure loading a single document.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors scoped to one document. These never abort a scan run.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The document could not be opened or read.
    #[error("cannot read {identifier}: {source}")]
    UnreadableSource {
        identifier: String,
        #[source]
        source: std::io::Error,
    },

    /// The structured document is not a sequence of field mappings.
    #[error("malformed structured content in {identifier}: {reason}")]
    MalformedStructuredContent { identifier: String, reason: String },
}

impl DocumentError {
    /// Identifier of the document that failed.
    pub fn identifier(&self) -> &str {
        match self {
            Self::UnreadableSource { identifier, .. } => identifier,
            Self::MalformedStructuredContent { identifier, .. } => identifier,
        }
    }
}

/// Errors related to document sources (directories and archives).
#[derive(Error, Debug)]
pub enum SourceError {
    /// The source location does not exist.
    #[error("source not found: {0}")]
    NotFound(PathBuf),

    /// The archive could not be opened or indexed.
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Directory traversal failed.
    #[error("directory walk failed: {0}")]
    Walk(String),

    /// I/O error opening the source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the cardsift library.
pub type Result<T> = std::result::Result<T, ScanError>;
