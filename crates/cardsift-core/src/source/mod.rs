//! Document sources: anything that yields `(identifier, bytes)` pairs.

mod archive;
mod directory;

pub use archive::ArchiveSource;
pub use directory::DirectorySource;

use std::path::Path;

use crate::error::{DocumentError, SourceError};
use crate::models::SourceConfig;

/// A collection of named documents.
pub trait DocumentSource {
    /// Human-readable location, for logs.
    fn location(&self) -> String;

    /// Identifiers of the documents to scan, in a stable order.
    fn identifiers(&mut self) -> Result<Vec<String>, SourceError>;

    /// Read one document in full.
    fn read(&mut self, identifier: &str) -> Result<Vec<u8>, DocumentError>;
}

/// Open a directory, or a `.zip` archive, as a document source.
pub fn open_source(
    path: &Path,
    config: &SourceConfig,
) -> Result<Box<dyn DocumentSource>, SourceError> {
    if !path.exists() {
        return Err(SourceError::NotFound(path.to_path_buf()));
    }

    if path.is_dir() {
        return Ok(Box::new(DirectorySource::new(path, config.clone())));
    }

    Ok(Box::new(ArchiveSource::open(path, config.clone())?))
}

/// In-memory documents, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: Vec<(String, Vec<u8>)>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, identifier: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.documents.push((identifier.into(), bytes.into()));
        self
    }
}

impl DocumentSource for MemorySource {
    fn location(&self) -> String {
        "memory".to_string()
    }

    fn identifiers(&mut self) -> Result<Vec<String>, SourceError> {
        Ok(self.documents.iter().map(|(id, _)| id.clone()).collect())
    }

    fn read(&mut self, identifier: &str) -> Result<Vec<u8>, DocumentError> {
        self.documents
            .iter()
            .find(|(id, _)| id == identifier)
            .map(|(_, bytes)| bytes.clone())
            .ok_or_else(|| DocumentError::UnreadableSource {
                identifier: identifier.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such document"),
            })
    }
}
