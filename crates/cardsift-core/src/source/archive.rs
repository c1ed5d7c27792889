//! Zip archive source.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use zip::ZipArchive;

use super::DocumentSource;
use crate::error::{DocumentError, SourceError};
use crate::models::SourceConfig;

/// Documents stored as entries of a zip archive.
pub struct ArchiveSource {
    path: PathBuf,
    archive: ZipArchive<File>,
    config: SourceConfig,
}

impl ArchiveSource {
    /// Open and index an archive.
    pub fn open(path: &Path, config: SourceConfig) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        let archive = ZipArchive::new(file)?;
        Ok(Self {
            path: path.to_path_buf(),
            archive,
            config,
        })
    }
}

impl DocumentSource for ArchiveSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    /// Lists entries from their headers only. Entries that cannot be
    /// decrypted or decompressed are still listed and fail in [`read`].
    ///
    /// [`read`]: DocumentSource::read
    fn identifiers(&mut self) -> Result<Vec<String>, SourceError> {
        let mut identifiers = Vec::new();

        for index in 0..self.archive.len() {
            let entry = match self.archive.by_index_raw(index) {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry {} of {}: {}", index, self.path.display(), e);
                    continue;
                }
            };
            if entry.is_dir() {
                continue;
            }

            let name = entry.name().to_string();
            if !self.config.recursive && name.contains('/') {
                continue;
            }
            if !self.config.accepts(&name) {
                continue;
            }
            if !self.config.within_size(entry.size()) {
                debug!("Skipping {} ({} bytes over size cap)", name, entry.size());
                continue;
            }

            identifiers.push(name);
        }

        identifiers.sort();
        Ok(identifiers)
    }

    fn read(&mut self, identifier: &str) -> Result<Vec<u8>, DocumentError> {
        let unreadable = |source: std::io::Error| DocumentError::UnreadableSource {
            identifier: identifier.to_string(),
            source,
        };

        let mut entry = self
            .archive
            .by_name(identifier)
            .map_err(|e| unreadable(std::io::Error::other(e)))?;

        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes).map_err(unreadable)?;
        Ok(bytes)
    }
}
