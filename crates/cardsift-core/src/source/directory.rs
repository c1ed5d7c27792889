//! Filesystem directory source.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use super::DocumentSource;
use crate::error::{DocumentError, SourceError};
use crate::models::SourceConfig;

/// Documents stored as files under a directory.
///
/// Only the top level is listed unless `recursive` is set. Identifiers are
/// paths relative to the root, `/`-separated.
pub struct DirectorySource {
    root: PathBuf,
    config: SourceConfig,
}

impl DirectorySource {
    pub fn new(root: &Path, config: SourceConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            config,
        }
    }

    fn identifier_for(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }

    fn keep(&self, identifier: &str, size: u64) -> bool {
        if !self.config.accepts(identifier) {
            return false;
        }
        if !self.config.within_size(size) {
            debug!("Skipping {} ({} bytes over size cap)", identifier, size);
            return false;
        }
        true
    }
}

impl DocumentSource for DirectorySource {
    fn location(&self) -> String {
        self.root.display().to_string()
    }

    fn identifiers(&mut self) -> Result<Vec<String>, SourceError> {
        let max_depth = if self.config.recursive { usize::MAX } else { 1 };
        let mut identifiers = Vec::new();

        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(max_depth)
            .follow_links(false)
        {
            let entry = match entry {
                Ok(entry) => entry,
                // The root itself cannot be listed.
                Err(e) if e.depth() == 0 => return Err(SourceError::Walk(e.to_string())),
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", self.root.display(), e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(identifier) = self.identifier_for(entry.path()) else {
                continue;
            };
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);

            if self.keep(&identifier, size) {
                identifiers.push(identifier);
            }
        }

        identifiers.sort();
        Ok(identifiers)
    }

    fn read(&mut self, identifier: &str) -> Result<Vec<u8>, DocumentError> {
        fs::read(self.root.join(identifier)).map_err(|source| DocumentError::UnreadableSource {
            identifier: identifier.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.json"), "[]").unwrap();
        fs::write(dir.path().join("image.png"), "png").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.txt"), "c").unwrap();
        dir
    }

    #[test]
    fn test_flat_listing() {
        let dir = fixture();
        let mut source = DirectorySource::new(dir.path(), SourceConfig::default());
        assert_eq!(source.identifiers().unwrap(), vec!["a.json", "b.txt"]);
    }

    #[test]
    fn test_recursive_listing() {
        let dir = fixture();
        let config = SourceConfig {
            recursive: true,
            ..Default::default()
        };
        let mut source = DirectorySource::new(dir.path(), config);
        assert_eq!(
            source.identifiers().unwrap(),
            vec!["a.json", "b.txt", "nested/c.txt"]
        );
        assert_eq!(source.read("nested/c.txt").unwrap(), b"c");
    }

    #[test]
    fn test_size_cap() {
        let dir = fixture();
        fs::write(dir.path().join("big.txt"), "0123456789").unwrap();
        let config = SourceConfig {
            max_file_size: 5,
            ..Default::default()
        };
        let mut source = DirectorySource::new(dir.path(), config);
        assert_eq!(source.identifiers().unwrap(), vec!["a.json", "b.txt"]);
    }

    #[test]
    fn test_missing_root_is_a_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = DirectorySource::new(&dir.path().join("gone"), SourceConfig::default());
        assert!(matches!(source.identifiers(), Err(SourceError::Walk(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_does_not_stop_listing() {
        use std::os::unix::fs::PermissionsExt;

        let dir = fixture();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("d.txt"), "d").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let config = SourceConfig {
            recursive: true,
            ..Default::default()
        };
        let mut source = DirectorySource::new(dir.path(), config);
        let listed = source.identifiers();

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let listed = listed.unwrap();
        assert!(listed.contains(&"a.json".to_string()));
        assert!(listed.contains(&"b.txt".to_string()));
        assert!(listed.contains(&"nested/c.txt".to_string()));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = fixture();
        let mut source = DirectorySource::new(dir.path(), SourceConfig::default());
        let err = source.read("gone.txt").unwrap_err();
        assert_eq!(err.identifier(), "gone.txt");
    }
}
