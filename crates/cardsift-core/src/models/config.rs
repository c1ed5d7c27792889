//! Configuration structures for a scan run.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::record::StrategyTag;
use crate::error::{Result, ScanError};

/// Main configuration for cardsift.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Where documents come from.
    pub source: SourceConfig,

    /// Candidate extraction configuration.
    pub extraction: ExtractionConfig,

    /// Report output configuration.
    pub output: OutputConfig,

    /// File collector configuration.
    pub collector: CollectorConfig,
}

/// Document source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Directory or `.zip` archive to scan.
    pub path: PathBuf,

    /// File extensions (without dot, lowercase) that are scanned.
    pub extensions: Vec<String>,

    /// Descend into subdirectories.
    pub recursive: bool,

    /// Files larger than this are skipped (0 = unlimited).
    pub max_file_size: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("staging"),
            extensions: vec!["txt".to_string(), "json".to_string()],
            recursive: false,
            max_file_size: 0,
        }
    }
}

impl SourceConfig {
    /// Whether a document name has one of the configured extensions.
    pub fn accepts(&self, identifier: &str) -> bool {
        let Some((_, ext)) = identifier.rsplit_once('.') else {
            return false;
        };
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }

    /// Whether a file of `size` bytes is within the size cap.
    pub fn within_size(&self, size: u64) -> bool {
        self.max_file_size == 0 || size <= self.max_file_size
    }
}

/// Candidate extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Field delimiter for delimited rows.
    pub delimiter: String,

    /// Strategies to run, applied in [`StrategyTag::ALL`] order.
    pub strategies: Vec<StrategyTag>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            delimiter: "|".to_string(),
            strategies: StrategyTag::ALL.to_vec(),
        }
    }
}

impl ExtractionConfig {
    pub fn is_enabled(&self, tag: StrategyTag) -> bool {
        self.strategies.contains(&tag)
    }
}

/// Report output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Report file path.
    pub report_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: PathBuf::from("valid_luhn_results.txt"),
        }
    }
}

/// Staging collector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Case-insensitive keyword matched against folder and file names.
    pub keyword: String,

    /// Fall back to the content heuristic when names do not match.
    pub scan_contents: bool,

    /// Files larger than this are never content-matched.
    pub max_file_size: u64,

    /// Glob patterns for paths that are never collected.
    pub exclude: Vec<String>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            keyword: "creditcard".to_string(),
            scan_contents: true,
            max_file_size: 5 * 1024 * 1024,
            exclude: Vec::new(),
        }
    }
}

impl ScanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| ScanError::Config(e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ScanError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
