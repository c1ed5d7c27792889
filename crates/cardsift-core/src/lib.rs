//! Core library for card record extraction.
//!
//! This crate provides:
//! - Luhn checksum validation
//! - Candidate location over delimited rows, labeled blocks, key/value blocks,
//!   free text and JSON arrays of objects
//! - Normalization into canonical card records
//! - Run-scoped deduplication and report rendering
//! - Directory and zip archive document sources

pub mod card;
pub mod document;
pub mod error;
pub mod heuristic;
pub mod models;
pub mod report;
pub mod result_set;
pub mod source;

pub use card::{ExtractionStrategy, Scanner, ScanRun, validate_luhn};
pub use error::{DocumentError, Result, ScanError, SourceError};
pub use models::{CandidateMatch, CardRecord, RawDocument, ScanConfig, StrategyTag};
pub use result_set::{ResultSet, ScanSummary};
pub use source::{ArchiveSource, DirectorySource, DocumentSource, MemorySource, open_source};
