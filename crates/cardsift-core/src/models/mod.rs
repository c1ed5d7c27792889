//! Data models for documents, card records and configuration.

pub mod config;
pub mod record;

pub use config::{CollectorConfig, ExtractionConfig, OutputConfig, ScanConfig, SourceConfig};
pub use record::{
    CandidateMatch, CardRecord, DedupKey, DocumentBody, RawDocument, StrategyTag, UNKNOWN,
    MAX_CARD_DIGITS, MIN_CARD_DIGITS,
};
