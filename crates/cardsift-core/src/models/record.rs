//! Document, candidate and card record models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default for any field that could not be recovered.
pub const UNKNOWN: &str = "Unknown";

/// Shortest digit string accepted as a card number.
pub const MIN_CARD_DIGITS: usize = 13;

/// Longest digit string accepted as a card number.
pub const MAX_CARD_DIGITS: usize = 19;

/// A loaded document. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    /// File name (or archive entry name) the document came from.
    pub identifier: String,
    /// Decoded content.
    pub body: DocumentBody,
}

impl RawDocument {
    /// Build a text document from already-split lines.
    pub fn text(identifier: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            identifier: identifier.into(),
            body: DocumentBody::Text(lines),
        }
    }

    /// Build a structured document from parsed objects.
    pub fn structured(identifier: impl Into<String>, objects: Vec<Map<String, Value>>) -> Self {
        Self {
            identifier: identifier.into(),
            body: DocumentBody::Structured(objects),
        }
    }

    /// Text lines, if this is a text document.
    pub fn lines(&self) -> Option<&[String]> {
        match &self.body {
            DocumentBody::Text(lines) => Some(lines),
            DocumentBody::Structured(_) => None,
        }
    }
}

/// Content of a document.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentBody {
    /// Non-empty lines with trailing whitespace stripped.
    Text(Vec<String>),
    /// Array-of-objects content, in document order.
    Structured(Vec<Map<String, Value>>),
}

/// Which recognition procedure produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyTag {
    /// `name | number | exp | cvc` style rows.
    DelimitedRow,
    /// `Card Holder:` / `Card Number:` blocks.
    LabeledBlock,
    /// `name:` / `card:` / `month:` / `year:` blocks.
    KeyValueBlock,
    /// Bare digit runs anywhere in a line.
    FreeformScan,
    /// Objects of a JSON array.
    StructuredRecord,
}

impl StrategyTag {
    /// Every strategy, in the order the engine applies them.
    pub const ALL: [StrategyTag; 5] = [
        Self::DelimitedRow,
        Self::LabeledBlock,
        Self::KeyValueBlock,
        Self::FreeformScan,
        Self::StructuredRecord,
    ];

    /// Stable name used in configuration and output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DelimitedRow => "delimited_row",
            Self::LabeledBlock => "labeled_block",
            Self::KeyValueBlock => "key_value_block",
            Self::FreeformScan => "freeform_scan",
            Self::StructuredRecord => "structured_record",
        }
    }
}

impl std::fmt::Display for StrategyTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unvalidated field bundle located by a strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateMatch {
    /// Number as found, separators included.
    pub raw_number: String,
    pub name: Option<String>,
    pub expiration: Option<String>,
    /// Month part, joined with `expiration_year` when `expiration` is absent.
    pub expiration_month: Option<String>,
    pub expiration_year: Option<String>,
    pub cvc: Option<String>,
    /// Line (or serialized object) the candidate was found on.
    pub origin_line: String,
    pub strategy: StrategyTag,
}

impl CandidateMatch {
    /// Create a candidate with only a number and its origin.
    pub fn new(
        raw_number: impl Into<String>,
        origin_line: impl Into<String>,
        strategy: StrategyTag,
    ) -> Self {
        Self {
            raw_number: raw_number.into(),
            name: None,
            expiration: None,
            expiration_month: None,
            expiration_year: None,
            cvc: None,
            origin_line: origin_line.into(),
            strategy,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_expiration(mut self, expiration: impl Into<String>) -> Self {
        self.expiration = Some(expiration.into());
        self
    }

    pub fn with_expiration_parts(
        mut self,
        month: Option<String>,
        year: Option<String>,
    ) -> Self {
        self.expiration_month = month;
        self.expiration_year = year;
        self
    }

    pub fn with_cvc(mut self, cvc: impl Into<String>) -> Self {
        self.cvc = Some(cvc.into());
        self
    }
}

/// A validated, normalized card record.
///
/// Only [`crate::card::normalize`] constructs these, so the card number is
/// always digits-only, 13 to 19 long, and Luhn-valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardRecord {
    card_number: String,
    name: String,
    expiration: String,
    cvc: String,
    origin_line: String,
    source: String,
    strategy: StrategyTag,
}

impl CardRecord {
    pub(crate) fn new(
        card_number: String,
        name: String,
        expiration: String,
        cvc: String,
        origin_line: String,
        source: String,
        strategy: StrategyTag,
    ) -> Self {
        Self {
            card_number,
            name,
            expiration,
            cvc,
            origin_line,
            source,
            strategy,
        }
    }

    pub fn card_number(&self) -> &str {
        &self.card_number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expiration(&self) -> &str {
        &self.expiration
    }

    pub fn cvc(&self) -> &str {
        &self.cvc
    }

    pub fn origin_line(&self) -> &str {
        &self.origin_line
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn strategy(&self) -> StrategyTag {
        self.strategy
    }

    /// Identity used for run-scoped deduplication.
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey {
            card_number: self.card_number.clone(),
            name: self.name.clone(),
            expiration: self.expiration.clone(),
            cvc: self.cvc.clone(),
            source: self.source.clone(),
            origin_line: self.origin_line.clone(),
        }
    }
}

/// Two records with equal keys are the same observation.
///
/// The strategy tag is deliberately absent: a repeat found by another
/// strategy is still a repeat.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub card_number: String,
    pub name: String,
    pub expiration: String,
    pub cvc: String,
    pub source: String,
    pub origin_line: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(source: &str, strategy: StrategyTag) -> CardRecord {
        CardRecord::new(
            "4532015112830366".to_string(),
            "John Doe".to_string(),
            "12/2025".to_string(),
            "123".to_string(),
            "John Doe | 4532015112830366".to_string(),
            source.to_string(),
            strategy,
        )
    }

    #[test]
    fn test_dedup_key_ignores_strategy() {
        let a = record("a.txt", StrategyTag::DelimitedRow);
        let b = record("a.txt", StrategyTag::FreeformScan);
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn test_dedup_key_includes_source() {
        let a = record("a.txt", StrategyTag::DelimitedRow);
        let b = record("b.txt", StrategyTag::DelimitedRow);
        assert_ne!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn test_strategy_tag_serializes_snake_case() {
        let json = serde_json::to_string(&StrategyTag::KeyValueBlock).unwrap();
        assert_eq!(json, "\"key_value_block\"");
        assert_eq!(StrategyTag::KeyValueBlock.to_string(), "key_value_block");
    }

    #[test]
    fn test_document_lines() {
        let doc = RawDocument::text("a.txt", vec!["x".to_string()]);
        assert_eq!(doc.lines(), Some(&["x".to_string()][..]));
        let doc = RawDocument::structured("a.json", Vec::new());
        assert!(doc.lines().is_none());
    }
}
