//! Delimited rows such as `John Doe | 4532015112830366 | 12/2025 | 123`.
//!
//! Companion fields are assigned by the position of the number column only:
//! number in column 1 means name, expiration, cvc in columns 0, 2, 3; number
//! in column 0 means expiration, cvc in columns 1, 2. Any other column leaves
//! every companion unset.
//!
//! The number column is the first field that passes the checksum. A row with
//! card-length fields but no valid one still yields its first such field, so
//! the normalizer can reject it.

use tracing::trace;

use super::luhn::{digits_only, has_card_length, mask_card_number, validate_luhn};
use super::{ExtractionStrategy, is_text};
use crate::models::{CandidateMatch, DocumentBody, RawDocument, StrategyTag};

/// Delimited row strategy.
pub struct DelimitedRowStrategy {
    delimiter: String,
}

impl DelimitedRowStrategy {
    /// Create a strategy splitting on `|`.
    pub fn new() -> Self {
        Self {
            delimiter: "|".to_string(),
        }
    }

    /// Set the field delimiter. An empty delimiter falls back to `|`.
    pub fn with_delimiter(mut self, delimiter: &str) -> Self {
        if !delimiter.is_empty() {
            self.delimiter = delimiter.to_string();
        }
        self
    }

    /// Extract a candidate from a single line.
    pub fn extract_line(&self, line: &str) -> Option<CandidateMatch> {
        if !line.contains(self.delimiter.as_str()) {
            return None;
        }

        let fields: Vec<&str> = line.split(self.delimiter.as_str()).map(str::trim).collect();

        // First checksum-valid column, else the first card-length one.
        let card_length = |field: &&str| has_card_length(&digits_only(field));
        let index = fields
            .iter()
            .position(|field| card_length(field) && validate_luhn(&digits_only(field)))
            .or_else(|| fields.iter().position(|field| card_length(field)))?;

        trace!(
            "Delimited number {} in column {} of {}",
            mask_card_number(fields[index]),
            index,
            fields.len()
        );

        let mut candidate = CandidateMatch::new(fields[index], line, StrategyTag::DelimitedRow);
        let field = |i: usize| fields.get(i).map(|f| f.to_string());

        match index {
            1 => {
                candidate.name = field(0);
                candidate.expiration = field(2);
                candidate.cvc = field(3);
            }
            0 => {
                candidate.expiration = field(1);
                candidate.cvc = field(2);
            }
            _ => {}
        }

        Some(candidate)
    }
}

impl Default for DelimitedRowStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionStrategy for DelimitedRowStrategy {
    fn tag(&self) -> StrategyTag {
        StrategyTag::DelimitedRow
    }

    fn applies_to(&self, body: &DocumentBody) -> bool {
        is_text(body)
    }

    fn extract(&self, document: &RawDocument) -> Vec<CandidateMatch> {
        document
            .lines()
            .unwrap_or_default()
            .iter()
            .filter_map(|line| self.extract_line(line))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::normalize::normalize;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_number_in_second_column() {
        let line = "John Doe | 4532015112830366 | 12/2025 | 123";
        let candidate = DelimitedRowStrategy::new().extract_line(line).unwrap();

        assert_eq!(candidate.raw_number, "4532015112830366");
        assert_eq!(candidate.name.as_deref(), Some("John Doe"));
        assert_eq!(candidate.expiration.as_deref(), Some("12/2025"));
        assert_eq!(candidate.cvc.as_deref(), Some("123"));
        assert_eq!(candidate.origin_line, line);
        assert_eq!(candidate.strategy, StrategyTag::DelimitedRow);
    }

    #[test]
    fn test_number_in_first_column() {
        let candidate = DelimitedRowStrategy::new()
            .extract_line("4532015112830366|01/27|456|extra")
            .unwrap();

        assert_eq!(candidate.name, None);
        assert_eq!(candidate.expiration.as_deref(), Some("01/27"));
        assert_eq!(candidate.cvc.as_deref(), Some("456"));
    }

    #[test]
    fn test_number_in_other_column_has_no_companions() {
        let candidate = DelimitedRowStrategy::new()
            .extract_line("Jane | Roe | 4532015112830366 | 01/27 | 456")
            .unwrap();

        assert_eq!(candidate.raw_number, "4532015112830366");
        assert_eq!(candidate.name, None);
        assert_eq!(candidate.expiration, None);
        assert_eq!(candidate.cvc, None);
    }

    #[test]
    fn test_short_row_leaves_missing_columns_unset() {
        let candidate = DelimitedRowStrategy::new()
            .extract_line("John Doe | 4532 0151 1283 0366")
            .unwrap();

        assert_eq!(candidate.raw_number, "4532 0151 1283 0366");
        assert_eq!(candidate.name.as_deref(), Some("John Doe"));
        assert_eq!(candidate.expiration, None);
        assert_eq!(candidate.cvc, None);
    }

    #[test]
    fn test_rows_without_number() {
        let strategy = DelimitedRowStrategy::new();
        assert!(strategy.extract_line("4532015112830366 12/2025 123").is_none());
        assert!(strategy.extract_line("a | b | c").is_none());
        assert!(strategy.extract_line("a | 453201511283 | c").is_none());
    }

    #[test]
    fn test_invalid_number_is_still_a_candidate() {
        let strategy = DelimitedRowStrategy::new();
        let candidate = strategy
            .extract_line("John Doe | 4532015112830367 | 12/2025")
            .unwrap();
        assert_eq!(candidate.raw_number, "4532015112830367");
        assert_eq!(candidate.name.as_deref(), Some("John Doe"));
        assert!(normalize(&candidate, "a.txt").is_none());
    }

    #[test]
    fn test_valid_column_wins_over_earlier_invalid_one() {
        let candidate = DelimitedRowStrategy::new()
            .extract_line("4532015112830367 | 4532015112830366 | 12/2025")
            .unwrap();
        assert_eq!(candidate.raw_number, "4532015112830366");
    }

    #[test]
    fn test_custom_delimiter() {
        let strategy = DelimitedRowStrategy::new().with_delimiter(";");
        let candidate = strategy.extract_line("Jane;4532015112830366;03/29").unwrap();
        assert_eq!(candidate.name.as_deref(), Some("Jane"));
        assert!(strategy.extract_line("Jane | 4532015112830366").is_none());
    }

    #[test]
    fn test_extract_document() {
        let doc = RawDocument::text(
            "dump.txt",
            vec![
                "header | line".to_string(),
                "John Doe | 4532015112830366 | 12/2025 | 123".to_string(),
                "free text 4111111111111111".to_string(),
            ],
        );
        let candidates = DelimitedRowStrategy::new().extract(&doc);
        assert_eq!(candidates.len(), 1);
    }
}
