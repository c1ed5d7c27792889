//! Key/value blocks using the short vocabulary:
//!
//! ```text
//! name: Jane Roe
//! card: 4532015112830366
//! month: 04
//! year: 2028
//! cvc2: 321
//! ```
//!
//! The expiration is reported as `month/year` only when both parts are seen.

use tracing::trace;

use super::patterns::{KEY_VALUE_FIELD, SEPARATOR};
use super::{ExtractionStrategy, is_text};
use crate::card::builder::{BlockBuilder, BlockField};
use crate::models::{CandidateMatch, DocumentBody, RawDocument, StrategyTag};

fn label_field(label: &str) -> Option<BlockField> {
    match label {
        "name" => Some(BlockField::Name),
        "card" => Some(BlockField::Number),
        "month" => Some(BlockField::ExpirationMonth),
        "year" => Some(BlockField::ExpirationYear),
        "cvc2" => Some(BlockField::Cvc),
        _ => None,
    }
}

/// Key/value block strategy.
pub struct KeyValueBlockStrategy;

impl KeyValueBlockStrategy {
    pub fn new() -> Self {
        Self
    }

    pub fn extract_lines<S: AsRef<str>>(&self, lines: &[S]) -> Vec<CandidateMatch> {
        let mut results = Vec::new();
        let mut block = BlockBuilder::new(StrategyTag::KeyValueBlock);

        for line in lines {
            let line = line.as_ref();

            if SEPARATOR.is_match(line) {
                results.extend(block.finalize());
                continue;
            }

            let Some(caps) = KEY_VALUE_FIELD.captures(line) else {
                continue;
            };
            let Some(field) = label_field(&caps["label"].to_lowercase()) else {
                continue;
            };

            if field == BlockField::Name && block.has_number() {
                trace!("Key/value block closed by new name line");
                results.extend(block.finalize());
            }

            block.set(field, &caps["value"], line);
        }

        results.extend(block.finalize());
        results
    }
}

impl Default for KeyValueBlockStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionStrategy for KeyValueBlockStrategy {
    fn tag(&self) -> StrategyTag {
        StrategyTag::KeyValueBlock
    }

    fn applies_to(&self, body: &DocumentBody) -> bool {
        is_text(body)
    }

    fn extract(&self, document: &RawDocument) -> Vec<CandidateMatch> {
        self.extract_lines(document.lines().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_block() {
        let lines = [
            "name: Jane Roe",
            "card: 4532015112830366",
            "month: 04",
            "year: 2028",
            "cvc2: 321",
        ];
        let candidates = KeyValueBlockStrategy::new().extract_lines(&lines);

        assert_eq!(candidates.len(), 1);
        let c = &candidates[0];
        assert_eq!(c.name.as_deref(), Some("Jane Roe"));
        assert_eq!(c.raw_number, "4532015112830366");
        assert_eq!(c.expiration_month.as_deref(), Some("04"));
        assert_eq!(c.expiration_year.as_deref(), Some("2028"));
        assert_eq!(c.cvc.as_deref(), Some("321"));
        assert_eq!(c.origin_line, "cvc2: 321");
        assert_eq!(c.strategy, StrategyTag::KeyValueBlock);
    }

    #[test]
    fn test_reappearing_name_splits_blocks() {
        let lines = [
            "NAME: Jane Roe",
            "Card: 4532015112830366",
            "Name: John Doe",
            "card: 4111111111111111",
            "month: 1",
        ];
        let candidates = KeyValueBlockStrategy::new().extract_lines(&lines);

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].name.as_deref(), Some("Jane Roe"));
        assert_eq!(candidates[1].name.as_deref(), Some("John Doe"));
        assert_eq!(candidates[1].expiration_month.as_deref(), Some("1"));
        assert_eq!(candidates[1].expiration_year, None);
    }

    #[test]
    fn test_separator_closes_block() {
        let lines = ["card: 4532015112830366", "=====", "cvc2: 999"];
        let candidates = KeyValueBlockStrategy::new().extract_lines(&lines);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].cvc, None);
    }

    #[test]
    fn test_labeled_vocabulary_is_not_recognized() {
        let lines = ["Card Holder: Jane", "Card Number: 4532015112830366"];
        assert!(KeyValueBlockStrategy::new().extract_lines(&lines).is_empty());
    }
}
