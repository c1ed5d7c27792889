//! Typed accumulator for multi-line card blocks.

use crate::models::{CandidateMatch, StrategyTag};

/// Field slot a recognized label writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockField {
    Name,
    Number,
    Expiration,
    ExpirationMonth,
    ExpirationYear,
    Cvc,
}

/// Whether a builder holds anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    Empty,
    Accumulating,
}

/// Buffers the fields of one block until it is finalized.
#[derive(Debug, Clone)]
pub struct BlockBuilder {
    strategy: StrategyTag,
    name: Option<String>,
    number: Option<String>,
    expiration: Option<String>,
    expiration_month: Option<String>,
    expiration_year: Option<String>,
    cvc: Option<String>,
    last_line: Option<String>,
}

impl BlockBuilder {
    pub fn new(strategy: StrategyTag) -> Self {
        Self {
            strategy,
            name: None,
            number: None,
            expiration: None,
            expiration_month: None,
            expiration_year: None,
            cvc: None,
            last_line: None,
        }
    }

    pub fn state(&self) -> BlockState {
        if self.last_line.is_some() {
            BlockState::Accumulating
        } else {
            BlockState::Empty
        }
    }

    /// Whether a non-blank number is buffered.
    pub fn has_number(&self) -> bool {
        self.number.as_deref().is_some_and(|n| !n.trim().is_empty())
    }

    /// Store a value. A later value for the same slot replaces the earlier one.
    pub fn set(&mut self, field: BlockField, value: &str, line: &str) {
        let slot = match field {
            BlockField::Name => &mut self.name,
            BlockField::Number => &mut self.number,
            BlockField::Expiration => &mut self.expiration,
            BlockField::ExpirationMonth => &mut self.expiration_month,
            BlockField::ExpirationYear => &mut self.expiration_year,
            BlockField::Cvc => &mut self.cvc,
        };
        *slot = Some(value.trim().to_string());
        self.last_line = Some(line.to_string());
    }

    /// Close the current block and reset to empty.
    ///
    /// Returns a candidate when a number was buffered; the checksum is left
    /// to the normalizer.
    pub fn finalize(&mut self) -> Option<CandidateMatch> {
        let strategy = self.strategy;
        let block = std::mem::replace(self, Self::new(strategy));

        if !block.has_number() {
            return None;
        }

        let number = block.number?;
        let mut candidate =
            CandidateMatch::new(number, block.last_line.unwrap_or_default(), block.strategy)
                .with_expiration_parts(block.expiration_month, block.expiration_year);
        candidate.name = block.name;
        candidate.expiration = block.expiration;
        candidate.cvc = block.cvc;
        Some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_state_transitions() {
        let mut builder = BlockBuilder::new(StrategyTag::LabeledBlock);
        assert_eq!(builder.state(), BlockState::Empty);

        builder.set(BlockField::Name, " Jane ", "Card Holder: Jane");
        assert_eq!(builder.state(), BlockState::Accumulating);
        assert!(!builder.has_number());

        builder.set(BlockField::Number, "4532015112830366", "Card Number: 4532015112830366");
        assert!(builder.has_number());

        let candidate = builder.finalize().unwrap();
        assert_eq!(builder.state(), BlockState::Empty);
        assert_eq!(candidate.name.as_deref(), Some("Jane"));
        assert_eq!(candidate.origin_line, "Card Number: 4532015112830366");
        assert_eq!(candidate.strategy, StrategyTag::LabeledBlock);
    }

    #[test]
    fn test_finalize_without_number_discards() {
        let mut builder = BlockBuilder::new(StrategyTag::KeyValueBlock);
        builder.set(BlockField::Name, "Jane", "name: Jane");
        builder.set(BlockField::Number, "   ", "card:   ");

        assert!(builder.finalize().is_none());
        assert_eq!(builder.state(), BlockState::Empty);
        assert!(builder.finalize().is_none());
    }

    #[test]
    fn test_finalize_carries_expiration_parts() {
        let mut builder = BlockBuilder::new(StrategyTag::KeyValueBlock);
        builder.set(BlockField::Number, "4532015112830366", "card: 4532015112830366");
        builder.set(BlockField::ExpirationMonth, "04", "month: 04");
        builder.set(BlockField::ExpirationYear, "2028", "year: 2028");

        let candidate = builder.finalize().unwrap();
        assert_eq!(candidate.expiration, None);
        assert_eq!(candidate.expiration_month.as_deref(), Some("04"));
        assert_eq!(candidate.expiration_year.as_deref(), Some("2028"));
        assert_eq!(candidate.origin_line, "year: 2028");
    }

    #[test]
    fn test_later_value_replaces_earlier() {
        let mut builder = BlockBuilder::new(StrategyTag::LabeledBlock);
        builder.set(BlockField::Cvc, "111", "CVC: 111");
        builder.set(BlockField::Cvc, "222", "CVC: 222");
        builder.set(BlockField::Number, "4532015112830366", "Number: 4532015112830366");
        assert_eq!(builder.finalize().unwrap().cvc.as_deref(), Some("222"));
    }
}
