//! Rule-based candidate locators for card records.

pub mod delimited;
pub mod freeform;
pub mod key_value;
pub mod labeled;
pub mod luhn;
pub mod patterns;
pub mod structured;

pub use delimited::DelimitedRowStrategy;
pub use freeform::FreeformScanStrategy;
pub use key_value::KeyValueBlockStrategy;
pub use labeled::LabeledBlockStrategy;
pub use luhn::{digits_only, has_card_length, mask_card_number, validate_luhn};
pub use structured::StructuredRecordStrategy;

use crate::models::{CandidateMatch, DocumentBody, ExtractionConfig, RawDocument, StrategyTag};

/// One recognition procedure over a document layout.
///
/// Strategies are independent: each sees the whole document and reports every
/// candidate it locates, overlapping or not with the others.
pub trait ExtractionStrategy {
    /// Tag carried by every candidate this strategy produces.
    fn tag(&self) -> StrategyTag;

    /// Whether the strategy understands this kind of body.
    fn applies_to(&self, body: &DocumentBody) -> bool;

    /// Locate all candidates in the document, in discovery order.
    fn extract(&self, document: &RawDocument) -> Vec<CandidateMatch>;
}

/// True for line-oriented bodies.
fn is_text(body: &DocumentBody) -> bool {
    matches!(body, DocumentBody::Text(_))
}

/// Build the enabled strategies in application order.
pub fn build_strategies(config: &ExtractionConfig) -> Vec<Box<dyn ExtractionStrategy>> {
    StrategyTag::ALL
        .iter()
        .filter(|tag| config.is_enabled(**tag))
        .map(|tag| -> Box<dyn ExtractionStrategy> {
            match tag {
                StrategyTag::DelimitedRow => {
                    Box::new(DelimitedRowStrategy::new().with_delimiter(&config.delimiter))
                }
                StrategyTag::LabeledBlock => Box::new(LabeledBlockStrategy::new()),
                StrategyTag::KeyValueBlock => Box::new(KeyValueBlockStrategy::new()),
                StrategyTag::FreeformScan => Box::new(FreeformScanStrategy::new()),
                StrategyTag::StructuredRecord => Box::new(StructuredRecordStrategy::new()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_strategies_order() {
        let mut config = ExtractionConfig::default();
        config.strategies = vec![StrategyTag::FreeformScan, StrategyTag::DelimitedRow];

        let tags: Vec<StrategyTag> = build_strategies(&config).iter().map(|s| s.tag()).collect();
        assert_eq!(tags, vec![StrategyTag::DelimitedRow, StrategyTag::FreeformScan]);
    }

    #[test]
    fn test_applies_to() {
        let text = RawDocument::text("a.txt", Vec::new());
        let json = RawDocument::structured("a.json", Vec::new());

        for strategy in build_strategies(&ExtractionConfig::default()) {
            let structured = strategy.tag() == StrategyTag::StructuredRecord;
            assert_eq!(strategy.applies_to(&text.body), !structured);
            assert_eq!(strategy.applies_to(&json.body), structured);
        }
    }
}
