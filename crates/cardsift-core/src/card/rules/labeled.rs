//! Labeled blocks such as:
//!
//! ```text
//! Card Holder: Jane Roe
//! Card Number: 4532015112830366
//! Expiration: 01/2026
//! CVC: 999
//! ========
//! ```

use tracing::trace;

use super::patterns::{LABEL_FIELD, SEPARATOR};
use super::{ExtractionStrategy, is_text};
use crate::card::builder::{BlockBuilder, BlockField};
use crate::models::{CandidateMatch, DocumentBody, RawDocument, StrategyTag};

/// Map a (lowercased) label to its field slot. `type` is recognized but
/// carries nothing.
fn label_field(label: &str) -> Option<BlockField> {
    match label {
        "card holder" | "holder" => Some(BlockField::Name),
        "card number" | "number" => Some(BlockField::Number),
        "expiration" | "exp" => Some(BlockField::Expiration),
        "cvc" => Some(BlockField::Cvc),
        _ => None,
    }
}

/// Labeled block strategy.
pub struct LabeledBlockStrategy;

impl LabeledBlockStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Run the block state machine over `lines`.
    pub fn extract_lines<S: AsRef<str>>(&self, lines: &[S]) -> Vec<CandidateMatch> {
        let mut results = Vec::new();
        let mut block = BlockBuilder::new(StrategyTag::LabeledBlock);

        for line in lines {
            let line = line.as_ref();

            if SEPARATOR.is_match(line) {
                results.extend(block.finalize());
                continue;
            }

            let Some(caps) = LABEL_FIELD.captures(line) else {
                continue;
            };
            let label = caps["label"].to_lowercase();
            let Some(field) = label_field(&label) else {
                continue;
            };

            // A holder line after a buffered number starts the next card.
            if field == BlockField::Name && block.has_number() {
                trace!("Labeled block closed by new holder line");
                results.extend(block.finalize());
            }

            block.set(field, &caps["value"], line);
        }

        results.extend(block.finalize());
        results
    }
}

impl Default for LabeledBlockStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionStrategy for LabeledBlockStrategy {
    fn tag(&self) -> StrategyTag {
        StrategyTag::LabeledBlock
    }

    fn applies_to(&self, body: &DocumentBody) -> bool {
        is_text(body)
    }

    fn extract(&self, document: &RawDocument) -> Vec<CandidateMatch> {
        self.extract_lines(document.lines().unwrap_or_default())
    }
}
