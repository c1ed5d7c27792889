//! Fallback scan for bare card numbers anywhere in a line.
//!
//! Lowest precision of the strategies: the cvc is simply the first standalone
//! 3-4 digit token outside the card number, which can be an unrelated value
//! such as the year of the expiration date.

use super::luhn::{digits_only, has_card_length};
use super::patterns::{DIGIT_RUN, EXPIRATION, STANDALONE_CVC};
use super::{ExtractionStrategy, is_text};
use crate::models::{CandidateMatch, DocumentBody, RawDocument, StrategyTag};

/// Freeform digit-run strategy.
pub struct FreeformScanStrategy;

impl FreeformScanStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Extract every 13-19 digit run of a line.
    pub fn extract_line(&self, line: &str) -> Vec<CandidateMatch> {
        let mut results = Vec::new();

        for run in DIGIT_RUN.find_iter(line) {
            if !has_card_length(&digits_only(run.as_str())) {
                continue;
            }

            let mut candidate =
                CandidateMatch::new(run.as_str(), line, StrategyTag::FreeformScan);

            if let Some(expiration) = extract_expiration(line) {
                candidate.expiration = Some(expiration);
            }

            candidate.cvc = STANDALONE_CVC
                .find_iter(line)
                .find(|m| m.end() <= run.start() || m.start() >= run.end())
                .map(|m| m.as_str().to_string());

            results.push(candidate);
        }

        results
    }
}

/// First `month/year` token of `text`, with inner whitespace removed.
pub fn extract_expiration(text: &str) -> Option<String> {
    EXPIRATION
        .captures(text)
        .map(|caps| format!("{}/{}", &caps["month"], &caps["year"]))
}

impl Default for FreeformScanStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionStrategy for FreeformScanStrategy {
    fn tag(&self) -> StrategyTag {
        StrategyTag::FreeformScan
    }

    fn applies_to(&self, body: &DocumentBody) -> bool {
        is_text(body)
    }

    fn extract(&self, document: &RawDocument) -> Vec<CandidateMatch> {
        document
            .lines()
            .unwrap_or_default()
            .iter()
            .flat_map(|line| self.extract_line(line))
            .collect()
    }
}
