//! Run-scoped accumulation and deduplication of card records.

use std::collections::HashSet;

use serde::Serialize;
use tracing::trace;

use crate::card::normalize::normalize;
use crate::card::rules::luhn::mask_card_number;
use crate::models::{CandidateMatch, CardRecord, DedupKey};

/// Outcome of offering a record to the result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    /// First observation; appended.
    Accepted,
    /// Same key already emitted this run; dropped.
    Duplicate,
}

/// Outcome of submitting an unvalidated candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Accepted,
    Duplicate,
    /// Failed the Luhn check.
    Rejected,
}

/// Counters for a scan run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// Documents that were loaded and run through the strategies.
    pub documents_scanned: usize,
    /// Documents skipped as binary.
    pub documents_skipped: usize,
    /// Documents that failed to load.
    pub documents_failed: usize,
    /// Candidates located by any strategy.
    pub candidates_observed: usize,
    /// Candidates whose number failed the checksum.
    pub rejected: usize,
    /// Valid records dropped as repeats.
    pub duplicates: usize,
    /// Records kept.
    pub accepted: usize,
}

impl ScanSummary {
    /// Whether the run produced no records.
    pub fn no_matches(&self) -> bool {
        self.accepted == 0
    }
}

/// Ordered records plus the keys already emitted.
///
/// Created at scan start, threaded through every document of the run, and
/// read once when the report is produced.
#[derive(Debug, Default)]
pub struct ResultSet {
    records: Vec<CardRecord>,
    seen: HashSet<DedupKey>,
    summary: ScanSummary,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `record` unless its key was already emitted. First seen wins.
    pub fn offer(&mut self, record: CardRecord) -> Offer {
        if !self.seen.insert(record.dedup_key()) {
            trace!(
                "Dropping repeat of {} from {}",
                mask_card_number(record.card_number()),
                record.source()
            );
            self.summary.duplicates += 1;
            return Offer::Duplicate;
        }

        self.records.push(record);
        self.summary.accepted += 1;
        Offer::Accepted
    }

    /// Validate, normalize and offer a candidate found in `source`.
    pub fn submit(&mut self, candidate: &CandidateMatch, source: &str) -> Submission {
        self.summary.candidates_observed += 1;

        match normalize(candidate, source) {
            Some(record) => match self.offer(record) {
                Offer::Accepted => Submission::Accepted,
                Offer::Duplicate => Submission::Duplicate,
            },
            None => {
                self.summary.rejected += 1;
                Submission::Rejected
            }
        }
    }

    pub(crate) fn note_scanned(&mut self) {
        self.summary.documents_scanned += 1;
    }

    pub(crate) fn note_skipped(&mut self) {
        self.summary.documents_skipped += 1;
    }

    pub(crate) fn note_failed(&mut self) {
        self.summary.documents_failed += 1;
    }

    /// Accepted records in discovery order.
    pub fn records(&self) -> &[CardRecord] {
        &self.records
    }

    pub fn summary(&self) -> ScanSummary {
        self.summary
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Render the text report. Does not modify the set.
    pub fn render_report(&self) -> String {
        crate::report::render_text(&self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StrategyTag;
    use pretty_assertions::assert_eq;

    fn candidate(line: &str, strategy: StrategyTag) -> CandidateMatch {
        CandidateMatch::new("4532015112830366", line, strategy)
    }

    #[test]
    fn test_first_seen_wins() {
        let mut set = ResultSet::new();

        let first = candidate("line", StrategyTag::DelimitedRow).with_name("A");
        let repeat = candidate("line", StrategyTag::FreeformScan).with_name("A");

        assert_eq!(set.submit(&first, "a.txt"), Submission::Accepted);
        assert_eq!(set.submit(&repeat, "a.txt"), Submission::Duplicate);
        assert_eq!(set.len(), 1);
        assert_eq!(set.records()[0].strategy(), StrategyTag::DelimitedRow);
    }

    #[test]
    fn test_same_line_different_sources_are_kept() {
        let mut set = ResultSet::new();
        let c = candidate("line", StrategyTag::FreeformScan);

        assert_eq!(set.submit(&c, "a.txt"), Submission::Accepted);
        assert_eq!(set.submit(&c, "b.txt"), Submission::Accepted);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_any_field_difference_keeps_both() {
        let mut set = ResultSet::new();
        set.submit(&candidate("line", StrategyTag::FreeformScan), "a.txt");
        set.submit(&candidate("line", StrategyTag::FreeformScan).with_cvc("123"), "a.txt");
        set.submit(&candidate("other line", StrategyTag::FreeformScan), "a.txt");
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_summary_counts() {
        let mut set = ResultSet::new();
        let valid = candidate("l", StrategyTag::FreeformScan);
        let invalid = CandidateMatch::new("4532015112830367", "l", StrategyTag::FreeformScan);

        set.submit(&valid, "a");
        set.submit(&valid, "a");
        set.submit(&invalid, "a");

        let summary = set.summary();
        assert_eq!(summary.candidates_observed, 3);
        assert_eq!(summary.accepted, 1);
        assert_eq!(summary.duplicates, 1);
        assert_eq!(summary.rejected, 1);
        assert!(!summary.no_matches());
    }

    #[test]
    fn test_render_does_not_mutate() {
        let mut set = ResultSet::new();
        set.submit(&candidate("l", StrategyTag::FreeformScan), "a");
        let before = set.summary();

        let first = set.render_report();
        let second = set.render_report();

        assert_eq!(first, second);
        assert_eq!(set.summary(), before);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_empty_set_is_no_matches() {
        let set = ResultSet::new();
        assert!(set.is_empty());
        assert!(set.summary().no_matches());
    }
}
