//! Scan engine: runs every applicable strategy over each document and feeds
//! the candidates into the run's result set.

use std::time::Instant;

use tracing::{debug, info, warn};

use super::rules::{ExtractionStrategy, build_strategies};
use crate::document::{LoadOutcome, load_document};
use crate::error::{DocumentError, SourceError};
use crate::models::{CandidateMatch, ExtractionConfig, RawDocument};
use crate::result_set::{ResultSet, Submission};
use crate::source::DocumentSource;

/// Per-document counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentReport {
    pub identifier: String,
    pub candidates: usize,
    pub accepted: usize,
}

/// Result of handing one document's bytes to the engine.
#[derive(Debug)]
pub enum DocumentOutcome {
    Scanned(DocumentReport),
    /// Binary content; not scanned.
    Skipped,
}

/// A document that failed and was left out of the run.
#[derive(Debug)]
pub struct DocumentFailure {
    pub identifier: String,
    pub error: DocumentError,
}

/// Outcome of scanning a whole source.
#[derive(Debug, Default)]
pub struct ScanRun {
    pub documents: Vec<DocumentReport>,
    pub failures: Vec<DocumentFailure>,
    pub processing_time_ms: u64,
}

/// Card record scanner.
pub struct Scanner {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Scanner {
    /// Create a scanner with every strategy enabled.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create a scanner with the strategies enabled in `config`.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            strategies: build_strategies(config),
        }
    }

    /// Use an explicit strategy set, applied in the given order.
    pub fn with_strategies(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Candidates from every applicable strategy, strategy by strategy.
    pub fn extract_candidates(&self, document: &RawDocument) -> Vec<CandidateMatch> {
        let mut candidates = Vec::new();

        for strategy in &self.strategies {
            if !strategy.applies_to(&document.body) {
                continue;
            }
            let found = strategy.extract(document);
            debug!(
                "{}: {} candidates from {}",
                document.identifier,
                found.len(),
                strategy.tag()
            );
            candidates.extend(found);
        }

        candidates
    }

    /// Scan one loaded document into `results`.
    pub fn scan_document(&self, document: &RawDocument, results: &mut ResultSet) -> DocumentReport {
        let candidates = self.extract_candidates(document);
        let mut report = DocumentReport {
            identifier: document.identifier.clone(),
            candidates: candidates.len(),
            accepted: 0,
        };

        for candidate in &candidates {
            if results.submit(candidate, &document.identifier) == Submission::Accepted {
                report.accepted += 1;
            }
        }

        results.note_scanned();
        report
    }

    /// Decode and scan raw document bytes.
    pub fn scan_bytes(
        &self,
        identifier: &str,
        bytes: &[u8],
        results: &mut ResultSet,
    ) -> Result<DocumentOutcome, DocumentError> {
        match load_document(identifier, bytes)? {
            LoadOutcome::Loaded(document) => {
                Ok(DocumentOutcome::Scanned(self.scan_document(&document, results)))
            }
            LoadOutcome::Binary => {
                debug!("Skipping binary document {}", identifier);
                results.note_skipped();
                Ok(DocumentOutcome::Skipped)
            }
        }
    }

    /// Scan every document of `source`.
    ///
    /// A failing document is logged and recorded in [`ScanRun::failures`];
    /// the run always continues with the next one.
    pub fn scan_source(
        &self,
        source: &mut dyn DocumentSource,
        results: &mut ResultSet,
    ) -> Result<ScanRun, SourceError> {
        self.scan_source_with_progress(source, results, |_| {})
    }

    /// Like [`Scanner::scan_source`], calling `on_document` after each document.
    pub fn scan_source_with_progress<F>(
        &self,
        source: &mut dyn DocumentSource,
        results: &mut ResultSet,
        mut on_document: F,
    ) -> Result<ScanRun, SourceError>
    where
        F: FnMut(&str),
    {
        let start = Instant::now();
        let identifiers = source.identifiers()?;
        let mut run = ScanRun::default();

        info!(
            "Scanning {} documents from {}",
            identifiers.len(),
            source.location()
        );

        for identifier in &identifiers {
            let outcome = source
                .read(identifier)
                .and_then(|bytes| self.scan_bytes(identifier, &bytes, results));

            match outcome {
                Ok(DocumentOutcome::Scanned(report)) => run.documents.push(report),
                Ok(DocumentOutcome::Skipped) => {}
                Err(error) => {
                    warn!("Failed to process {}: {}", identifier, error);
                    results.note_failed();
                    run.failures.push(DocumentFailure {
                        identifier: identifier.clone(),
                        error,
                    });
                }
            }

            on_document(identifier);
        }

        run.processing_time_ms = start.elapsed().as_millis() as u64;
        info!(
            "Scanned {} documents: {} records accepted, {} failures",
            run.documents.len(),
            results.len(),
            run.failures.len()
        );

        Ok(run)
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}
