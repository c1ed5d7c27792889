//! Card record extraction module.

pub mod builder;
mod engine;
pub mod normalize;
pub mod rules;

pub use builder::{BlockBuilder, BlockField, BlockState};
pub use engine::{DocumentFailure, DocumentOutcome, DocumentReport, ScanRun, Scanner};
pub use normalize::normalize;
pub use rules::{ExtractionStrategy, build_strategies, validate_luhn};
