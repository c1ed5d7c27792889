//! Candidate to card record normalization.

use super::rules::luhn::{digits_only, validate_luhn};
use crate::models::{CandidateMatch, CardRecord, UNKNOWN};

/// Trimmed value, or `None` when absent or blank.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn or_unknown(value: Option<&str>) -> String {
    present(value).unwrap_or(UNKNOWN).to_string()
}

/// Expiration from a full value, or from month and year parts when both are
/// present.
fn expiration(candidate: &CandidateMatch) -> Option<String> {
    if let Some(exp) = present(candidate.expiration.as_deref()) {
        return Some(exp.to_string());
    }
    match (
        present(candidate.expiration_month.as_deref()),
        present(candidate.expiration_year.as_deref()),
    ) {
        (Some(month), Some(year)) => Some(format!("{}/{}", month, year)),
        _ => None,
    }
}

/// Validate and normalize a candidate found in document `source`.
///
/// Returns `None` when the number fails the Luhn check; no record is ever
/// built from an unvalidated number.
pub fn normalize(candidate: &CandidateMatch, source: &str) -> Option<CardRecord> {
    let card_number = digits_only(&candidate.raw_number);
    if !validate_luhn(&card_number) {
        return None;
    }

    Some(CardRecord::new(
        card_number,
        or_unknown(candidate.name.as_deref()),
        or_unknown(expiration(candidate).as_deref()),
        or_unknown(candidate.cvc.as_deref()),
        candidate.origin_line.clone(),
        source.to_string(),
        candidate.strategy,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StrategyTag;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_full_candidate() {
        let candidate = CandidateMatch::new(" 4532-0151-1283-0366 ", "line", StrategyTag::DelimitedRow)
            .with_name("  John Doe ")
            .with_expiration("12/2025 ")
            .with_cvc(" 123");
        let record = normalize(&candidate, "dump.txt").unwrap();

        assert_eq!(record.card_number(), "4532015112830366");
        assert_eq!(record.name(), "John Doe");
        assert_eq!(record.expiration(), "12/2025");
        assert_eq!(record.cvc(), "123");
        assert_eq!(record.origin_line(), "line");
        assert_eq!(record.source(), "dump.txt");
        assert_eq!(record.strategy(), StrategyTag::DelimitedRow);
    }

    #[test]
    fn test_normalize_defaults() {
        let candidate = CandidateMatch::new("4532015112830366", "l", StrategyTag::FreeformScan)
            .with_name("   ")
            .with_cvc("");
        let record = normalize(&candidate, "a.txt").unwrap();

        assert_eq!(record.name(), UNKNOWN);
        assert_eq!(record.expiration(), UNKNOWN);
        assert_eq!(record.cvc(), UNKNOWN);
    }

    #[test]
    fn test_normalize_never_overwrites_recovered_values() {
        let candidate = CandidateMatch::new("4532015112830366", "l", StrategyTag::LabeledBlock)
            .with_name("Unknown Soldier")
            .with_cvc("000");
        let record = normalize(&candidate, "a.txt").unwrap();
        assert_eq!(record.name(), "Unknown Soldier");
        assert_eq!(record.cvc(), "000");
    }

    #[test]
    fn test_normalize_joins_expiration_parts() {
        let both = CandidateMatch::new("4532015112830366", "l", StrategyTag::KeyValueBlock)
            .with_expiration_parts(Some(" 04".to_string()), Some("2028 ".to_string()));
        assert_eq!(normalize(&both, "a").unwrap().expiration(), "04/2028");

        let month_only = CandidateMatch::new("4532015112830366", "l", StrategyTag::KeyValueBlock)
            .with_expiration_parts(Some("04".to_string()), Some(" ".to_string()));
        assert_eq!(normalize(&month_only, "a").unwrap().expiration(), UNKNOWN);
    }

    #[test]
    fn test_normalize_rejects_invalid_numbers() {
        let invalid = CandidateMatch::new("4532015112830367", "l", StrategyTag::FreeformScan);
        assert!(normalize(&invalid, "a").is_none());

        let too_long = CandidateMatch::new("45320151128303661234", "l", StrategyTag::FreeformScan);
        assert!(normalize(&too_long, "a").is_none());

        let empty = CandidateMatch::new("", "l", StrategyTag::LabeledBlock);
        assert!(normalize(&empty, "a").is_none());
    }
}
