//! Report rendering for accepted card records.
//!
//! Text layout:
//!
//! ```text
//! ========================================
//! [VALID] Matched
//! CardNumber: 4532015112830366
//! NameOnCard: John Doe
//! ExpirationDate: 12/2025
//! CVC: 123
//! OriginalLine: John Doe | 4532015112830366 | 12/2025 | 123
//! Source: dump.txt
//!
//! ========================================
//! [VALID] Matched
//! ...
//! ========================================
//! ```

use serde::Serialize;

use crate::models::CardRecord;
use crate::result_set::ScanSummary;

/// Banner line opening, separating and closing the report.
pub const BANNER: &str = "========================================";

/// Format one record as its report block (no trailing newline).
pub fn format_record(record: &CardRecord) -> String {
    format!(
        "[VALID] Matched\n\
         CardNumber: {}\n\
         NameOnCard: {}\n\
         ExpirationDate: {}\n\
         CVC: {}\n\
         OriginalLine: {}\n\
         Source: {}",
        record.card_number(),
        record.name(),
        record.expiration(),
        record.cvc(),
        record.origin_line(),
        record.source(),
    )
}

/// Render the text report. An empty slice renders as an empty string.
pub fn render_text(records: &[CardRecord]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let blocks: Vec<String> = records.iter().map(format_record).collect();
    let separator = format!("\n\n{}\n", BANNER);

    let mut output = String::new();
    output.push_str(BANNER);
    output.push('\n');
    output.push_str(&blocks.join(&separator));
    output.push('\n');
    output.push_str(BANNER);
    output.push('\n');
    output
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: ScanSummary,
    records: &'a [CardRecord],
}

/// Render records and summary as pretty JSON.
pub fn render_json(records: &[CardRecord], summary: ScanSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport { summary, records })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::normalize::normalize;
    use crate::models::{CandidateMatch, StrategyTag};
    use pretty_assertions::assert_eq;

    fn record(number: &str, source: &str) -> CardRecord {
        let candidate = CandidateMatch::new(number, "raw line", StrategyTag::DelimitedRow)
            .with_name("John Doe")
            .with_expiration("12/2025");
        normalize(&candidate, source).unwrap()
    }

    #[test]
    fn test_format_record() {
        let block = format_record(&record("4532015112830366", "dump.txt"));
        assert_eq!(
            block,
            "[VALID] Matched\n\
             CardNumber: 4532015112830366\n\
             NameOnCard: John Doe\n\
             ExpirationDate: 12/2025\n\
             CVC: Unknown\n\
             OriginalLine: raw line\n\
             Source: dump.txt"
        );
    }

    #[test]
    fn test_render_text_layout() {
        let records = vec![
            record("4532015112830366", "a.txt"),
            record("4111111111111111", "b.txt"),
        ];
        let text = render_text(&records);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], BANNER);
        assert_eq!(lines[1], "[VALID] Matched");
        assert_eq!(lines[7], "Source: a.txt");
        assert_eq!(lines[8], "");
        assert_eq!(lines[9], BANNER);
        assert_eq!(lines[10], "[VALID] Matched");
        assert_eq!(lines[16], "Source: b.txt");
        assert_eq!(lines[17], BANNER);
        assert_eq!(lines.len(), 18);
        assert!(text.ends_with(&format!("{}\n", BANNER)));
    }

    #[test]
    fn test_render_text_empty() {
        assert_eq!(render_text(&[]), "");
    }

    #[test]
    fn test_render_json() {
        let records = vec![record("4532015112830366", "a.txt")];
        let summary = ScanSummary {
            accepted: 1,
            ..Default::default()
        };
        let json: serde_json::Value =
            serde_json::from_str(&render_json(&records, summary).unwrap()).unwrap();

        assert_eq!(json["summary"]["accepted"], 1);
        assert_eq!(json["records"][0]["card_number"], "4532015112830366");
        assert_eq!(json["records"][0]["strategy"], "delimited_row");
    }
}
