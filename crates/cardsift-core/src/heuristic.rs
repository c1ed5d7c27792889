//! Cheap checks used to decide whether a file is worth collecting.

use std::path::Path;

use crate::card::rules::luhn::{digits_only, has_card_length, validate_luhn};
use crate::card::rules::patterns::{DIGIT_RUN, EXPIRY_HINT, FILENAME_HINTS, SECURITY_CODE_HINT};
use crate::document::decode_text;

/// Why a name matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMatch {
    /// Contains the configured keyword.
    Keyword,
    /// Matches one of the built-in card dump name patterns.
    Pattern,
}

/// Check a file or folder name against `keyword` and the built-in patterns.
pub fn name_matches(name: &str, keyword: &str) -> Option<NameMatch> {
    if !keyword.is_empty() && name.to_lowercase().contains(&keyword.to_lowercase()) {
        return Some(NameMatch::Keyword);
    }
    if FILENAME_HINTS.iter().any(|re| re.is_match(name)) {
        return Some(NameMatch::Pattern);
    }
    None
}

/// Whether decoded text looks like it holds card data.
///
/// True on any Luhn-valid 13-19 digit run, any expiry-shaped token, or any
/// labeled security code. Text containing NUL is never a match.
pub fn text_has_sensitive_data(text: &str) -> bool {
    if text.contains('\0') {
        return false;
    }

    let has_card = DIGIT_RUN.find_iter(text).any(|run| {
        let digits = digits_only(run.as_str());
        has_card_length(&digits) && validate_luhn(&digits)
    });

    has_card || EXPIRY_HINT.is_match(text) || SECURITY_CODE_HINT.is_match(text)
}

/// Content check for a file on disk. Unreadable files and files larger than
/// `max_size` bytes are not matches.
pub fn content_has_sensitive_data(path: &Path, max_size: u64) -> bool {
    let Ok(metadata) = std::fs::metadata(path) else {
        return false;
    };
    if metadata.len() > max_size {
        return false;
    }
    match std::fs::read(path) {
        Ok(bytes) => text_has_sensitive_data(&decode_text(&bytes)),
        Err(_) => false,
    }
}
