//! Luhn checksum validation for card numbers.

use crate::models::{MAX_CARD_DIGITS, MIN_CARD_DIGITS};

/// Keep only the ASCII digits of `text`.
pub fn digits_only(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Whether `digits` has a plausible card number length.
pub fn has_card_length(digits: &str) -> bool {
    (MIN_CARD_DIGITS..=MAX_CARD_DIGITS).contains(&digits.len())
}

/// Validate a card number with the Luhn algorithm.
///
/// Non-digit characters are ignored. Numbers outside 13 to 19 digits are
/// rejected before the checksum is computed. Every second digit counting from
/// the right is doubled, and 9 subtracted when the result exceeds 9; the
/// number is valid when the total is a multiple of 10.
pub fn validate_luhn(number: &str) -> bool {
    let digits: Vec<u32> = number.chars().filter_map(|c| c.to_digit(10)).collect();

    if !(MIN_CARD_DIGITS..=MAX_CARD_DIGITS).contains(&digits.len()) {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(offset, &d)| {
            if offset % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

/// Mask a card number for logging, keeping the first 6 and last 4 digits.
pub fn mask_card_number(number: &str) -> String {
    let digits = digits_only(number);
    if digits.len() <= 10 {
        return "*".repeat(digits.len());
    }
    format!(
        "{}{}{}",
        &digits[..6],
        "*".repeat(digits.len() - 10),
        &digits[digits.len() - 4..]
    )
}
