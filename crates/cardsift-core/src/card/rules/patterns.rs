//! Common regex patterns for card record extraction.
//!
//! Digit classes are spelled `[0-9]` because `\d` is Unicode-aware in the
//! regex crate and card numbers are ASCII only.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Labeled blocks ("Card Holder: ...", "Card Number: ...")
    pub static ref LABEL_FIELD: Regex = Regex::new(
        r"(?i)^\s*(?P<label>card holder|card number|expiration|cvc|type|number|exp|holder)\s*:\s*(?P<value>.*)$"
    ).unwrap();

    // Key/value blocks ("name: ...", "card: ...", "month: ...")
    pub static ref KEY_VALUE_FIELD: Regex = Regex::new(
        r"(?i)^\s*(?P<label>name|month|year|card|cvc2)\s*:\s*(?P<value>.*)$"
    ).unwrap();

    // Block separator: a line of '=' only
    pub static ref SEPARATOR: Regex = Regex::new(
        r"^\s*=+\s*$"
    ).unwrap();

    // Digit run with single space or hyphen separators between digits
    pub static ref DIGIT_RUN: Regex = Regex::new(
        r"[0-9](?:[ -]?[0-9])*"
    ).unwrap();

    // Expiration token (M/YY, MM/YYYY)
    pub static ref EXPIRATION: Regex = Regex::new(
        r"\b(?P<month>[0-9]{1,2})\s*/\s*(?P<year>[0-9]{2,4})\b"
    ).unwrap();

    // Standalone 3-4 digit token
    pub static ref STANDALONE_CVC: Regex = Regex::new(
        r"\b[0-9]{3,4}\b"
    ).unwrap();

    // Content heuristic: expiry-shaped token (MM/YY, MM-YYYY, YYYY/MM)
    pub static ref EXPIRY_HINT: Regex = Regex::new(
        r"\b(?:0[1-9]|1[0-2])\s*[/\-]\s*(?:[0-9]{4}|[0-9]{2})\b|\b20[0-9]{2}\s*[/\-]\s*(?:0[1-9]|1[0-2])\b"
    ).unwrap();

    // Content heuristic: labeled security code
    pub static ref SECURITY_CODE_HINT: Regex = Regex::new(
        r"(?i)\b(?:cvv|cvc|cvn|cid|security\s*code)\s*[:\-]?\s*[0-9]{3,4}\b"
    ).unwrap();

    // File and folder names that suggest card dumps
    pub static ref FILENAME_HINTS: Vec<Regex> = vec![
        Regex::new(r"(?i)\bcredit\s*card\b").unwrap(),
        Regex::new(r"(?i)\bcc\b").unwrap(),
        Regex::new(r"(?i)\bcard(?:ing|s|_data)?\b").unwrap(),
        Regex::new(r"(?i)\bfullz?\b").unwrap(),
        Regex::new(r"(?i)\bcvv\b").unwrap(),
    ];
}
