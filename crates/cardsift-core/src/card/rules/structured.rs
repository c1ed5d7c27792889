//! Records read directly from array-of-object documents.

use std::io;

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use serde_json::{Map, Value};
use tracing::trace;

use super::ExtractionStrategy;
use super::luhn::digits_only;
use crate::models::{CandidateMatch, DocumentBody, RawDocument, StrategyTag};

/// Object keys read by the structured strategy.
pub const NUMBER_KEY: &str = "Number";
pub const NAME_KEY: &str = "Name";
pub const EXP_MONTH_KEY: &str = "ExpMonth";
pub const EXP_YEAR_KEY: &str = "ExpYear";
pub const CVC_KEY: &str = "CVC";

/// Structured record strategy.
pub struct StructuredRecordStrategy;

impl StructuredRecordStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Read one object. Objects without a usable number yield nothing.
    pub fn extract_object(&self, object: &Map<String, Value>) -> Option<CandidateMatch> {
        let number = field_text(object, NUMBER_KEY)?;
        if digits_only(&number).is_empty() {
            trace!("Skipping object without digits in {}", NUMBER_KEY);
            return None;
        }

        let origin_line = origin_line(object);
        let mut candidate = CandidateMatch::new(number, origin_line, StrategyTag::StructuredRecord)
            .with_expiration_parts(
                field_text(object, EXP_MONTH_KEY),
                field_text(object, EXP_YEAR_KEY),
            );
        candidate.name = field_text(object, NAME_KEY);
        candidate.cvc = field_text(object, CVC_KEY);

        Some(candidate)
    }
}

/// Single-line JSON with `", "` and `": "` separators.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Render an object as its report origin line, keys in document order.
pub fn origin_line(object: &Map<String, Value>) -> String {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, SpacedFormatter);
    if object.serialize(&mut serializer).is_err() {
        return serde_json::to_string(object).unwrap_or_default();
    }
    String::from_utf8(buf).unwrap_or_default()
}

/// String or numeric field as text; other JSON types count as absent.
fn field_text(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl Default for StructuredRecordStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionStrategy for StructuredRecordStrategy {
    fn tag(&self) -> StrategyTag {
        StrategyTag::StructuredRecord
    }

    fn applies_to(&self, body: &DocumentBody) -> bool {
        matches!(body, DocumentBody::Structured(_))
    }

    fn extract(&self, document: &RawDocument) -> Vec<CandidateMatch> {
        match &document.body {
            DocumentBody::Structured(objects) => objects
                .iter()
                .filter_map(|object| self.extract_object(object))
                .collect(),
            DocumentBody::Text(_) => Vec::new(),
        }
    }
}
