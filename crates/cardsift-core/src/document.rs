//! Decoding raw document bytes into text or structured documents.

use serde_json::Value;
use tracing::trace;

use crate::error::DocumentError;
use crate::models::RawDocument;

/// Result type for document loading.
pub type Result<T> = std::result::Result<T, DocumentError>;

/// What loading a document produced.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// Document decoded and ready for the strategies.
    Loaded(RawDocument),
    /// Content contains NUL and is treated as binary.
    Binary,
}

/// Decode bytes as UTF-8, dropping invalid sequences instead of failing.
pub fn decode_text(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

/// Split into lines with trailing whitespace removed, dropping blank lines.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Whether the identifier names a structured (JSON) document.
pub fn is_structured(identifier: &str) -> bool {
    identifier
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("json"))
}

/// Load a document from its identifier and raw bytes.
pub fn load_document(identifier: &str, bytes: &[u8]) -> Result<LoadOutcome> {
    let text = decode_text(bytes);

    if text.contains('\0') {
        trace!("{} contains NUL, treating as binary", identifier);
        return Ok(LoadOutcome::Binary);
    }

    let document = if is_structured(identifier) {
        parse_structured(identifier, &text)?
    } else {
        RawDocument::text(identifier, split_lines(&text))
    };

    Ok(LoadOutcome::Loaded(document))
}

/// Parse an array of objects. Array items that are not objects are skipped.
fn parse_structured(identifier: &str, text: &str) -> Result<RawDocument> {
    let malformed = |reason: String| DocumentError::MalformedStructuredContent {
        identifier: identifier.to_string(),
        reason,
    };

    let value: Value = serde_json::from_str(text).map_err(|e| malformed(e.to_string()))?;

    let Value::Array(items) = value else {
        return Err(malformed("expected an array of objects".to_string()));
    };

    let total = items.len();
    let objects: Vec<_> = items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect();

    if objects.len() < total {
        trace!(
            "{}: skipped {} non-object items",
            identifier,
            total - objects.len()
        );
    }

    Ok(RawDocument::structured(identifier, objects))
}
