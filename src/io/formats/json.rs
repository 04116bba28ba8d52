//! JSON format adapter for import/export.
//!
//! The document is a single object:
//!
//! ```json
//! { "set": { "name": "...", "description": "...", "defaultLanguage": "...",
//!            "translationLanguage": "..." },
//!   "flashcards": [ { "content": "...", "translation": "...", "language": "...",
//!                     "translationLang": "...", "known": false } ] }
//! ```
//!
//! Unlike CSV, no language defaults are applied: JSON files are expected to be
//! fully specified already.

use crate::models::{FlashcardRecord, ImportPayload, SetDescriptor};
use crate::{Error, Result};
use serde_json::Value;

/// Decodes a JSON document into an import payload.
///
/// # Errors
///
/// - [`Error::InvalidJson`] on a syntax error, or if `flashcards` is present
///   but not an array of card objects
/// - [`Error::MissingSetInfo`] if `set` is absent, not an object, or has no
///   non-empty `name`
pub fn decode(text: &str) -> Result<ImportPayload> {
    let document: Value =
        serde_json::from_str(text).map_err(|e| Error::InvalidJson(e.to_string()))?;

    let set = decode_set(document.get("set"))?;

    let flashcards = match document.get("flashcards") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => decode_flashcards(items)?,
        Some(_) => {
            return Err(Error::InvalidJson(
                "'flashcards' must be an array".to_string(),
            ));
        },
    };

    Ok(ImportPayload { set, flashcards })
}

fn decode_set(value: Option<&Value>) -> Result<SetDescriptor> {
    let Some(object) = value.filter(|v| v.is_object()) else {
        return Err(Error::MissingSetInfo);
    };
    let has_name = object
        .get("name")
        .and_then(Value::as_str)
        .is_some_and(|name| !name.is_empty());
    if !has_name {
        return Err(Error::MissingSetInfo);
    }

    serde_json::from_value(object.clone())
        .map_err(|e| Error::InvalidJson(format!("invalid 'set': {e}")))
}

fn decode_flashcards(items: &[Value]) -> Result<Vec<FlashcardRecord>> {
    let mut cards = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let card: FlashcardRecord = serde_json::from_value(item.clone())
            .map_err(|e| Error::InvalidJson(format!("flashcard {}: {e}", i + 1)))?;
        if card.is_well_formed() {
            cards.push(card);
        }
    }
    Ok(cards)
}

/// Encodes a payload as pretty-printed JSON in the import shape.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode(payload: &ImportPayload) -> Result<String> {
    serde_json::to_string_pretty(payload).map_err(|e| Error::OperationFailed {
        operation: "encode_json".to_string(),
        cause: e.to_string(),
    })
}

/// Re-serializes a JSON document with two-space indentation.
///
/// # Errors
///
/// Returns [`Error::InvalidJson`] if the input is not valid JSON.
pub fn pretty_print(text: &str) -> Result<String> {
    let value: Value = serde_json::from_str(text).map_err(|e| Error::InvalidJson(e.to_string()))?;
    serde_json::to_string_pretty(&value).map_err(|e| Error::OperationFailed {
        operation: "encode_json".to_string(),
        cause: e.to_string(),
    })
}
