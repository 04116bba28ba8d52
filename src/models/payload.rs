//! Import payloads and backend import responses.

use super::{FlashcardRecord, ServerSet, SetDescriptor};
use serde::{Deserialize, Serialize};

/// The canonical set-plus-flashcards shape.
///
/// Both decoders produce it and the backend import endpoint accepts it. A
/// payload is built fresh per import attempt and consumed by the upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportPayload {
    /// Set metadata.
    pub set: SetDescriptor,
    /// Well-formed flashcards, possibly none.
    #[serde(default)]
    pub flashcards: Vec<FlashcardRecord>,
}

impl ImportPayload {
    /// Creates a payload for the given set with no flashcards.
    #[must_use]
    pub const fn new(set: SetDescriptor) -> Self {
        Self {
            set,
            flashcards: Vec::new(),
        }
    }

    /// Adds a flashcard.
    #[must_use]
    pub fn with_flashcard(mut self, card: FlashcardRecord) -> Self {
        self.flashcards.push(card);
        self
    }
}

/// Successful response of the backend import endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportResponse {
    /// The created set with its server-assigned id.
    pub set: ServerSet,
    /// The created flashcards, as returned by the backend.
    #[serde(default)]
    pub flashcards: Vec<serde_json::Value>,
}
