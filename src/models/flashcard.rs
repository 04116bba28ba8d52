//! Flashcard records.

use serde::{Deserialize, Serialize};

/// One content/translation pair with per-card language tags.
///
/// A record is well-formed only if both `content` and `translation` are
/// non-empty after trimming.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardRecord {
    /// Front side text.
    #[serde(default)]
    pub content: String,
    /// Back side text.
    #[serde(default)]
    pub translation: String,
    /// Language code of the front side.
    #[serde(default)]
    pub language: String,
    /// Language code of the back side.
    #[serde(default)]
    pub translation_lang: String,
    /// Whether the card is already learned.
    #[serde(default)]
    pub known: bool,
}

impl FlashcardRecord {
    /// Creates a record with content and translation and no language tags.
    #[must_use]
    pub fn new(content: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            translation: translation.into(),
            ..Self::default()
        }
    }

    /// Sets the language pair.
    #[must_use]
    pub fn with_languages(
        mut self,
        language: impl Into<String>,
        translation_lang: impl Into<String>,
    ) -> Self {
        self.language = language.into();
        self.translation_lang = translation_lang.into();
        self
    }

    /// Marks the card as known.
    #[must_use]
    pub const fn with_known(mut self, known: bool) -> Self {
        self.known = known;
        self
    }

    /// Returns whether both sides carry non-blank text.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.content.trim().is_empty() && !self.translation.trim().is_empty()
    }
}
