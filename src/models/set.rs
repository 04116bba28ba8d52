//! Set descriptors and server-assigned sets.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Source language applied by the CSV decoder when the column is empty.
pub const DEFAULT_LANGUAGE: &str = "EN";

/// Target language applied by the CSV decoder when the column is empty.
pub const DEFAULT_TRANSLATION_LANGUAGE: &str = "PL";

/// Identifier assigned to a set by the backend.
///
/// The backend may send ids as JSON numbers or strings; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SetId(String);

impl SetId {
    /// Creates a new set ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl<'de> Deserialize<'de> for SetId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s),
            RawId::Signed(n) => Self(n.to_string()),
            RawId::Unsigned(n) => Self(n.to_string()),
        })
    }
}

/// Metadata of a flashcard set as carried by the interchange formats.
///
/// Only `name` is required; the decoders enforce that it is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDescriptor {
    /// Display name of the set.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Language code of the card fronts.
    #[serde(default)]
    pub default_language: String,
    /// Language code of the card backs.
    #[serde(default)]
    pub translation_language: String,
}

impl SetDescriptor {
    /// Creates a descriptor with just a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the language pair.
    #[must_use]
    pub fn with_languages(
        mut self,
        default_language: impl Into<String>,
        translation_language: impl Into<String>,
    ) -> Self {
        self.default_language = default_language.into();
        self.translation_language = translation_language.into();
        self
    }
}

/// A set as stored by the backend, carrying its server-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSet {
    /// Server-assigned identifier.
    pub id: SetId,
    /// Set metadata.
    #[serde(flatten)]
    pub descriptor: SetDescriptor,
}

impl ServerSet {
    /// Returns the set name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_id_accepts_numbers_and_strings() {
        let numeric: SetId = serde_json::from_str("42").unwrap();
        assert_eq!(numeric.as_str(), "42");

        let text: SetId = serde_json::from_str("\"abc-1\"").unwrap();
        assert_eq!(text, SetId::from("abc-1"));
    }

    #[test]
    fn test_descriptor_uses_camel_case() {
        let set = SetDescriptor::new("Animals").with_languages("EN", "DE");
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["defaultLanguage"], "EN");
        assert_eq!(json["translationLanguage"], "DE");
    }

    #[test]
    fn test_server_set_flattens_descriptor() {
        let json = r#"{"id": 7, "name": "Verbs", "description": "", "defaultLanguage": "EN",
            "translationLanguage": "PL", "createdAt": "2024-01-01"}"#;
        let set: ServerSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.id.as_str(), "7");
        assert_eq!(set.name(), "Verbs");
        assert_eq!(set.descriptor.translation_language, "PL");
    }
}
