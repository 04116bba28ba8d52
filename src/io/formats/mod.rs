//! Format adapters for import/export.
//!
//! Each format provides a decoder producing an [`ImportPayload`] and an
//! encoder writing the same shape back out.

pub mod csv;
pub mod json;
pub mod tokenizer;

use crate::models::ImportPayload;
use crate::{Error, Result};
use std::path::Path;
use std::str::FromStr;

/// Supported file formats for import/export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// JSON document with a `set` object and a `flashcards` array.
    Json,
    /// CSV with a header row and one flashcard per data row.
    Csv,
}

impl Format {
    /// Returns all supported formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Json, Self::Csv]
    }

    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    /// Returns the MIME type for this format.
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv",
        }
    }

    /// Detects format from a file name's extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] if the extension is not recognized.
    pub fn from_file_name(name: &str) -> Result<Self> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            Some(ext) => Err(Error::UnsupportedFormat(format!(
                "unsupported file extension: .{ext}"
            ))),
            None => Err(Error::UnsupportedFormat(format!(
                "cannot determine format: '{name}' has no extension"
            ))),
        }
    }

    /// Returns whether a file passes the import type gate.
    ///
    /// A file is accepted when its declared MIME type is JSON or CSV, or when
    /// its name ends in `.json` or `.csv`. Nothing is read to decide.
    #[must_use]
    pub fn accepts(name: &str, mime_type: Option<&str>) -> bool {
        let mime_ok = mime_type.is_some_and(|mime| {
            let essence = mime.split(';').next().unwrap_or_default().trim();
            Self::all()
                .iter()
                .any(|f| essence.eq_ignore_ascii_case(f.mime_type()))
        });
        let lower = name.to_lowercase();
        let name_ok = Self::all()
            .iter()
            .any(|f| lower.ends_with(&format!(".{}", f.extension())));
        mime_ok || name_ok
    }

    /// Decodes document text in this format.
    ///
    /// # Errors
    ///
    /// Returns the decoder's error kind (see [`csv::decode`] and [`json::decode`]).
    pub fn decode(&self, text: &str) -> Result<ImportPayload> {
        match self {
            Self::Json => json::decode(text),
            Self::Csv => csv::decode(text),
        }
    }

    /// Encodes a payload in this format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn encode(&self, payload: &ImportPayload) -> Result<String> {
        match self {
            Self::Json => json::encode(payload),
            Self::Csv => csv::encode(payload),
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(Error::InvalidInput(format!("Unknown format: {s}"))),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}
