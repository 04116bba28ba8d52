//! User-selected input files.

use crate::{Error, Result};
use std::path::PathBuf;

const UTF8_BOM: char = '\u{feff}';

/// A file chosen for import.
///
/// Carries what the type gate needs (name and declared MIME type) without
/// touching the file system; the content is only read by [`Self::read_text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Location of the file.
    pub path: PathBuf,
    /// File name used for format detection.
    pub name: String,
    /// MIME type declared by whoever selected the file, if any.
    pub mime_type: Option<String>,
}

impl SelectedFile {
    /// Creates a selection from a path, using its final component as the name.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Self {
            path,
            name,
            mime_type: None,
        }
    }

    /// Sets the declared MIME type.
    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Reads the whole file as UTF-8 text.
    ///
    /// A leading byte-order mark is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FailedToRead`] if the file cannot be read or is not
    /// valid UTF-8.
    pub async fn read_text(&self) -> Result<String> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| Error::FailedToRead {
                name: self.name.clone(),
                cause: e.to_string(),
            })?;

        Ok(match text.strip_prefix(UTF8_BOM) {
            Some(rest) => rest.to_string(),
            None => text,
        })
    }
}
