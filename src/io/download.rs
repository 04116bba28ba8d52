//! Writing export downloads to disk.
//!
//! A download is staged in a hidden temporary file next to its destination
//! and renamed into place once fully written. The staging file is removed on
//! every path out, including failures and panics.

use crate::io::Format;
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// File stem used when the set name is not known locally.
pub const FALLBACK_FILE_STEM: &str = "flashcard-set";

/// Returns the download file name `<set name>.<format>`.
///
/// Falls back to [`FALLBACK_FILE_STEM`] when the name is unknown or blank.
/// Path separators and control characters in the name are replaced so the
/// result always names a file directly inside the output directory.
#[must_use]
pub fn download_file_name(set_name: Option<&str>, format: Format) -> String {
    let stem = set_name
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .map_or_else(
            || FALLBACK_FILE_STEM.to_string(),
            |name| {
                name.chars()
                    .map(|c| if matches!(c, '/' | '\\') || c.is_control() { '_' } else { c })
                    .collect()
            },
        );
    format!("{stem}.{}", format.extension())
}

/// Scoped staging file for one download.
///
/// Created by [`DownloadGuard::stage`]; [`DownloadGuard::persist`] moves the
/// content to its destination. Dropping the guard removes whatever is left of
/// the staging file.
#[derive(Debug)]
pub struct DownloadGuard {
    staging: PathBuf,
    destination: PathBuf,
}

impl DownloadGuard {
    /// Writes `content` to a staging file for `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExportFailed`] if the output directory cannot be
    /// created or the staging file cannot be written.
    pub async fn stage(destination: PathBuf, content: &[u8]) -> Result<Self> {
        let dir = destination
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| write_error(&dir, &e))?;

        let file_name = destination
            .file_name()
            .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
        let guard = Self {
            staging: dir.join(format!(".{file_name}.part")),
            destination,
        };

        tokio::fs::write(&guard.staging, content)
            .await
            .map_err(|e| write_error(&guard.staging, &e))?;
        Ok(guard)
    }

    /// Returns the staging file location.
    #[must_use]
    pub fn staging_path(&self) -> &Path {
        &self.staging
    }

    /// Moves the staged content to its destination and returns that path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExportFailed`] if the rename fails.
    pub async fn persist(self) -> Result<PathBuf> {
        tokio::fs::rename(&self.staging, &self.destination)
            .await
            .map_err(|e| write_error(&self.destination, &e))?;
        Ok(self.destination.clone())
    }
}

impl Drop for DownloadGuard {
    fn drop(&mut self) {
        // after a successful persist the staging file no longer exists
        match std::fs::remove_file(&self.staging) {
            Ok(()) => {
                tracing::debug!(path = %self.staging.display(), "Removed staged download");
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {},
            Err(e) => {
                tracing::warn!(
                    path = %self.staging.display(),
                    error = %e,
                    "Failed to remove staged download"
                );
            },
        }
    }
}

fn write_error(path: &Path, e: &std::io::Error) -> Error {
    Error::ExportFailed(format!("cannot write {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use test_case::test_case;

    #[test_case(Some("Verbs"), Format::Json, "Verbs.json" ; "named json")]
    #[test_case(Some("Verbs"), Format::Csv, "Verbs.csv" ; "named csv")]
    #[test_case(None, Format::Csv, "flashcard-set.csv" ; "unknown name")]
    #[test_case(Some("   "), Format::Json, "flashcard-set.json" ; "blank name")]
    #[test_case(Some(".."), Format::Json, "flashcard-set.json" ; "parent dir name")]
    #[test_case(Some("a/b\\c"), Format::Json, "a_b_c.json" ; "separators replaced")]
    fn test_download_file_name(name: Option<&str>, format: Format, expected: &str) {
        assert_eq!(download_file_name(name, format), expected);
    }

    #[tokio::test]
    async fn test_stage_and_persist() {
        let dir = TempDir::new().unwrap();
        let destination = dir.path().join("out").join("Verbs.csv");

        let guard = DownloadGuard::stage(destination.clone(), b"a,b\n")
            .await
            .unwrap();
        let staging = guard.staging_path().to_path_buf();
        assert!(staging.exists());

        let path = guard.persist().await.unwrap();
        assert_eq!(path, destination);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a,b\n");
        assert!(!staging.exists());
    }

    #[tokio::test]
    async fn test_drop_removes_staging_file() {
        let dir = TempDir::new().unwrap();
        let destination = dir.path().join("Verbs.json");

        let guard = DownloadGuard::stage(destination.clone(), b"{}").await.unwrap();
        let staging = guard.staging_path().to_path_buf();
        drop(guard);

        assert!(!staging.exists());
        assert!(!destination.exists());
    }
}
