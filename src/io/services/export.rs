//! Set export service.
//!
//! Fetches a rendered export from the backend and writes it as a download.

use crate::Result;
use crate::api::SetsApi;
use crate::io::Format;
use crate::io::download::{DownloadGuard, download_file_name};
use crate::io::formats::json;
use crate::models::SetId;
use crate::state::{InFlight, SetStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Result of a successful export.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Where the download was written.
    pub path: PathBuf,
    /// Format of the download.
    pub format: Format,
    /// Number of bytes written.
    pub bytes: usize,
}

/// Service exporting sets from the backend to local files.
///
/// Every call issues exactly one backend request; nothing is cached. JSON
/// exports are re-serialized with two-space indentation, CSV exports are
/// written exactly as received.
pub struct ExportService<A: SetsApi> {
    /// Backend rendering the export.
    api: Arc<A>,
    /// Local sets, used to name the download.
    store: SetStore,
    in_flight: InFlight,
}

impl<A: SetsApi> ExportService<A> {
    /// Creates a new export service.
    #[must_use]
    pub fn new(api: Arc<A>, store: SetStore) -> Self {
        Self {
            api,
            store,
            in_flight: InFlight::new("export"),
        }
    }

    /// Returns whether an export is currently outstanding.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_active()
    }

    /// Exports a set into `output_dir` as `<set name>.<format>`.
    ///
    /// The file is named `flashcard-set.<format>` when the set is not known
    /// to the local store.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::Busy`] if another export is in flight
    /// - [`crate::Error::ExportFailed`] if the backend request fails or the
    ///   file cannot be written
    /// - [`crate::Error::InvalidJson`] if a JSON export body is not valid JSON
    pub async fn export_set(
        &self,
        id: &SetId,
        format: Format,
        output_dir: &Path,
    ) -> Result<ExportSummary> {
        let _guard = self.in_flight.try_acquire()?;
        let start = Instant::now();

        let result = self.run_export(id, format, output_dir).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        metrics::counter!(
            "flashsets_export_total",
            "format" => format.extension(),
            "outcome" => outcome
        )
        .increment(1);
        metrics::histogram!("flashsets_export_duration_ms")
            .record(start.elapsed().as_secs_f64() * 1000.0);

        result
    }

    async fn run_export(
        &self,
        id: &SetId,
        format: Format,
        output_dir: &Path,
    ) -> Result<ExportSummary> {
        tracing::debug!(api = self.api.name(), set_id = %id, format = %format, "Requesting export");
        let body = self.api.export_set(id, format).await.inspect_err(|e| {
            tracing::warn!(set_id = %id, error = %e, "Export request failed");
        })?;

        let content = match format {
            Format::Json => json::pretty_print(&body)?,
            Format::Csv => body,
        };

        let set_name = self.store.find_name(id).await;
        let destination = output_dir.join(download_file_name(set_name.as_deref(), format));

        let guard = DownloadGuard::stage(destination, content.as_bytes()).await?;
        let path = guard.persist().await?;

        tracing::info!(
            set_id = %id,
            path = %path.display(),
            bytes = content.len(),
            "Exported flashcard set"
        );

        Ok(ExportSummary {
            path,
            format,
            bytes: content.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::io::services::testing::FakeApi;
    use crate::models::{ServerSet, SetDescriptor};
    use tempfile::TempDir;

    async fn named_store(id: &str, name: &str) -> SetStore {
        let store = SetStore::new();
        store
            .append(ServerSet {
                id: SetId::from(id),
                descriptor: SetDescriptor::new(name),
            })
            .await;
        store
    }

    #[tokio::test]
    async fn test_csv_export_is_byte_exact() {
        let dir = TempDir::new().unwrap();
        let body = "Set Name,Content\r\nVerbs,  go  \r\n";
        let api = Arc::new(FakeApi::exporting(body));
        let service = ExportService::new(Arc::clone(&api), named_store("7", "Verbs").await);

        let summary = service
            .export_set(&SetId::from("7"), Format::Csv, dir.path())
            .await
            .unwrap();

        assert_eq!(summary.path, dir.path().join("Verbs.csv"));
        assert_eq!(summary.bytes, body.len());
        assert_eq!(std::fs::read_to_string(&summary.path).unwrap(), body);
        assert_eq!(
            api.export_requests.lock().unwrap().as_slice(),
            &[(SetId::from("7"), Format::Csv)]
        );
    }

    #[tokio::test]
    async fn test_json_export_is_pretty_printed() {
        let dir = TempDir::new().unwrap();
        let api = Arc::new(FakeApi::exporting(r#"{"set":{"name":"Verbs"},"flashcards":[]}"#));
        let service = ExportService::new(api, named_store("7", "Verbs").await);

        let summary = service
            .export_set(&SetId::from("7"), Format::Json, dir.path())
            .await
            .unwrap();

        let written = std::fs::read_to_string(summary.path).unwrap();
        assert!(written.starts_with("{\n  \"set\": {\n    \"name\": \"Verbs\""));
    }

    #[tokio::test]
    async fn test_unknown_set_uses_fallback_name() {
        let dir = TempDir::new().unwrap();
        let service = ExportService::new(Arc::new(FakeApi::exporting("a,b")), SetStore::new());

        let summary = service
            .export_set(&SetId::from("99"), Format::Csv, dir.path())
            .await
            .unwrap();
        assert_eq!(summary.path, dir.path().join("flashcard-set.csv"));
    }

    #[tokio::test]
    async fn test_failed_export_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let service = ExportService::new(Arc::new(FakeApi::default()), SetStore::new());

        let err = service
            .export_set(&SetId::from("1"), Format::Json, dir.path())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ExportFailed(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
        assert!(!service.is_busy());
    }

    #[tokio::test]
    async fn test_invalid_json_body_leaves_no_files() {
        let dir = TempDir::new().unwrap();
        let service = ExportService::new(Arc::new(FakeApi::exporting("<html>")), SetStore::new());

        assert!(matches!(
            service
                .export_set(&SetId::from("1"), Format::Json, dir.path())
                .await,
            Err(Error::InvalidJson(_))
        ));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_repeated_exports_refetch() {
        let dir = TempDir::new().unwrap();
        let api = Arc::new(FakeApi::exporting("a,b"));
        let service = ExportService::new(Arc::clone(&api), SetStore::new());
        let id = SetId::from("3");

        service.export_set(&id, Format::Csv, dir.path()).await.unwrap();
        service.export_set(&id, Format::Csv, dir.path()).await.unwrap();

        assert_eq!(api.export_requests.lock().unwrap().len(), 2);
    }
}
