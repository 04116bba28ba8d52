//! Set import service.
//!
//! Turns a user-selected file into a set on the backend.

use crate::api::SetsApi;
use crate::io::Format;
use crate::io::source::SelectedFile;
use crate::io::validation::{ImportValidator, ValidatedPayload};
use crate::models::ServerSet;
use crate::state::{InFlight, SetStore};
use crate::{Error, Result};
use std::sync::Arc;
use std::time::Instant;

/// Result of a successful import.
#[derive(Debug, Clone)]
pub struct ImportSummary {
    /// The set as created by the backend.
    pub set: ServerSet,
    /// Number of flashcards the backend created.
    pub flashcards_created: usize,
    /// Validation warnings, formatted for display.
    pub warnings: Vec<String>,
}

/// Service importing flashcard sets from JSON or CSV files.
///
/// The sequence per file is: type gate, read, decode by extension, validate,
/// submit, then append the returned set to the [`SetStore`]. Local state is
/// only touched after the backend accepted the submission.
pub struct ImportService<A: SetsApi> {
    /// Backend receiving the payload.
    api: Arc<A>,
    /// Local sets, appended on success.
    store: SetStore,
    validator: ImportValidator,
    in_flight: InFlight,
}

impl<A: SetsApi> ImportService<A> {
    /// Creates a new import service.
    #[must_use]
    pub fn new(api: Arc<A>, store: SetStore) -> Self {
        Self {
            api,
            store,
            validator: ImportValidator::new(),
            in_flight: InFlight::new("import"),
        }
    }

    /// Returns whether an import is currently outstanding.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_active()
    }

    /// Imports a file into the backend.
    ///
    /// # Errors
    ///
    /// - [`Error::Busy`] if another import is in flight
    /// - [`Error::WrongFileFormat`] if the file is neither JSON nor CSV
    /// - [`Error::FailedToRead`] if the file cannot be read
    /// - a decode or validation error for malformed content
    /// - [`Error::ImportFailed`] if the backend rejects the submission
    pub async fn import_file(&self, file: &SelectedFile) -> Result<ImportSummary> {
        let _guard = self.in_flight.try_acquire()?;
        let start = Instant::now();

        let result = self.run_import(file).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        metrics::counter!("flashsets_import_total", "outcome" => outcome).increment(1);
        metrics::histogram!("flashsets_import_duration_ms")
            .record(start.elapsed().as_secs_f64() * 1000.0);

        result
    }

    async fn run_import(&self, file: &SelectedFile) -> Result<ImportSummary> {
        let validated = self.decode_file(file).await?;
        let ValidatedPayload { payload, issues } = validated;

        for issue in &issues {
            tracing::warn!(file = %file.name, issue = %issue, "Import validation warning");
        }

        tracing::debug!(
            api = self.api.name(),
            set = %payload.set.name,
            flashcards = payload.flashcards.len(),
            "Submitting import"
        );
        let response = self.api.import_set(&payload).await.inspect_err(|e| {
            tracing::warn!(file = %file.name, error = %e, "Import submission failed");
        })?;

        let flashcards_created = response.flashcards.len();
        self.store.append(response.set.clone()).await;

        tracing::info!(
            set_id = %response.set.id,
            set = %response.set.name(),
            flashcards_created,
            "Imported flashcard set"
        );

        Ok(ImportSummary {
            set: response.set,
            flashcards_created,
            warnings: issues.iter().map(ToString::to_string).collect(),
        })
    }

    /// Gates, reads, decodes and validates a file without submitting it.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Self::import_file`] except
    /// [`Error::Busy`] and [`Error::ImportFailed`].
    pub async fn decode_file(&self, file: &SelectedFile) -> Result<ValidatedPayload> {
        if !Format::accepts(&file.name, file.mime_type.as_deref()) {
            tracing::debug!(file = %file.name, mime = ?file.mime_type, "Rejected by type gate");
            return Err(Error::WrongFileFormat {
                name: file.name.clone(),
            });
        }

        let text = file.read_text().await?;
        let format = Format::from_file_name(&file.name)?;
        let payload = format.decode(&text)?;

        metrics::histogram!("flashsets_import_flashcards", "format" => format.extension())
            .record(f64::from(u32::try_from(payload.flashcards.len()).unwrap_or(u32::MAX)));
        tracing::debug!(
            file = %file.name,
            format = %format,
            flashcards = payload.flashcards.len(),
            "Decoded import file"
        );

        self.validator.validate(payload)
    }
}
