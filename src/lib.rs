//! # Flashsets
//!
//! Import and export of bilingual flashcard sets.
//!
//! Flashsets moves a flashcard set between user files and the sets backend.
//! A set travels as a single [`ImportPayload`]: one [`SetDescriptor`] plus the
//! list of its [`FlashcardRecord`]s.
//!
//! ## Features
//!
//! - Line-oriented CSV decoding with a quote-aware field tokenizer
//! - JSON decoding with structural validation
//! - Import orchestration: file gate, decode, validate, upload, local reconcile
//! - Export orchestration: fetch rendered export, write the download file
//!
//! ## Example
//!
//! ```rust,ignore
//! use flashsets::io::{ImportService, SelectedFile};
//!
//! let service = ImportService::new(api, store);
//! let summary = service.import_file(&SelectedFile::from_path("words.csv")).await?;
//! println!("Imported {} flashcards", summary.flashcards_created);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod api;
pub mod config;
pub mod io;
pub mod models;
pub mod observability;
pub mod state;

// Re-exports for convenience
pub use api::{HttpSetsApi, SetsApi};
pub use config::FlashsetsConfig;
pub use io::{ExportService, Format, ImportService, SelectedFile};
pub use models::{FlashcardRecord, ImportPayload, ServerSet, SetDescriptor, SetId};
pub use state::{InFlight, SetStore};

/// Error type for flashsets operations.
///
/// Every failure of the import/export chain is one of these variants and is
/// shown to the user through its `Display` message.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `WrongFileFormat` | Selected file is neither JSON nor CSV by name or MIME type |
/// | `FailedToRead` | The selected file cannot be read as text |
/// | `InvalidJson` | JSON syntax error or a malformed `flashcards` array |
/// | `InvalidCsv` | CSV has no data row after the header |
/// | `InsufficientColumns` | First CSV data row has fewer than 8 fields |
/// | `UnsupportedFormat` | File passed the gate but has no decodable extension |
/// | `MissingSetInfo` | Decoded payload has no usable set name |
/// | `ImportFailed` | Backend rejected the import or could not be reached |
/// | `ExportFailed` | Backend export request did not succeed |
/// | `Busy` | An import or export is already in flight |
#[derive(Debug, ThisError)]
pub enum Error {
    /// The file was rejected by the type gate before any read.
    #[error("wrong file format: '{name}' is not a JSON or CSV file")]
    WrongFileFormat {
        /// Name of the rejected file.
        name: String,
    },

    /// The file could not be read as text.
    #[error("failed to read '{name}': {cause}")]
    FailedToRead {
        /// Name of the file.
        name: String,
        /// The underlying cause.
        cause: String,
    },

    /// The JSON document is not valid for import.
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    /// The CSV document lacks a header plus at least one data row.
    #[error("invalid CSV: expected a header row and at least one data row")]
    InvalidCsv,

    /// The first CSV data row has too few fields.
    #[error("insufficient columns: expected at least {required}, found {found}")]
    InsufficientColumns {
        /// Number of fields found on the first data row.
        found: usize,
        /// Minimum number of fields.
        required: usize,
    },

    /// No decoder matches the file extension.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The payload has no set or the set has no name.
    #[error("missing set information: a set with a non-empty name is required")]
    MissingSetInfo,

    /// The backend rejected the import submission.
    #[error("import failed: {0}")]
    ImportFailed(String),

    /// The backend export request did not succeed.
    #[error("export failed: {0}")]
    ExportFailed(String),

    /// A request of the same kind is still outstanding.
    #[error("{operation} already in progress")]
    Busy {
        /// The operation that is in flight.
        operation: &'static str,
    },

    /// Invalid input was provided (CLI arguments, configuration values).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An ambient operation failed (configuration, logging, local state I/O).
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

impl Error {
    /// Returns a stable snake_case label for the variant.
    ///
    /// Used as the `outcome` label on import/export metrics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::WrongFileFormat { .. } => "wrong_file_format",
            Self::FailedToRead { .. } => "failed_to_read",
            Self::InvalidJson(_) => "invalid_json",
            Self::InvalidCsv => "invalid_csv",
            Self::InsufficientColumns { .. } => "insufficient_columns",
            Self::UnsupportedFormat(_) => "unsupported_format",
            Self::MissingSetInfo => "missing_set_info",
            Self::ImportFailed(_) => "import_failed",
            Self::ExportFailed(_) => "export_failed",
            Self::Busy { .. } => "busy",
            Self::InvalidInput(_) => "invalid_input",
            Self::OperationFailed { .. } => "operation_failed",
        }
    }
}

/// Result type alias for flashsets operations.
pub type Result<T> = std::result::Result<T, Error>;
