//! Set interchange I/O.
//!
//! Moves flashcard sets between user files and the sets backend.
//!
//! # Architecture
//!
//! - **Format adapters** ([`formats`]) decode file text into an
//!   [`ImportPayload`](crate::models::ImportPayload) and encode it back
//! - **Validation** ([`validation`]) is the one post-decode check every
//!   payload passes before upload
//! - **Services** ([`services`]) sequence file I/O, decoding, validation and
//!   backend calls as one unit of work
//!
//! # Supported Formats
//!
//! | Format | Import | Export | Notes |
//! |--------|--------|--------|-------|
//! | JSON | ✓ | ✓ | `{ set, flashcards }` document; export is pretty-printed |
//! | CSV | ✓ | ✓ | Header row plus one card per line; export is written as received |
//!
//! # Examples
//!
//! ## Import a CSV file
//!
//! ```rust,ignore
//! use flashsets::io::{ImportService, SelectedFile};
//!
//! let service = ImportService::new(api, store);
//! let summary = service.import_file(&SelectedFile::from_path("verbs.csv")).await?;
//! println!("Imported {} flashcards into '{}'", summary.flashcards_created, summary.set.name());
//! ```
//!
//! ## Export a set as JSON
//!
//! ```rust,ignore
//! use flashsets::io::{ExportService, Format};
//!
//! let service = ExportService::new(api, store);
//! let summary = service.export_set(&"42".into(), Format::Json, Path::new(".")).await?;
//! println!("Wrote {}", summary.path.display());
//! ```

mod download;
pub mod formats;
pub mod services;
mod source;
pub mod validation;

// Re-exports for convenience
pub use download::{DownloadGuard, FALLBACK_FILE_STEM, download_file_name};
pub use formats::Format;
pub use services::export::{ExportService, ExportSummary};
pub use services::import::{ImportService, ImportSummary};
pub use source::SelectedFile;
pub use validation::{ImportValidator, ValidatedPayload, ValidationIssue};
