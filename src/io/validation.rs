//! Import validation.
//!
//! The single authoritative post-decode check, applied to every payload
//! regardless of the format it was decoded from.

use crate::models::ImportPayload;
use crate::{Error, Result};

/// A non-fatal observation made while validating a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// The field that has an issue.
    pub field: String,
    /// Description of the issue.
    pub message: String,
}

impl ValidationIssue {
    /// Creates a new issue.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A payload that passed validation, ready for submission.
#[derive(Debug, Clone)]
pub struct ValidatedPayload {
    /// The normalized payload.
    pub payload: ImportPayload,
    /// Warnings collected during validation.
    pub issues: Vec<ValidationIssue>,
}

/// Validates decoded payloads before they are submitted.
///
/// Both checks repeat what the decoders already do, so every payload is held
/// to them whatever its format. An empty flashcard list is accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportValidator;

impl ImportValidator {
    /// Creates a new validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates a payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSetInfo`] if the set name is empty.
    pub fn validate(&self, mut payload: ImportPayload) -> Result<ValidatedPayload> {
        if payload.set.name.is_empty() {
            return Err(Error::MissingSetInfo);
        }

        let mut issues = Vec::new();

        let before = payload.flashcards.len();
        payload.flashcards.retain(|card| card.is_well_formed());
        let dropped = before - payload.flashcards.len();
        if dropped > 0 {
            issues.push(ValidationIssue::new(
                "flashcards",
                format!("{dropped} record(s) with empty content or translation dropped"),
            ));
        }

        if payload.flashcards.is_empty() {
            issues.push(ValidationIssue::new(
                "flashcards",
                "Set contains no flashcards",
            ));
        }

        Ok(ValidatedPayload { payload, issues })
    }
}
