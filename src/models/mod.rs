//! Data models for flashsets.
//!
//! The wire shapes shared by the decoders, the validator and the backend.
//! Field names serialize in camelCase to match the interchange formats.

mod flashcard;
mod payload;
mod set;

pub use flashcard::FlashcardRecord;
pub use payload::{ImportPayload, ImportResponse};
pub use set::{DEFAULT_LANGUAGE, DEFAULT_TRANSLATION_LANGUAGE, ServerSet, SetDescriptor, SetId};
