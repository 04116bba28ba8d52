//! CSV format adapter for import/export.
//!
//! The layout is fixed: a header row, then one flashcard per row with the set
//! metadata repeated in the first four columns.
//!
//! | # | Column | Notes |
//! |---|--------|-------|
//! | 0 | Set Name | first data row only |
//! | 1 | Description | first data row only |
//! | 2 | Default Language | first data row only, defaults to `EN` |
//! | 3 | Translation Language | first data row only, defaults to `PL` |
//! | 4 | Content | |
//! | 5 | Translation | |
//! | 6 | Language | falls back to the set's default language |
//! | 7 | Translation Lang | falls back to the set's translation language |
//! | 8 | Known | `true` only for the exact string `true` |
//! | 9 | Date | optional, never read |
//!
//! Decoding is line-oriented and does not use a CSV reader: fields are split
//! by [`tokenize_line`], so a quoted field cannot span lines.

use super::tokenizer::tokenize_line;
use crate::models::{
    DEFAULT_LANGUAGE, DEFAULT_TRANSLATION_LANGUAGE, FlashcardRecord, ImportPayload, SetDescriptor,
};
use crate::{Error, Result};

/// Minimum number of fields on the first data row.
pub const MIN_COLUMNS: usize = 8;

/// Header row written by [`encode`].
pub const HEADER: [&str; 9] = [
    "Set Name",
    "Description",
    "Default Language",
    "Translation Language",
    "Content",
    "Translation",
    "Language",
    "Translation Lang",
    "Known",
];

const COL_NAME: usize = 0;
const COL_DESCRIPTION: usize = 1;
const COL_DEFAULT_LANGUAGE: usize = 2;
const COL_TRANSLATION_LANGUAGE: usize = 3;
const COL_CONTENT: usize = 4;
const COL_TRANSLATION: usize = 5;
const COL_LANGUAGE: usize = 6;
const COL_TRANSLATION_LANG: usize = 7;
const COL_KNOWN: usize = 8;

/// Decodes a CSV document into an import payload.
///
/// Set metadata is read from the first data row only; later rows contribute
/// flashcards and their columns 0-3 are ignored. Rows with blank content or
/// translation are dropped.
///
/// # Errors
///
/// - [`Error::InvalidCsv`] if there is no data row after the header
/// - [`Error::InsufficientColumns`] if the first data row has fewer than 8 fields
/// - [`Error::MissingSetInfo`] if the first data row has no set name
pub fn decode(text: &str) -> Result<ImportPayload> {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.len() < 2 {
        return Err(Error::InvalidCsv);
    }

    let rows: Vec<Vec<String>> = lines[1..].iter().map(|l| tokenize_line(l)).collect();

    let set = decode_set(&rows[0])?;
    let flashcards = rows
        .iter()
        .map(|row| decode_flashcard(row, &set))
        .filter(FlashcardRecord::is_well_formed)
        .collect();

    Ok(ImportPayload { set, flashcards })
}

/// Builds the set descriptor from the first data row.
fn decode_set(first_row: &[String]) -> Result<SetDescriptor> {
    if first_row.len() < MIN_COLUMNS {
        return Err(Error::InsufficientColumns {
            found: first_row.len(),
            required: MIN_COLUMNS,
        });
    }

    let name = field(first_row, COL_NAME);
    if name.is_empty() {
        return Err(Error::MissingSetInfo);
    }

    Ok(SetDescriptor {
        name: name.to_string(),
        description: field(first_row, COL_DESCRIPTION).to_string(),
        default_language: or_default(field(first_row, COL_DEFAULT_LANGUAGE), DEFAULT_LANGUAGE),
        translation_language: or_default(
            field(first_row, COL_TRANSLATION_LANGUAGE),
            DEFAULT_TRANSLATION_LANGUAGE,
        ),
    })
}

/// Maps one data row to a flashcard, using the set for language fallbacks.
fn decode_flashcard(row: &[String], set: &SetDescriptor) -> FlashcardRecord {
    FlashcardRecord {
        content: field(row, COL_CONTENT).to_string(),
        translation: field(row, COL_TRANSLATION).to_string(),
        language: or_default(field(row, COL_LANGUAGE), &set.default_language),
        translation_lang: or_default(
            field(row, COL_TRANSLATION_LANG),
            &set.translation_language,
        ),
        known: field(row, COL_KNOWN) == "true",
    }
}

fn field(row: &[String], idx: usize) -> &str {
    row.get(idx).map_or("", String::as_str)
}

fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() { default } else { value }.to_string()
}

/// Encodes a payload in the import column layout.
///
/// Each flashcard becomes one row repeating the set metadata. Line breaks
/// inside values are flattened to spaces since [`decode`] reads one record
/// per line.
///
/// # Errors
///
/// Returns an error if the CSV writer fails.
pub fn encode(payload: &ImportPayload) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(HEADER).map_err(write_error)?;

    let set = &payload.set;
    for card in &payload.flashcards {
        let known = if card.known { "true" } else { "false" };
        writer
            .write_record(
                [
                    set.name.as_str(),
                    set.description.as_str(),
                    set.default_language.as_str(),
                    set.translation_language.as_str(),
                    card.content.as_str(),
                    card.translation.as_str(),
                    card.language.as_str(),
                    card.translation_lang.as_str(),
                    known,
                ]
                .map(flatten_line_breaks),
            )
            .map_err(write_error)?;
    }

    let bytes = writer.into_inner().map_err(|e| Error::OperationFailed {
        operation: "flush_csv".to_string(),
        cause: e.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| Error::OperationFailed {
        operation: "encode_csv".to_string(),
        cause: e.to_string(),
    })
}

fn flatten_line_breaks(value: &str) -> String {
    value.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

#[allow(clippy::needless_pass_by_value)]
fn write_error(e: csv::Error) -> Error {
    Error::OperationFailed {
        operation: "write_csv".to_string(),
        cause: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER_LINE: &str =
        "Set Name,Description,Default Language,Translation Language,Content,Translation,Language,Translation Lang,Known";

    #[test]
    fn test_decode_single_row() {
        let input = "Name,Desc,EN,PL,Header,Translation,Language,TransLang,Known\nMy Set,,EN,PL,Hello,Cześć,EN,PL,false";
        let payload = decode(input).unwrap();

        assert_eq!(
            payload.set,
            SetDescriptor::new("My Set").with_languages("EN", "PL")
        );
        assert_eq!(
            payload.flashcards,
            vec![FlashcardRecord::new("Hello", "Cześć").with_languages("EN", "PL")]
        );
    }

    #[test]
    fn test_decode_header_only_is_invalid() {
        assert!(matches!(decode(HEADER_LINE), Err(Error::InvalidCsv)));
        assert!(matches!(decode(""), Err(Error::InvalidCsv)));
        assert!(matches!(
            decode(&format!("{HEADER_LINE}\n   \n\n")),
            Err(Error::InvalidCsv)
        ));
    }

    #[test]
    fn test_decode_seven_columns_is_insufficient() {
        let input = format!("{HEADER_LINE}\nSet,Desc,EN,PL,dog,pies,EN");
        match decode(&input) {
            Err(Error::InsufficientColumns { found, required }) => {
                assert_eq!(found, 7);
                assert_eq!(required, 8);
            },
            other => panic!("expected InsufficientColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_blank_set_name() {
        let input = format!("{HEADER_LINE}\n  ,Desc,EN,PL,dog,pies,,");
        assert!(matches!(decode(&input), Err(Error::MissingSetInfo)));
    }

    #[test]
    fn test_decode_applies_language_defaults() {
        let input = format!("{HEADER_LINE}\nSet,,,,dog,pies,,");
        let payload = decode(&input).unwrap();

        assert_eq!(payload.set.default_language, "EN");
        assert_eq!(payload.set.translation_language, "PL");
        assert_eq!(payload.flashcards[0].language, "EN");
        assert_eq!(payload.flashcards[0].translation_lang, "PL");
        assert!(!payload.flashcards[0].known);
    }

    #[test]
    fn test_decode_card_languages_fall_back_to_set() {
        let input = format!("{HEADER_LINE}\nSet,,DE,FR,Hund,chien,,,true");
        let payload = decode(&input).unwrap();

        assert_eq!(payload.flashcards[0].language, "DE");
        assert_eq!(payload.flashcards[0].translation_lang, "FR");
        assert!(payload.flashcards[0].known);
    }

    #[test]
    fn test_decode_known_is_case_sensitive() {
        let input = format!(
            "{HEADER_LINE}\nS,,EN,PL,a,b,,,true\nS,,EN,PL,c,d,,,True\nS,,EN,PL,e,f,,,1"
        );
        let known: Vec<bool> = decode(&input)
            .unwrap()
            .flashcards
            .iter()
            .map(|c| c.known)
            .collect();
        assert_eq!(known, vec![true, false, false]);
    }

    #[test]
    fn test_decode_metadata_from_first_row_only() {
        let input = format!(
            "{HEADER_LINE}\nFirst,one,EN,PL,a,b,,\nSecond,two,DE,FR,c,d,,"
        );
        let payload = decode(&input).unwrap();

        assert_eq!(payload.set.name, "First");
        assert_eq!(payload.set.description, "one");
        assert_eq!(payload.flashcards.len(), 2);
        // later rows fall back to the first row's languages
        assert_eq!(payload.flashcards[1].language, "EN");
        assert_eq!(payload.flashcards[1].translation_lang, "PL");
    }

    #[test]
    fn test_decode_drops_blank_rows_and_keeps_siblings() {
        let input = format!(
            "{HEADER_LINE}\nSet,,EN,PL,   ,pies,,\nSet,,EN,PL,cat,kot,,\nSet,,EN,PL,bird,,,"
        );
        let payload = decode(&input).unwrap();

        assert_eq!(payload.flashcards.len(), 1);
        assert_eq!(payload.flashcards[0].content, "cat");
    }

    #[test]
    fn test_decode_short_later_row_is_dropped() {
        let input = format!("{HEADER_LINE}\nSet,,EN,PL,cat,kot,,\nSet,,EN,PL,lonely");
        let payload = decode(&input).unwrap();
        assert_eq!(payload.flashcards.len(), 1);
    }

    #[test]
    fn test_decode_ignores_date_column_and_crlf() {
        let input = format!("{HEADER_LINE},Date\r\nSet,,EN,PL,cat,kot,EN,PL,false,2024-05-01\r\n");
        let payload = decode(&input).unwrap();
        assert_eq!(payload.flashcards.len(), 1);
        assert_eq!(payload.flashcards[0].translation, "kot");
    }

    #[test]
    fn test_decode_quoted_fields() {
        let input = format!(
            "{HEADER_LINE}\n\"Idioms, vol. 1\",,EN,PL,\"break a \"\"leg\"\"\",\"połamania nóg\",,"
        );
        let payload = decode(&input).unwrap();
        assert_eq!(payload.set.name, "Idioms, vol. 1");
        assert_eq!(payload.flashcards[0].content, "break a \"leg\"");
    }

    #[test]
    fn test_encode_then_decode() {
        let payload = ImportPayload::new(
            SetDescriptor::new("Idioms, \"hard\"")
                .with_description("multi\nline")
                .with_languages("EN", "PL"),
        )
        .with_flashcard(FlashcardRecord::new("a, b", "c").with_languages("EN", "PL"))
        .with_flashcard(
            FlashcardRecord::new("x", "y")
                .with_languages("DE", "FR")
                .with_known(true),
        );

        let text = encode(&payload).unwrap();
        assert!(text.starts_with(HEADER_LINE));

        let decoded = decode(&text).unwrap();
        assert_eq!(decoded.set.name, "Idioms, \"hard\"");
        assert_eq!(decoded.set.description, "multi line");
        assert_eq!(decoded.flashcards, payload.flashcards);
    }
}
