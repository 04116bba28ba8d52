//! Import, export and conversion command handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use flashsets::config::FlashsetsConfig;
use flashsets::io::{ExportService, Format, ImportService, ImportValidator, SelectedFile};
use flashsets::{HttpSetsApi, Result, SetId, SetStore};

/// Maximum number of warnings printed per command.
const MAX_WARNINGS: usize = 10;

/// Executes the import command.
pub async fn cmd_import(
    config: &FlashsetsConfig,
    file: PathBuf,
    mime_type: Option<String>,
    dry_run: bool,
) -> Result<()> {
    let mut selected = SelectedFile::from_path(file);
    if let Some(mime) = mime_type {
        selected = selected.with_mime_type(mime);
    }

    let sets_path = config.sets_path();
    let store = SetStore::load_from_file(&sets_path).await?;
    let api = Arc::new(HttpSetsApi::from_config(&config.api));
    let service = ImportService::new(api, store.clone());

    if dry_run {
        let validated = service.decode_file(&selected).await?;
        let payload = &validated.payload;

        println!("Dry run completed (nothing submitted):");
        println!("  Set:          {}", payload.set.name);
        println!(
            "  Languages:    {} -> {}",
            display_or_dash(&payload.set.default_language),
            display_or_dash(&payload.set.translation_language)
        );
        println!("  Flashcards:   {}", payload.flashcards.len());
        let warnings: Vec<String> = validated.issues.iter().map(ToString::to_string).collect();
        print_warnings(&warnings);
        return Ok(());
    }

    let summary = service.import_file(&selected).await?;
    store.save_to_file(&sets_path).await?;

    println!("Import completed:");
    println!("  Set:          {} (id {})", summary.set.name(), summary.set.id);
    println!("  Flashcards:   {}", summary.flashcards_created);
    print_warnings(&summary.warnings);

    Ok(())
}

/// Executes the export command.
pub async fn cmd_export(
    config: &FlashsetsConfig,
    set_id: String,
    format: Format,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let store = SetStore::load_from_file(&config.sets_path()).await?;
    let api = Arc::new(HttpSetsApi::from_config(&config.api));
    let service = ExportService::new(api, store);

    let output_dir = output_dir.unwrap_or_else(|| config.export.output_dir.clone());
    let summary = service
        .export_set(&SetId::from(set_id), format, &output_dir)
        .await?;

    println!("Export completed:");
    println!("  Format:       {}", summary.format);
    println!("  Bytes:        {}", summary.bytes);
    println!("  Output:       {}", summary.path.display());

    Ok(())
}

/// Executes the convert command.
///
/// Decodes a local JSON or CSV file and writes it in the format named by the
/// output extension. The backend is not contacted.
pub async fn cmd_convert(input: PathBuf, output: &Path) -> Result<()> {
    let selected = SelectedFile::from_path(input);
    let input_format = Format::from_file_name(&selected.name)?;
    let output_format = Format::from_file_name(&output.to_string_lossy())?;

    let text = selected.read_text().await?;
    let validated = ImportValidator::new().validate(input_format.decode(&text)?)?;
    let encoded = output_format.encode(&validated.payload)?;

    tokio::fs::write(output, &encoded)
        .await
        .map_err(|e| flashsets::Error::OperationFailed {
            operation: "write_converted_file".to_string(),
            cause: format!("{}: {e}", output.display()),
        })?;

    println!("Conversion completed:");
    println!("  {} -> {}", input_format, output_format);
    println!("  Set:          {}", validated.payload.set.name);
    println!("  Flashcards:   {}", validated.payload.flashcards.len());
    println!("  Output:       {}", output.display());
    let warnings: Vec<String> = validated.issues.iter().map(ToString::to_string).collect();
    print_warnings(&warnings);

    Ok(())
}

fn print_warnings(warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }
    println!();
    println!("Warnings ({}):", warnings.len());
    for warning in warnings.iter().take(MAX_WARNINGS) {
        println!("  - {warning}");
    }
    if warnings.len() > MAX_WARNINGS {
        println!("  ... and {} more", warnings.len() - MAX_WARNINGS);
    }
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}
