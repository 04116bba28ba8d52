//! Binary entry point for flashsets.
//!
//! This binary provides the CLI interface for importing and exporting
//! flashcard sets.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

mod commands;

use clap::{Parser, Subcommand};
use flashsets::config::FlashsetsConfig;
use flashsets::io::Format;
use flashsets::observability::{self, LoggingConfig};
use std::path::PathBuf;
use std::process::ExitCode;

use commands::{cmd_convert, cmd_export, cmd_import, cmd_sets};

/// Flashsets - import and export bilingual flashcard sets.
#[derive(Parser)]
#[command(name = "flashsets")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Import a JSON or CSV file as a new set.
    Import {
        /// File to import.
        file: PathBuf,

        /// MIME type declared for the file.
        #[arg(long)]
        mime_type: Option<String>,

        /// Decode and validate without submitting.
        #[arg(long)]
        dry_run: bool,
    },

    /// Export a set from the backend.
    Export {
        /// Id of the set to export.
        set_id: String,

        /// Export format (json or csv).
        #[arg(short, long, default_value = "json")]
        format: Format,

        /// Directory to write the export to.
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Convert a local JSON or CSV file to the other format.
    Convert {
        /// File to read.
        input: PathBuf,

        /// File to write; its extension selects the format.
        output: PathBuf,
    },

    /// List sets imported from this machine.
    Sets,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match FlashsetsConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = observability::init(LoggingConfig::from_settings(&config.logging, cli.verbose))
    {
        eprintln!("Failed to initialize observability: {e}");
        return ExitCode::FAILURE;
    }

    let result = match cli.command {
        Commands::Import {
            file,
            mime_type,
            dry_run,
        } => cmd_import(&config, file, mime_type, dry_run).await,

        Commands::Export {
            set_id,
            format,
            output_dir,
        } => cmd_export(&config, set_id, format, output_dir).await,

        Commands::Convert { input, output } => cmd_convert(input, &output).await,

        Commands::Sets => cmd_sets(&config).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}
