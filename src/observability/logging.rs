//! Logging configuration.

use crate::config::LoggingSettings;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor the config file sets one.
pub const DEFAULT_FILTER: &str = "flashsets=warn";

/// Filter used with `--verbose` when no explicit filter is set.
pub const VERBOSE_FILTER: &str = "flashsets=debug";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(crate::Error::InvalidInput(format!("Unknown log format: {s}"))),
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug)]
pub struct LoggingConfig {
    /// Event filter.
    pub filter: EnvFilter,
    /// Output format.
    pub format: LogFormat,
    /// Append logs to this file instead of stderr.
    pub file: Option<PathBuf>,
    /// Problems found while resolving, logged once the subscriber is up.
    pub warnings: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: EnvFilter::new(DEFAULT_FILTER),
            format: LogFormat::default(),
            file: None,
            warnings: Vec::new(),
        }
    }
}

impl LoggingConfig {
    /// Resolves logging from config file settings.
    ///
    /// The filter is taken from `RUST_LOG`, then the settings, then the
    /// verbosity default. An unknown format or invalid filter falls back to
    /// the default and is recorded in `warnings`.
    #[must_use]
    pub fn from_settings(settings: &LoggingSettings, verbose: bool) -> Self {
        let mut warnings = Vec::new();
        let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
        let directives = std::env::var(EnvFilter::DEFAULT_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| settings.filter.clone());

        let filter = directives.map_or_else(
            || EnvFilter::new(fallback),
            |d| {
                EnvFilter::try_new(&d).unwrap_or_else(|e| {
                    warnings.push(format!("Ignoring invalid log filter '{d}': {e}"));
                    EnvFilter::new(fallback)
                })
            },
        );

        let format = settings.format.as_deref().map_or(LogFormat::Pretty, |f| {
            f.parse().unwrap_or_else(|e: crate::Error| {
                warnings.push(format!("{e}; using pretty logs"));
                LogFormat::Pretty
            })
        });

        Self {
            filter,
            format,
            file: settings.file.clone(),
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!(" Pretty ".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_from_settings_format_and_file() {
        let settings = LoggingSettings {
            filter: None,
            format: Some("json".to_string()),
            file: Some(PathBuf::from("logs/flashsets.log")),
        };
        let config = LoggingConfig::from_settings(&settings, false);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.file, Some(PathBuf::from("logs/flashsets.log")));
    }

    #[test]
    fn test_unknown_format_falls_back_to_pretty() {
        let settings = LoggingSettings {
            format: Some("xml".to_string()),
            ..LoggingSettings::default()
        };
        let config = LoggingConfig::from_settings(&settings, false);
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(
            config.warnings,
            vec!["invalid input: Unknown log format: xml; using pretty logs"]
        );
    }
}
