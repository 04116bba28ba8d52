//! Configuration management.
//!
//! Settings come from a TOML file, then environment variables override
//! individual values. The file is looked up in this order:
//!
//! 1. the path given on the command line
//! 2. `FLASHSETS_CONFIG_PATH`
//! 3. `<platform config dir>/flashsets/config.toml`
//!
//! A missing file at step 3 is not an error; defaults apply.
//!
//! ```toml
//! data_dir = "~/.local/share/flashsets"
//!
//! [api]
//! base_url = "https://cards.example.com"
//! token = "..."
//! timeout_ms = 30000
//! connect_timeout_ms = 5000
//!
//! [export]
//! output_dir = "downloads"
//!
//! [logging]
//! filter = "flashsets=debug"
//! format = "json"
//! file = "flashsets.log"
//! ```

use crate::api::{HttpConfig, HttpSetsApi};
use crate::{Error, Result};
use secrecy::SecretString;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "FLASHSETS_CONFIG_PATH";

/// Main configuration for flashsets.
#[derive(Debug)]
pub struct FlashsetsConfig {
    /// Backend connection settings.
    pub api: ApiConfig,
    /// Export settings.
    pub export: ExportConfig,
    /// Logging settings.
    pub logging: LoggingSettings,
    /// Directory holding local state (`sets.json`).
    pub data_dir: PathBuf,
}

/// Backend connection settings.
#[derive(Debug)]
pub struct ApiConfig {
    /// Base URL of the sets backend.
    pub base_url: String,
    /// Bearer token sent with every request.
    pub token: Option<SecretString>,
    /// HTTP client timeouts.
    pub http: HttpConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: HttpSetsApi::DEFAULT_BASE_URL.to_string(),
            token: None,
            http: HttpConfig::default(),
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Directory downloads are written to.
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}

/// Logging settings as written in the config file.
///
/// Interpreted by [`crate::observability::LoggingConfig::from_settings`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingSettings {
    /// `EnvFilter` directives.
    pub filter: Option<String>,
    /// Output format: `pretty` or `json`.
    pub format: Option<String>,
    /// Log file path; logs go to stderr when unset.
    pub file: Option<PathBuf>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Data directory.
    pub data_dir: Option<String>,
    /// Backend section.
    pub api: Option<ConfigFileApi>,
    /// Export section.
    pub export: Option<ConfigFileExport>,
    /// Logging section.
    pub logging: Option<ConfigFileLogging>,
}

/// `[api]` section in config file.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileApi {
    /// Base URL.
    pub base_url: Option<String>,
    /// Bearer token.
    pub token: Option<String>,
    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: Option<u64>,
}

/// `[export]` section in config file.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileExport {
    /// Output directory.
    pub output_dir: Option<String>,
}

/// `[logging]` section in config file.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileLogging {
    /// Filter directives.
    pub filter: Option<String>,
    /// Output format.
    pub format: Option<String>,
    /// Log file.
    pub file: Option<String>,
}

impl Default for FlashsetsConfig {
    fn default() -> Self {
        let data_dir = directories::BaseDirs::new().map_or_else(
            || PathBuf::from(".flashsets"),
            |dirs| dirs.data_dir().join("flashsets"),
        );
        Self {
            api: ApiConfig::default(),
            export: ExportConfig::default(),
            logging: LoggingSettings::default(),
            data_dir,
        }
    }
}

impl FlashsetsConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the local set state file.
    #[must_use]
    pub fn sets_path(&self) -> PathBuf {
        self.data_dir.join("sets.json")
    }

    /// Loads configuration the way the CLI does.
    ///
    /// Reads `.env` if present, picks the config file (see the module docs)
    /// and applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named config file cannot be read or
    /// parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        // a missing .env is the normal case
        let _ = dotenvy::dotenv();

        let from_env = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        let config = match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::load_default(),
        };
        Ok(config.with_env_overrides())
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_config_file".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;

        let config = Self::parse(&contents).map_err(|e| match e {
            Error::OperationFailed { operation, cause } => Error::OperationFailed {
                operation,
                cause: format!("{}: {cause}", path.display()),
            },
            other => other,
        })?;

        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid config document.
    pub fn parse(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents).map_err(|e| Error::OperationFailed {
            operation: "parse_config_file".to_string(),
            cause: e.to_string(),
        })?;
        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the platform config directory.
    ///
    /// Falls back to defaults if the file is missing or unreadable.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let path = base_dirs.config_dir().join("flashsets").join("config.toml");
        if !path.exists() {
            return Self::default();
        }

        Self::load_from_file(&path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable config file");
            Self::default()
        })
    }

    /// Converts a `ConfigFile` to `FlashsetsConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(data_dir) = file.data_dir {
            config.data_dir = PathBuf::from(data_dir);
        }
        if let Some(api) = file.api {
            if let Some(base_url) = api.base_url {
                config.api.base_url = base_url;
            }
            config.api.token = api.token.filter(|t| !t.is_empty()).map(SecretString::from);
            if let Some(timeout_ms) = api.timeout_ms {
                config.api.http.timeout_ms = timeout_ms;
            }
            if let Some(connect_timeout_ms) = api.connect_timeout_ms {
                config.api.http.connect_timeout_ms = connect_timeout_ms;
            }
        }
        if let Some(output_dir) = file.export.and_then(|e| e.output_dir) {
            config.export.output_dir = PathBuf::from(output_dir);
        }
        if let Some(logging) = file.logging {
            config.logging = LoggingSettings {
                filter: logging.filter,
                format: logging.format,
                file: logging.file.map(PathBuf::from),
            };
        }

        config
    }

    /// Applies `FLASHSETS_*` environment variable overrides.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from a variable lookup.
    ///
    /// Unparseable numeric values are ignored.
    #[must_use]
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(url) = var("FLASHSETS_API_URL") {
            self.api.base_url = url;
        }
        if let Some(token) = var("FLASHSETS_TOKEN") {
            self.api.token = Some(SecretString::from(token));
        }
        if let Some(timeout_ms) = var("FLASHSETS_HTTP_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
            self.api.http.timeout_ms = timeout_ms;
        }
        if let Some(connect_timeout_ms) =
            var("FLASHSETS_HTTP_CONNECT_TIMEOUT_MS").and_then(|v| v.parse().ok())
        {
            self.api.http.connect_timeout_ms = connect_timeout_ms;
        }
        if let Some(format) = var("FLASHSETS_LOG_FORMAT") {
            self.logging.format = Some(format);
        }
        if let Some(file) = var("FLASHSETS_LOG_FILE") {
            self.logging.file = Some(PathBuf::from(file));
        }
        if let Some(data_dir) = var("FLASHSETS_DATA_DIR") {
            self.data_dir = PathBuf::from(data_dir);
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = FlashsetsConfig::new();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert!(config.api.token.is_none());
        assert_eq!(config.api.http, HttpConfig::default());
        assert_eq!(config.export.output_dir, PathBuf::from("."));
        assert!(config.sets_path().ends_with("sets.json"));
    }

    #[test]
    fn test_parse_full_file() {
        let config = FlashsetsConfig::parse(
            r#"
            data_dir = "/var/lib/flashsets"

            [api]
            base_url = "https://cards.example.com"
            token = "abc"
            timeout_ms = 30000

            [export]
            output_dir = "downloads"

            [logging]
            filter = "flashsets=trace"
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/flashsets"));
        assert_eq!(config.api.base_url, "https://cards.example.com");
        assert_eq!(config.api.token.as_ref().unwrap().expose_secret(), "abc");
        assert_eq!(config.api.http.timeout_ms, 30000);
        assert_eq!(config.api.http.connect_timeout_ms, 0);
        assert_eq!(config.export.output_dir, PathBuf::from("downloads"));
        assert_eq!(config.logging.format.as_deref(), Some("json"));
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        assert!(matches!(
            FlashsetsConfig::parse("[api]\nbase_ulr = \"typo\""),
            Err(Error::OperationFailed { .. })
        ));
    }

    #[test]
    fn test_token_not_in_debug_output() {
        let config = FlashsetsConfig::parse("[api]\ntoken = \"hunter2\"").unwrap();
        assert!(!format!("{config:?}").contains("hunter2"));
    }

    #[test]
    fn test_env_overrides() {
        let config = FlashsetsConfig::new().with_overrides_from(env(&[
            ("FLASHSETS_API_URL", "https://override.example.com"),
            ("FLASHSETS_TOKEN", "from-env"),
            ("FLASHSETS_HTTP_TIMEOUT_MS", "1500"),
            ("FLASHSETS_HTTP_CONNECT_TIMEOUT_MS", "not a number"),
            ("FLASHSETS_LOG_FORMAT", "json"),
            ("FLASHSETS_DATA_DIR", "/tmp/fs"),
        ]));

        assert_eq!(config.api.base_url, "https://override.example.com");
        assert_eq!(config.api.token.as_ref().unwrap().expose_secret(), "from-env");
        assert_eq!(config.api.http.timeout_ms, 1500);
        assert_eq!(config.api.http.connect_timeout_ms, 0);
        assert_eq!(config.logging.format.as_deref(), Some("json"));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/fs"));
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let config = FlashsetsConfig::parse("[api]\nbase_url = \"https://file.example.com\"")
            .unwrap()
            .with_overrides_from(env(&[("FLASHSETS_API_URL", "")]));
        assert_eq!(config.api.base_url, "https://file.example.com");
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[export]\noutput_dir = \"out\"").unwrap();

        let config = FlashsetsConfig::load_from_file(&path).unwrap();
        assert_eq!(config.export.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = FlashsetsConfig::load_from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("read_config_file"));
    }
}
