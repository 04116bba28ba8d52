//! Sets backend client.
//!
//! The backend stores sets and renders exports. Everything the codec needs
//! from it goes through the [`SetsApi`] trait so orchestrators can be driven
//! by an in-process fake in tests.
//!
//! # Endpoints
//!
//! | Operation | Request | Success body |
//! |-----------|---------|--------------|
//! | import | `POST /api/sets/import` with an [`ImportPayload`] | `{ set, flashcards }` |
//! | export | `GET /api/sets/{id}/export?format=json\|csv` | rendered document |
//!
//! Both requests carry the caller's bearer token. A non-2xx response may carry
//! `{ "message": ... }` or `{ "error": ... }` for display.

mod http;

pub use http::HttpSetsApi;

use crate::io::Format;
use crate::models::{ImportPayload, ImportResponse, SetId};
use crate::Result;
use std::future::Future;
use std::time::Duration;

/// Operations the sets backend provides to the codec.
///
/// Implementations map transport failures and non-success responses to
/// [`crate::Error::ImportFailed`] and [`crate::Error::ExportFailed`].
pub trait SetsApi: Send + Sync {
    /// Returns the backend name for logging.
    fn name(&self) -> &'static str;

    /// Submits a payload to the import endpoint.
    fn import_set(
        &self,
        payload: &ImportPayload,
    ) -> impl Future<Output = Result<ImportResponse>> + Send;

    /// Fetches the rendered export of a set as text.
    fn export_set(&self, id: &SetId, format: Format)
    -> impl Future<Output = Result<String>> + Send;
}

/// HTTP client settings for backend requests.
///
/// Both timeouts default to 0, which leaves them disabled: requests are
/// awaited until the backend answers or the connection fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HttpConfig {
    /// Request timeout in milliseconds (0 to disable).
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds (0 to disable).
    pub connect_timeout_ms: u64,
}

/// Builds an async HTTP client with the configured timeouts.
#[must_use]
pub fn build_http_client(config: HttpConfig) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();
    if config.timeout_ms > 0 {
        builder = builder.timeout(Duration::from_millis(config.timeout_ms));
    }
    if config.connect_timeout_ms > 0 {
        builder = builder.connect_timeout(Duration::from_millis(config.connect_timeout_ms));
    }

    builder.build().unwrap_or_else(|err| {
        tracing::warn!("Failed to build sets HTTP client: {err}");
        reqwest::Client::new()
    })
}

/// Extracts a display message from an error response body.
///
/// Prefers `message` over `error`; returns `None` for bodies that are not
/// JSON objects or carry neither field.
#[must_use]
pub fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(key).and_then(serde_json::Value::as_str))
        .map(str::trim)
        .find(|msg| !msg.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_prefers_message() {
        let body = r#"{"message": "Set already exists", "error": "Conflict"}"#;
        assert_eq!(server_message(body).as_deref(), Some("Set already exists"));
    }

    #[test]
    fn test_server_message_falls_back_to_error() {
        assert_eq!(
            server_message(r#"{"error": "Unauthorized"}"#).as_deref(),
            Some("Unauthorized")
        );
        assert_eq!(
            server_message(r#"{"message": "", "error": "Bad Request"}"#).as_deref(),
            Some("Bad Request")
        );
    }

    #[test]
    fn test_server_message_absent() {
        assert!(server_message("<html>502</html>").is_none());
        assert!(server_message(r#"{"status": 500}"#).is_none());
        assert!(server_message("").is_none());
    }

    #[test]
    fn test_http_config_defaults_disable_timeouts() {
        let config = HttpConfig::default();
        assert_eq!(config.timeout_ms, 0);
        assert_eq!(config.connect_timeout_ms, 0);
    }
}
