//! `reqwest` implementation of the sets backend.

use super::{HttpConfig, SetsApi, build_http_client, server_message};
use crate::config::ApiConfig;
use crate::io::Format;
use crate::models::{ImportPayload, ImportResponse, SetId};
use crate::{Error, Result};
use secrecy::{ExposeSecret, SecretString};

/// Sets backend reached over HTTP with bearer authentication.
pub struct HttpSetsApi {
    /// Base URL, without trailing slash.
    base_url: String,
    /// Bearer token.
    token: Option<SecretString>,
    /// HTTP client.
    client: reqwest::Client,
}

impl HttpSetsApi {
    /// Default backend URL.
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8080";

    /// Creates a client for the given base URL with no token.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            client: build_http_client(HttpConfig::default()),
        }
    }

    /// Creates a client from the `[api]` configuration section.
    #[must_use]
    pub fn from_config(config: &ApiConfig) -> Self {
        let mut api = Self::new(config.base_url.clone()).with_http_config(config.http);
        if let Some(token) = &config.token {
            api = api.with_token(token.expose_secret());
        }
        api
    }

    /// Sets the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    /// Sets HTTP client timeouts.
    #[must_use]
    pub fn with_http_config(mut self, config: HttpConfig) -> Self {
        self.client = build_http_client(config);
        self
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn import_url(&self) -> String {
        format!("{}/api/sets/import", self.base_url)
    }

    fn export_url(&self, id: &SetId) -> String {
        format!("{}/api/sets/{id}/export", self.base_url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }
}

impl SetsApi for HttpSetsApi {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn import_set(&self, payload: &ImportPayload) -> Result<ImportResponse> {
        let response = self
            .authorize(self.client.post(self.import_url()))
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    is_timeout = e.is_timeout(),
                    is_connect = e.is_connect(),
                    "Import request failed"
                );
                Error::ImportFailed(format!("network error: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %body, "Import rejected by backend");
            let message =
                server_message(&body).unwrap_or_else(|| format!("backend returned {status}"));
            return Err(Error::ImportFailed(message));
        }

        response.json::<ImportResponse>().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse import response");
            Error::ImportFailed(format!("unexpected response: {e}"))
        })
    }

    async fn export_set(&self, id: &SetId, format: Format) -> Result<String> {
        let response = self
            .authorize(self.client.get(self.export_url(id)))
            .query(&[("format", format.extension())])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    set_id = %id,
                    error = %e,
                    is_timeout = e.is_timeout(),
                    is_connect = e.is_connect(),
                    "Export request failed"
                );
                Error::ExportFailed(format!("network error: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(set_id = %id, status = %status, "Export rejected by backend");
            let message =
                server_message(&body).unwrap_or_else(|| format!("backend returned {status}"));
            return Err(Error::ExportFailed(message));
        }

        response
            .text()
            .await
            .map_err(|e| Error::ExportFailed(format!("failed to read response body: {e}")))
    }
}
