//! Import and export orchestrators.
//!
//! Each service runs one operation at a time; a second request while one is
//! outstanding fails with [`crate::Error::Busy`].

pub mod export;
pub mod import;

pub use export::{ExportService, ExportSummary};
pub use import::{ImportService, ImportSummary};

#[cfg(test)]
pub(crate) mod testing {
    //! In-process [`SetsApi`] double shared by the service tests.

    use crate::api::SetsApi;
    use crate::io::Format;
    use crate::models::{ImportPayload, ImportResponse, ServerSet, SetId};
    use crate::{Error, Result};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Records submissions and answers from canned results.
    #[derive(Default)]
    pub struct FakeApi {
        pub submitted: Mutex<Vec<ImportPayload>>,
        pub export_requests: Mutex<Vec<(SetId, Format)>>,
        pub reject_import: Option<String>,
        pub export_body: Option<String>,
        pub delay: Option<Duration>,
    }

    impl FakeApi {
        pub fn rejecting(message: &str) -> Self {
            Self {
                reject_import: Some(message.to_string()),
                ..Self::default()
            }
        }

        pub fn exporting(body: &str) -> Self {
            Self {
                export_body: Some(body.to_string()),
                ..Self::default()
            }
        }

        pub fn submissions(&self) -> Vec<ImportPayload> {
            self.submitted.lock().unwrap().clone()
        }
    }

    impl SetsApi for FakeApi {
        fn name(&self) -> &'static str {
            "fake"
        }

        async fn import_set(&self, payload: &ImportPayload) -> Result<ImportResponse> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.submitted.lock().unwrap().push(payload.clone());
            if let Some(message) = &self.reject_import {
                return Err(Error::ImportFailed(message.clone()));
            }
            Ok(ImportResponse {
                set: ServerSet {
                    id: SetId::from("42"),
                    descriptor: payload.set.clone(),
                },
                flashcards: payload
                    .flashcards
                    .iter()
                    .map(|c| serde_json::json!({ "content": c.content }))
                    .collect(),
            })
        }

        async fn export_set(&self, id: &SetId, format: Format) -> Result<String> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.export_requests
                .lock()
                .unwrap()
                .push((id.clone(), format));
            self.export_body
                .clone()
                .ok_or_else(|| Error::ExportFailed("Set not found".to_string()))
        }
    }
}
