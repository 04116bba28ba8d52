//! Local collection of sets known to the client.

use crate::models::{ServerSet, SetId};
use crate::{Error, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Sets returned by the backend, in import order.
///
/// Cheap to clone; clones share the same collection. The store is only
/// mutated after a backend call has succeeded.
#[derive(Debug, Clone, Default)]
pub struct SetStore {
    sets: Arc<RwLock<Vec<ServerSet>>>,
}

impl SetStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given sets.
    #[must_use]
    pub fn with_sets(sets: Vec<ServerSet>) -> Self {
        Self {
            sets: Arc::new(RwLock::new(sets)),
        }
    }

    /// Appends a set returned by the backend.
    pub async fn append(&self, set: ServerSet) {
        self.sets.write().await.push(set);
    }

    /// Returns the name of the set with the given id, if known locally.
    pub async fn find_name(&self, id: &SetId) -> Option<String> {
        self.sets
            .read()
            .await
            .iter()
            .find(|set| &set.id == id)
            .map(|set| set.name().to_string())
    }

    /// Returns a snapshot of all sets.
    pub async fn all(&self) -> Vec<ServerSet> {
        self.sets.read().await.clone()
    }

    /// Returns the number of sets.
    pub async fn len(&self) -> usize {
        self.sets.read().await.len()
    }

    /// Returns whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.sets.read().await.is_empty()
    }

    /// Loads a store from a JSON file.
    ///
    /// A missing file yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No local set state yet");
                return Ok(Self::new());
            },
            Err(e) => {
                return Err(Error::OperationFailed {
                    operation: "load_sets".to_string(),
                    cause: format!("{}: {e}", path.display()),
                });
            },
        };

        let sets: Vec<ServerSet> =
            serde_json::from_str(&content).map_err(|e| Error::OperationFailed {
                operation: "load_sets".to_string(),
                cause: format!("{}: {e}", path.display()),
            })?;

        tracing::debug!(path = %path.display(), count = sets.len(), "Loaded local set state");
        Ok(Self::with_sets(sets))
    }

    /// Writes the store to a JSON file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn save_to_file(&self, path: &Path) -> Result<()> {
        let op_err = |cause: String| Error::OperationFailed {
            operation: "save_sets".to_string(),
            cause,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| op_err(format!("{}: {e}", parent.display())))?;
        }

        let json = serde_json::to_string_pretty(&*self.sets.read().await)
            .map_err(|e| op_err(e.to_string()))?;
        tokio::fs::write(path, json)
            .await
            .map_err(|e| op_err(format!("{}: {e}", path.display())))
    }
}
