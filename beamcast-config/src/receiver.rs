//! Persisted cast receiver selection.
//!
//! The sender launches a specific receiver application on the cast
//! device. Users can point the app at a development receiver; that
//! choice is remembered in a small JSON file under the user config
//! dir. Without a stored choice the production receiver is used.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Receiver application launched when nothing else was configured.
pub const DEFAULT_RECEIVER_APP_ID: &str = "88E92036";

const STORE_FILE: &str = "receiver.json";

/// The store could not be written.
#[derive(Debug, Error)]
pub enum ReceiverStoreError {
    /// No user config directory is available on this platform.
    #[error("no user config directory available")]
    NoConfigDir,
    /// Writing the store file failed.
    #[error("failed to persist receiver id to {path}")]
    Write {
        /// File that failed to write.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredReceiver {
    receiver_app_id: Option<String>,
}

/// Loads and persists the selected receiver application id.
#[derive(Debug, Clone)]
pub struct ReceiverIdStore {
    path: Option<PathBuf>,
}

impl ReceiverIdStore {
    /// Store under the default per-user location.
    pub fn new() -> Self {
        Self {
            path: dirs::config_dir().map(|d| d.join("beamcast").join(STORE_FILE)),
        }
    }

    /// Store under an explicit file path. Used by tests.
    pub fn at(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    /// The receiver application id to launch. Falls back to
    /// [`DEFAULT_RECEIVER_APP_ID`] when nothing is stored or the
    /// store cannot be read.
    pub fn receiver_app_id(&self) -> String {
        self.stored()
            .unwrap_or_else(|| DEFAULT_RECEIVER_APP_ID.to_string())
    }

    /// Persists a new receiver application id, or clears the stored
    /// choice when `id` is `None`.
    pub fn store(&self, id: Option<&str>) -> Result<(), ReceiverStoreError> {
        let path = self.path.as_ref().ok_or(ReceiverStoreError::NoConfigDir)?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| {
                ReceiverStoreError::Write { path: path.clone(), source }
            })?;
        }
        let stored = StoredReceiver {
            receiver_app_id: id.map(str::to_string),
        };
        let raw = serde_json::to_string_pretty(&stored)
            .unwrap_or_else(|_| String::from("{}"));
        std::fs::write(path, raw).map_err(|source| ReceiverStoreError::Write {
            path: path.clone(),
            source,
        })
    }

    fn stored(&self) -> Option<String> {
        let path = self.path.as_ref()?;
        let raw = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str::<StoredReceiver>(&raw) {
            Ok(stored) => stored.receiver_app_id.filter(|id| !id.is_empty()),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring corrupt receiver store");
                None
            }
        }
    }
}

impl Default for ReceiverIdStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_stored_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = ReceiverIdStore::at(dir.path().join("receiver.json"));
        assert_eq!(store.receiver_app_id(), DEFAULT_RECEIVER_APP_ID);

        store.store(Some("DEADBEEF")).unwrap();
        assert_eq!(store.receiver_app_id(), "DEADBEEF");

        store.store(None).unwrap();
        assert_eq!(store.receiver_app_id(), DEFAULT_RECEIVER_APP_ID);
    }

    #[test]
    fn corrupt_store_falls_back_to_the_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receiver.json");
        std::fs::write(&path, "{{{").unwrap();
        let store = ReceiverIdStore::at(path);
        assert_eq!(store.receiver_app_id(), DEFAULT_RECEIVER_APP_ID);
    }
}
