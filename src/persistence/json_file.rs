//! JSON-file ledger store.
//!
//! The whole ledger is one pretty-printed JSON document. Saves write a
//! sibling temporary file and rename it over the target, so a crash mid-write
//! leaves the previous document intact.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::Ledger;
use crate::error::LedgerError;

use super::LedgerStore;

/// Persists the ledger as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by the file at `path`. The file and its parent
    /// directories are created on first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "ledger.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn io_error(action: &str, path: &Path, err: &std::io::Error) -> LedgerError {
    LedgerError::Persistence(format!("failed to {action} {}: {err}", path.display()))
}

impl LedgerStore for JsonFileStore {
    async fn load(&self) -> Result<Ledger, LedgerError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "ledger file missing, starting empty");
                return Ok(Ledger::new());
            }
            Err(err) => return Err(io_error("read", &self.path, &err)),
        };
        serde_json::from_slice(&bytes).map_err(|e| {
            LedgerError::Persistence(format!("corrupt ledger file {}: {e}", self.path.display()))
        })
    }

    async fn save(&self, ledger: &Ledger) -> Result<(), LedgerError> {
        let json = serde_json::to_vec_pretty(ledger)
            .map_err(|e| LedgerError::Persistence(format!("failed to encode ledger: {e}")))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error("create directory", parent, &e))?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, &json)
            .await
            .map_err(|e| io_error("write", &temp, &e))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| io_error("replace", &self.path, &e))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{NetworkAddress, NewGiveaway};
    use crate::error::ErrorKind as LedgerErrorKind;
    use chrono::Utc;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn temp_dir() -> tempfile::TempDir {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        dir
    }

    #[tokio::test]
    async fn missing_file_loads_empty_ledger() {
        let dir = temp_dir();
        let store = JsonFileStore::new(dir.path().join("absent.json"));
        let Ok(ledger) = store.load().await else {
            panic!("load failed");
        };
        assert_eq!(ledger, Ledger::new());
    }

    #[tokio::test]
    async fn save_then_load_round_trips_and_creates_parents() {
        let dir = temp_dir();
        let store = JsonFileStore::new(dir.path().join("nested/data/ledger.json"));

        let mut rng = StdRng::seed_from_u64(3);
        let mut ledger = Ledger::new();
        let created = ledger.create_giveaway(
            NewGiveaway {
                title: "Prize".to_string(),
                host_name: "Host".to_string(),
                channel_url: "https://t.me/host".to_string(),
                end_date: Utc::now(),
            },
            Utc::now(),
            &mut rng,
        );
        assert!(created.is_ok());
        ledger.mark_channel_joined(NetworkAddress::new("10.0.0.1"));

        assert!(store.save(&ledger).await.is_ok());
        assert!(store.path().exists());
        assert!(!store.temp_path().exists());

        let Ok(loaded) = store.load().await else {
            panic!("load failed");
        };
        assert_eq!(loaded, ledger);
    }

    #[tokio::test]
    async fn corrupt_file_is_a_storage_error() {
        let dir = temp_dir();
        let path = dir.path().join("ledger.json");
        assert!(tokio::fs::write(&path, b"{ not json").await.is_ok());

        let store = JsonFileStore::new(path);
        let Err(err) = store.load().await else {
            panic!("expected error");
        };
        assert_eq!(err.kind(), LedgerErrorKind::Storage);
    }

    #[tokio::test]
    async fn reads_document_with_missing_collections() {
        let dir = temp_dir();
        let path = dir.path().join("ledger.json");
        assert!(tokio::fs::write(&path, br#"{"giveaways": []}"#).await.is_ok());

        let store = JsonFileStore::new(path);
        let Ok(ledger) = store.load().await else {
            panic!("load failed");
        };
        assert!(ledger.referral_clicks().is_empty());
    }
}
