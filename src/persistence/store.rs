//! The load/save seam between the ledger service and its storage.

use std::future::Future;

use crate::domain::Ledger;
use crate::error::LedgerError;

use super::json_file::JsonFileStore;
use super::memory::MemoryStore;

/// Whole-ledger storage.
///
/// Implementations load and save the complete [`Ledger`] as one unit. They
/// are not required to be safe under concurrent load/modify/save cycles;
/// [`crate::service::LedgerService`] serializes all access.
pub trait LedgerStore: Send + Sync {
    /// Loads the current ledger. A store that has never been written yields
    /// an empty ledger.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Persistence`] if the backing storage cannot be
    /// read or decoded.
    fn load(&self) -> impl Future<Output = Result<Ledger, LedgerError>> + Send;

    /// Replaces the stored ledger with `ledger`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Persistence`] if the backing storage cannot be
    /// written.
    fn save(&self, ledger: &Ledger) -> impl Future<Output = Result<(), LedgerError>> + Send;
}

/// Store selected at startup from configuration.
#[derive(Debug)]
pub enum LedgerBackend {
    /// Volatile in-process store.
    Memory(MemoryStore),
    /// JSON document on disk.
    JsonFile(JsonFileStore),
}

impl LedgerStore for LedgerBackend {
    async fn load(&self) -> Result<Ledger, LedgerError> {
        match self {
            Self::Memory(store) => store.load().await,
            Self::JsonFile(store) => store.load().await,
        }
    }

    async fn save(&self, ledger: &Ledger) -> Result<(), LedgerError> {
        match self {
            Self::Memory(store) => store.save(ledger).await,
            Self::JsonFile(store) => store.save(ledger).await,
        }
    }
}
