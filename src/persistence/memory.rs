//! In-memory ledger store.

use std::sync::Mutex;

use crate::domain::Ledger;
use crate::error::LedgerError;

use super::LedgerStore;

/// Keeps the ledger in process memory. Used when persistence is disabled and
/// in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    ledger: Mutex<Ledger>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `ledger`.
    #[must_use]
    pub fn with_ledger(ledger: Ledger) -> Self {
        Self {
            ledger: Mutex::new(ledger),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Ledger>, LedgerError> {
        self.ledger
            .lock()
            .map_err(|_| LedgerError::Persistence("memory store lock poisoned".to_string()))
    }
}

impl LedgerStore for MemoryStore {
    async fn load(&self) -> Result<Ledger, LedgerError> {
        Ok(self.lock()?.clone())
    }

    async fn save(&self, ledger: &Ledger) -> Result<(), LedgerError> {
        *self.lock()? = ledger.clone();
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::NetworkAddress;

    #[tokio::test]
    async fn fresh_store_loads_empty_ledger() {
        let store = MemoryStore::new();
        let Ok(ledger) = store.load().await else {
            panic!("load failed");
        };
        assert_eq!(ledger, Ledger::new());
    }

    #[tokio::test]
    async fn save_replaces_contents() {
        let store = MemoryStore::new();
        let mut ledger = Ledger::new();
        ledger.mark_channel_joined(NetworkAddress::new("10.0.0.1"));
        assert!(store.save(&ledger).await.is_ok());

        let Ok(loaded) = store.load().await else {
            panic!("load failed");
        };
        assert!(loaded.has_joined_channel(&NetworkAddress::new("10.0.0.1")));
    }
}
