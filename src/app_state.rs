//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::LedgerConfig;
use crate::persistence::{JsonFileStore, LedgerBackend, MemoryStore};
use crate::service::{LedgerService, OperatorToken};

/// Ledger service over the store chosen at startup.
pub type SharedLedger = Arc<LedgerService<LedgerBackend>>;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Ledger service for all business logic.
    pub ledger: SharedLedger,
    /// Whether the caller address may be taken from `X-Forwarded-For`.
    pub trust_forwarded_for: bool,
}

impl AppState {
    /// Builds the state described by `config`: picks the store, seeds the
    /// RNG and installs the operator token.
    #[must_use]
    pub fn from_config(config: &LedgerConfig) -> Self {
        let backend = if config.persistence_enabled {
            LedgerBackend::JsonFile(JsonFileStore::new(config.data_file.clone()))
        } else {
            LedgerBackend::Memory(MemoryStore::new())
        };
        let rng = config
            .rng_seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let ledger = LedgerService::new(
            backend,
            rng,
            OperatorToken::new(config.operator_token.clone()),
        );
        Self {
            ledger: Arc::new(ledger),
            trust_forwarded_for: config.trust_forwarded_for,
        }
    }
}
