//! Persistence layer: whole-ledger load/save stores.
//!
//! [`LedgerStore`] is the seam the service depends on. [`MemoryStore`]
//! backs tests and ephemeral runs; [`JsonFileStore`] keeps the ledger in a
//! single JSON document. [`LedgerBackend`] picks one at startup.

pub mod json_file;
pub mod memory;
pub mod store;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use store::{LedgerBackend, LedgerStore};
