//! Service layer: ledger operation orchestration.
//!
//! [`LedgerService`] serializes every operation over the injected
//! [`crate::persistence::LedgerStore`], checks the [`OperatorToken`] for
//! privileged calls and logs each state transition.

pub mod credential;
pub mod ledger_service;

pub use credential::OperatorToken;
pub use ledger_service::LedgerService;
