//! # giveaway-ledger
//!
//! REST service for time-boxed giveaways with referral tracking.
//!
//! Participants join a giveaway once per network address and receive a
//! referral link; each distinct visiting address credits at most one
//! referrer per giveaway; a winner is drawn uniformly at random when the
//! operator ends the giveaway.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── LedgerService (service/)   one mutex: load → apply → save
//!     │
//!     ├── Ledger (domain/)           pure state transitions
//!     │
//!     └── LedgerStore (persistence/) JSON file or memory
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
