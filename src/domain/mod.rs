//! Domain layer: identifiers, records and the giveaway ledger.
//!
//! This module contains the persisted data model (giveaways, participants,
//! referral clicks, channel acknowledgements) and [`Ledger`], whose methods
//! implement every state transition. Nothing here performs I/O.

pub mod address;
pub mod giveaway;
pub mod ids;
pub mod ledger;
pub mod referral;

pub use address::NetworkAddress;
pub use giveaway::{Giveaway, NewGiveaway, NewParticipant, Participant};
pub use ids::{CreatorId, GiveawayId, ParticipantId, ReferralId};
pub use ledger::{DeletedGiveaway, LEADERBOARD_SIZE, Ledger};
pub use referral::{ReferralClick, ReferrerRef};
