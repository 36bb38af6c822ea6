//! Data Transfer Objects for REST request/response serialization.
//!
//! Field names are camelCase on the wire. Response DTOs omit participant
//! addresses, and only [`CreatedGiveawayDto`] carries the creator id.

pub mod channel_dto;
pub mod giveaway_dto;
pub mod participant_dto;

pub use channel_dto::*;
pub use giveaway_dto::*;
pub use participant_dto::*;
