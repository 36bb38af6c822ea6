//! Participant and referral DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    GiveawayId, Participant, ParticipantId, ReferralClick, ReferralId, ReferrerRef,
};

/// Public view of a participant. The join address is never exposed.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    /// Participant identifier, used in referral links.
    pub id: ParticipantId,
    /// Display name.
    pub name: String,
    /// Avatar reference.
    pub avatar: String,
    /// Join timestamp.
    pub joined_at: DateTime<Utc>,
    /// Referral count.
    pub referrals: u32,
}

impl From<&Participant> for ParticipantDto {
    fn from(p: &Participant) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            avatar: p.avatar.clone(),
            joined_at: p.joined_at,
            referrals: p.referrals,
        }
    }
}

/// Request body for `POST /giveaways/:id/join`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct JoinGiveawayRequest {
    /// Display name.
    pub name: String,
    /// Optional avatar reference; a pool avatar is assigned when omitted.
    pub avatar: Option<String>,
}

/// Request body for `POST /giveaways/:id/referral`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackReferralRequest {
    /// Referrer named by the followed link. Values that are not a
    /// participant id are recorded without credit.
    pub referrer_id: Option<String>,
}

/// Response body for `POST /giveaways/:id/referral`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReferralClickDto {
    /// Click identifier.
    pub id: ReferralId,
    /// Giveaway the click targeted.
    pub giveaway_id: GiveawayId,
    /// Referrer named by the link, as supplied.
    pub referrer_id: ReferrerRef,
    /// Click timestamp.
    pub timestamp: DateTime<Utc>,
    /// Always `true` for recorded clicks.
    pub is_valid: bool,
}

impl From<&ReferralClick> for ReferralClickDto {
    fn from(click: &ReferralClick) -> Self {
        Self {
            id: click.id,
            giveaway_id: click.giveaway_id,
            referrer_id: click.referrer_id.clone(),
            timestamp: click.timestamp,
            is_valid: click.is_valid,
        }
    }
}
