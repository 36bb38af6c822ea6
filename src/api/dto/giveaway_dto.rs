//! Giveaway DTOs for create, get, list, end and delete.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::participant_dto::ParticipantDto;
use crate::domain::{CreatorId, Giveaway, GiveawayId};

/// Request body for `POST /giveaways`.
///
/// Every field defaults to empty so that a missing field surfaces as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateGiveawayRequest {
    /// Giveaway title.
    pub title: String,
    /// Display name of the host.
    pub host_name: String,
    /// Link to the host's external channel.
    pub channel_url: String,
    /// RFC 3339 end timestamp (e.g. `2026-10-20T18:00:00Z`).
    pub end_date: Option<String>,
}

/// Public view of a giveaway. Never includes the creator id.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GiveawayDto {
    /// Giveaway identifier.
    pub id: GiveawayId,
    /// Giveaway title.
    pub title: String,
    /// Display name of the host.
    pub host_name: String,
    /// Link to the host's external channel.
    pub channel_url: String,
    /// Scheduled end.
    pub end_date: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Participants in join order.
    pub participants: Vec<ParticipantDto>,
    /// Drawn winner, once ended.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<ParticipantDto>,
    /// `false` once the giveaway has ended.
    pub is_active: bool,
}

impl From<&Giveaway> for GiveawayDto {
    fn from(giveaway: &Giveaway) -> Self {
        Self {
            id: giveaway.id,
            title: giveaway.title.clone(),
            host_name: giveaway.host_name.clone(),
            channel_url: giveaway.channel_url.clone(),
            end_date: giveaway.end_date,
            created_at: giveaway.created_at,
            participants: giveaway.participants.iter().map(ParticipantDto::from).collect(),
            winner: giveaway.winner.as_ref().map(ParticipantDto::from),
            is_active: giveaway.is_active,
        }
    }
}

/// Response body for `POST /giveaways` (201 Created).
///
/// The only response that carries the creator id.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedGiveawayDto {
    /// The new giveaway.
    #[serde(flatten)]
    pub giveaway: GiveawayDto,
    /// Delete secret; keep it to delete the giveaway later.
    pub creator_id: CreatorId,
}

impl From<&Giveaway> for CreatedGiveawayDto {
    fn from(giveaway: &Giveaway) -> Self {
        Self {
            giveaway: GiveawayDto::from(giveaway),
            creator_id: giveaway.creator_id,
        }
    }
}

/// Request body for `POST /giveaways/:id/end`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct EndGiveawayRequest {
    /// Operator token.
    pub token: String,
}

/// Response body for `POST /giveaways/:id/end`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EndGiveawayResponse {
    /// The drawn winner.
    pub winner: ParticipantDto,
}

/// Request body for `DELETE /giveaways/:id`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct DeleteGiveawayRequest {
    /// Creator id returned when the giveaway was created.
    pub creator_id: Option<CreatorId>,
    /// Operator token.
    pub token: String,
}
