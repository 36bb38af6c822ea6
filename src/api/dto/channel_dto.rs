//! Channel acknowledgement DTOs.

use serde::Serialize;
use utoipa::ToSchema;

/// Response body for `POST /channel/join`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChannelJoinResponse {
    /// Always `true`.
    pub success: bool,
}

/// Response body for `GET /channel/status`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStatusResponse {
    /// Whether the caller's address acknowledged the channel.
    pub has_joined: bool,
}
