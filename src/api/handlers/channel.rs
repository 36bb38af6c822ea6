//! Channel acknowledgement handlers.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::client_addr::ClientAddr;
use crate::api::dto::{ChannelJoinResponse, ChannelStatusResponse};
use crate::app_state::AppState;
use crate::error::LedgerError;

/// `POST /channel/join`: Record that the caller acknowledged the channel.
///
/// # Errors
///
/// Returns [`LedgerError::Persistence`] on store failure.
#[utoipa::path(
    post,
    path = "/api/channel/join",
    tag = "Channel",
    summary = "Acknowledge the channel",
    description = "Records the caller's network address as having joined the external channel. Idempotent.",
    responses(
        (status = 200, description = "Recorded", body = ChannelJoinResponse),
    )
)]
pub async fn mark_channel_joined(
    State(state): State<AppState>,
    ClientAddr(address): ClientAddr,
) -> Result<impl IntoResponse, LedgerError> {
    state.ledger.mark_channel_joined(address).await?;
    Ok(Json(ChannelJoinResponse { success: true }))
}

/// `GET /channel/status`: Whether the caller acknowledged the channel.
///
/// # Errors
///
/// Returns [`LedgerError::Persistence`] on store failure.
#[utoipa::path(
    get,
    path = "/api/channel/status",
    tag = "Channel",
    summary = "Channel acknowledgement status",
    description = "Returns whether the caller's network address has acknowledged the external channel.",
    responses(
        (status = 200, description = "Status", body = ChannelStatusResponse),
    )
)]
pub async fn channel_status(
    State(state): State<AppState>,
    ClientAddr(address): ClientAddr,
) -> Result<impl IntoResponse, LedgerError> {
    let has_joined = state.ledger.has_joined_channel(&address).await?;
    Ok(Json(ChannelStatusResponse { has_joined }))
}

/// Channel routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/channel/join", post(mark_channel_joined))
        .route("/channel/status", get(channel_status))
}
