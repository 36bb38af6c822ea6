//! Participation handlers: join, referral tracking, leaderboard.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::client_addr::ClientAddr;
use crate::api::dto::{JoinGiveawayRequest, ParticipantDto, ReferralClickDto, TrackReferralRequest};
use crate::app_state::AppState;
use crate::domain::{GiveawayId, NewParticipant, ReferrerRef};
use crate::error::{ErrorResponse, LedgerError};

/// `POST /giveaways/:id/join`: Join a giveaway.
///
/// # Errors
///
/// Returns [`LedgerError`] on a blank name, a missing or ended giveaway, or
/// a second join from the same address.
#[utoipa::path(
    post,
    path = "/api/giveaways/{id}/join",
    tag = "Participation",
    summary = "Join a giveaway",
    description = "Adds the caller as a participant. One join per network address per giveaway; the address is taken from the connection, not the body.",
    params(
        ("id" = uuid::Uuid, Path, description = "Giveaway UUID"),
    ),
    request_body = JoinGiveawayRequest,
    responses(
        (status = 200, description = "Joined", body = ParticipantDto),
        (status = 400, description = "Missing name", body = ErrorResponse),
        (status = 404, description = "Giveaway not found", body = ErrorResponse),
        (status = 409, description = "Giveaway ended or address already joined", body = ErrorResponse),
    )
)]
pub async fn join_giveaway(
    State(state): State<AppState>,
    Path(id): Path<GiveawayId>,
    ClientAddr(address): ClientAddr,
    Json(req): Json<JoinGiveawayRequest>,
) -> Result<impl IntoResponse, LedgerError> {
    let participant = state
        .ledger
        .join(
            id,
            NewParticipant {
                name: req.name,
                avatar: req.avatar,
            },
            address,
        )
        .await?;
    Ok(Json(ParticipantDto::from(&participant)))
}

/// `POST /giveaways/:id/referral`: Track a referral click.
///
/// # Errors
///
/// Returns [`LedgerError`] on a missing referrer id, a missing or ended
/// giveaway, or a repeat click from the same address.
#[utoipa::path(
    post,
    path = "/api/giveaways/{id}/referral",
    tag = "Participation",
    summary = "Track a referral click",
    description = "Credits the referrer with one referral. Each network address can credit at most one referral per giveaway. A referrer id that names no participant is recorded without credit.",
    params(
        ("id" = uuid::Uuid, Path, description = "Giveaway UUID"),
    ),
    request_body = TrackReferralRequest,
    responses(
        (status = 200, description = "Referral recorded", body = ReferralClickDto),
        (status = 400, description = "Missing referrer id", body = ErrorResponse),
        (status = 404, description = "Giveaway not found", body = ErrorResponse),
        (status = 409, description = "Giveaway ended or referral already tracked", body = ErrorResponse),
    )
)]
pub async fn track_referral(
    State(state): State<AppState>,
    Path(id): Path<GiveawayId>,
    ClientAddr(address): ClientAddr,
    Json(req): Json<TrackReferralRequest>,
) -> Result<impl IntoResponse, LedgerError> {
    let referrer = ReferrerRef::new(req.referrer_id.unwrap_or_default());
    let click = state.ledger.refer(id, referrer, address).await?;
    Ok(Json(ReferralClickDto::from(&click)))
}

/// `GET /giveaways/:id/leaderboard`: Top referrers.
///
/// # Errors
///
/// Returns [`LedgerError::GiveawayNotFound`] if the giveaway does not exist.
#[utoipa::path(
    get,
    path = "/api/giveaways/{id}/leaderboard",
    tag = "Participation",
    summary = "Referral leaderboard",
    description = "Returns up to 10 participants ordered by referral count, ties in join order.",
    params(
        ("id" = uuid::Uuid, Path, description = "Giveaway UUID"),
    ),
    responses(
        (status = 200, description = "Ranked participants", body = Vec<ParticipantDto>),
        (status = 404, description = "Giveaway not found", body = ErrorResponse),
    )
)]
pub async fn leaderboard(
    State(state): State<AppState>,
    Path(id): Path<GiveawayId>,
) -> Result<impl IntoResponse, LedgerError> {
    let ranked = state.ledger.leaderboard(id).await?;
    let data: Vec<ParticipantDto> = ranked.iter().map(ParticipantDto::from).collect();
    Ok(Json(data))
}

/// Participation routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/giveaways/{id}/join", post(join_giveaway))
        .route("/giveaways/{id}/referral", post(track_referral))
        .route("/giveaways/{id}/leaderboard", get(leaderboard))
}
