//! Giveaway lifecycle handlers: create, list, get, end, delete.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};

use crate::api::dto::{
    CreateGiveawayRequest, CreatedGiveawayDto, DeleteGiveawayRequest, EndGiveawayRequest,
    EndGiveawayResponse, GiveawayDto, ParticipantDto,
};
use crate::app_state::AppState;
use crate::domain::{GiveawayId, NewGiveaway};
use crate::error::{ErrorResponse, LedgerError};

/// `POST /giveaways`: Create a new giveaway.
///
/// # Errors
///
/// Returns [`LedgerError::InvalidRequest`] on missing fields or an
/// unparsable end date.
#[utoipa::path(
    post,
    path = "/api/giveaways",
    tag = "Giveaways",
    summary = "Create a giveaway",
    description = "Creates an active giveaway with no participants. The response is the only place the creator id is returned; it is needed to delete the giveaway.",
    request_body = CreateGiveawayRequest,
    responses(
        (status = 201, description = "Giveaway created", body = CreatedGiveawayDto),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
    )
)]
pub async fn create_giveaway(
    State(state): State<AppState>,
    Json(req): Json<CreateGiveawayRequest>,
) -> Result<impl IntoResponse, LedgerError> {
    let end_date = parse_end_date(req.end_date.as_deref())?;
    let giveaway = state
        .ledger
        .create_giveaway(NewGiveaway {
            title: req.title,
            host_name: req.host_name,
            channel_url: req.channel_url,
            end_date,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedGiveawayDto::from(&giveaway))))
}

/// `GET /giveaways`: List all giveaways.
///
/// # Errors
///
/// Returns [`LedgerError::Persistence`] if the store cannot be read.
#[utoipa::path(
    get,
    path = "/api/giveaways",
    tag = "Giveaways",
    summary = "List giveaways",
    description = "Returns every giveaway in creation order.",
    responses(
        (status = 200, description = "All giveaways", body = Vec<GiveawayDto>),
    )
)]
pub async fn list_giveaways(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, LedgerError> {
    let giveaways = state.ledger.list_giveaways().await?;
    let data: Vec<GiveawayDto> = giveaways.iter().map(GiveawayDto::from).collect();
    Ok(Json(data))
}

/// `GET /giveaways/:id`: Get one giveaway.
///
/// # Errors
///
/// Returns [`LedgerError::GiveawayNotFound`] if the giveaway does not exist.
#[utoipa::path(
    get,
    path = "/api/giveaways/{id}",
    tag = "Giveaways",
    summary = "Get a giveaway",
    description = "Returns a giveaway with its participants and, once ended, its winner.",
    params(
        ("id" = uuid::Uuid, Path, description = "Giveaway UUID"),
    ),
    responses(
        (status = 200, description = "Giveaway details", body = GiveawayDto),
        (status = 404, description = "Giveaway not found", body = ErrorResponse),
    )
)]
pub async fn get_giveaway(
    State(state): State<AppState>,
    Path(id): Path<GiveawayId>,
) -> Result<impl IntoResponse, LedgerError> {
    let giveaway = state.ledger.get_giveaway(id).await?;
    Ok(Json(GiveawayDto::from(&giveaway)))
}

/// `POST /giveaways/:id/end`: End a giveaway and draw the winner.
///
/// # Errors
///
/// Returns [`LedgerError`] on a wrong token, a missing or ended giveaway, or
/// an empty participant list.
#[utoipa::path(
    post,
    path = "/api/giveaways/{id}/end",
    tag = "Giveaways",
    summary = "End a giveaway",
    description = "Draws a winner uniformly at random from the participants and closes the giveaway. Requires the operator token. Fails if the giveaway already ended.",
    params(
        ("id" = uuid::Uuid, Path, description = "Giveaway UUID"),
    ),
    request_body = EndGiveawayRequest,
    responses(
        (status = 200, description = "Winner drawn", body = EndGiveawayResponse),
        (status = 403, description = "Invalid operator token", body = ErrorResponse),
        (status = 404, description = "Giveaway not found", body = ErrorResponse),
        (status = 409, description = "Giveaway already ended or has no participants", body = ErrorResponse),
    )
)]
pub async fn end_giveaway(
    State(state): State<AppState>,
    Path(id): Path<GiveawayId>,
    Json(req): Json<EndGiveawayRequest>,
) -> Result<impl IntoResponse, LedgerError> {
    let winner = state.ledger.end_giveaway(id, &req.token).await?;
    Ok(Json(EndGiveawayResponse {
        winner: ParticipantDto::from(&winner),
    }))
}

/// `DELETE /giveaways/:id`: Delete a giveaway.
///
/// # Errors
///
/// Returns [`LedgerError`] on a wrong token or creator id, or if the
/// giveaway does not exist.
#[utoipa::path(
    delete,
    path = "/api/giveaways/{id}",
    tag = "Giveaways",
    summary = "Delete a giveaway",
    description = "Removes the giveaway and all its referral clicks. Requires both the operator token and the creator id returned at creation.",
    params(
        ("id" = uuid::Uuid, Path, description = "Giveaway UUID"),
    ),
    request_body = DeleteGiveawayRequest,
    responses(
        (status = 204, description = "Giveaway deleted"),
        (status = 400, description = "Missing creator id", body = ErrorResponse),
        (status = 403, description = "Invalid token or creator id", body = ErrorResponse),
        (status = 404, description = "Giveaway not found", body = ErrorResponse),
    )
)]
pub async fn delete_giveaway(
    State(state): State<AppState>,
    Path(id): Path<GiveawayId>,
    Json(req): Json<DeleteGiveawayRequest>,
) -> Result<impl IntoResponse, LedgerError> {
    let creator_id = req
        .creator_id
        .ok_or_else(|| LedgerError::InvalidRequest("creatorId is required".to_string()))?;
    state
        .ledger
        .delete_giveaway(id, creator_id, &req.token)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Giveaway lifecycle routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/giveaways", post(create_giveaway).get(list_giveaways))
        .route("/giveaways/{id}", get(get_giveaway).delete(delete_giveaway))
        .route("/giveaways/{id}/end", post(end_giveaway))
}

/// Parses the required RFC 3339 end date into UTC.
fn parse_end_date(raw: Option<&str>) -> Result<DateTime<Utc>, LedgerError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| LedgerError::InvalidRequest("endDate is required".to_string()))?;
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| LedgerError::InvalidRequest(format!("invalid endDate {raw:?}: {e}")))
}
