//! OpenAPI document for the REST API.

use axum::Router;
use utoipa::OpenApi;

use crate::api::dto::{
    ChannelJoinResponse, ChannelStatusResponse, CreateGiveawayRequest, CreatedGiveawayDto,
    DeleteGiveawayRequest, EndGiveawayRequest, EndGiveawayResponse, GiveawayDto,
    JoinGiveawayRequest, ParticipantDto, ReferralClickDto, TrackReferralRequest,
};
use crate::app_state::AppState;
use crate::error::{ErrorBody, ErrorResponse};

use super::handlers::{channel, giveaway, participation, system};

/// Path the OpenAPI JSON document is served at.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Aggregated OpenAPI description of every endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "giveaway-ledger",
        description = "Time-boxed giveaways with per-address join and referral deduplication, referral leaderboards and random winner draws."
    ),
    paths(
        giveaway::create_giveaway,
        giveaway::list_giveaways,
        giveaway::get_giveaway,
        giveaway::end_giveaway,
        giveaway::delete_giveaway,
        participation::join_giveaway,
        participation::track_referral,
        participation::leaderboard,
        channel::mark_channel_joined,
        channel::channel_status,
        system::health_handler,
    ),
    components(schemas(
        CreateGiveawayRequest,
        CreatedGiveawayDto,
        GiveawayDto,
        EndGiveawayRequest,
        EndGiveawayResponse,
        DeleteGiveawayRequest,
        JoinGiveawayRequest,
        ParticipantDto,
        TrackReferralRequest,
        ReferralClickDto,
        ChannelJoinResponse,
        ChannelStatusResponse,
        ErrorResponse,
        ErrorBody,
    )),
    tags(
        (name = "Giveaways", description = "Giveaway lifecycle"),
        (name = "Participation", description = "Joining, referrals and leaderboard"),
        (name = "Channel", description = "External channel acknowledgement"),
        (name = "System", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Serves the OpenAPI document, plus Swagger UI with the `swagger-ui`
/// feature.
#[cfg(feature = "swagger-ui")]
pub fn docs_router() -> Router<AppState> {
    utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
        .url(OPENAPI_PATH, ApiDoc::openapi())
        .into()
}

/// Serves the OpenAPI document, plus Swagger UI with the `swagger-ui`
/// feature.
#[cfg(not(feature = "swagger-ui"))]
pub fn docs_router() -> Router<AppState> {
    use axum::Json;
    use axum::routing::get;

    Router::new().route(OPENAPI_PATH, get(|| async { Json(ApiDoc::openapi()) }))
}
