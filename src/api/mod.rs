//! REST API layer: route handlers, DTOs, and router composition.
//!
//! All endpoints are mounted under `/api`; the OpenAPI document is served
//! at [`openapi::OPENAPI_PATH`].

pub mod client_addr;
pub mod dto;
pub mod handlers;
pub mod openapi;

use std::time::Duration;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api", handlers::routes())
        .merge(openapi::docs_router())
}

/// Builds the servable application: routes, middleware and state.
///
/// Serve it with `into_make_service_with_connect_info::<SocketAddr>()` so
/// that the peer address is available to [`client_addr::ClientAddr`].
pub fn build_app(state: AppState, request_timeout: Duration) -> Router {
    build_router()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(request_timeout))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
