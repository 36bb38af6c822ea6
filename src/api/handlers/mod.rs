//! REST endpoint handlers organized by resource.

pub mod channel;
pub mod giveaway;
pub mod participation;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(giveaway::routes())
        .merge(participation::routes())
        .merge(channel::routes())
        .merge(system::routes())
}
