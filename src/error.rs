//! Ledger error types with HTTP status code mapping.
//!
//! [`LedgerError`] is the single error type of the crate. Each variant maps
//! to an [`ErrorKind`], a numeric code and an HTTP status, and renders as a
//! structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::GiveawayId;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2201,
///     "message": "already joined this giveaway from this address"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see the table on [`LedgerError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
}

/// Coarse classification of a [`LedgerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required field is missing or malformed.
    Validation,
    /// The referenced giveaway does not exist.
    NotFound,
    /// The giveaway is in the wrong lifecycle state for the operation.
    State,
    /// The caller's address already performed this action.
    Duplicate,
    /// Operator credential or creator identifier mismatch.
    Auth,
    /// The ledger store could not be read or written.
    Storage,
}

/// Error returned by every ledger operation.
///
/// # Error Code Ranges
///
/// | Range     | Category   | HTTP Status               |
/// |-----------|------------|---------------------------|
/// | 1000–1999 | Validation | 400 Bad Request           |
/// | 2000–2099 | Not Found  | 404 Not Found             |
/// | 2100–2199 | State      | 409 Conflict              |
/// | 2200–2299 | Duplicate  | 409 Conflict              |
/// | 3000–3999 | Storage    | 500 Internal Server Error |
/// | 4000–4999 | Auth       | 403 Forbidden             |
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Giveaway with the given ID was not found.
    #[error("giveaway not found: {0}")]
    GiveawayNotFound(GiveawayId),

    /// The giveaway has already ended.
    #[error("giveaway {0} is no longer active")]
    GiveawayInactive(GiveawayId),

    /// A winner cannot be drawn from an empty participant list.
    #[error("giveaway {0} has no participants")]
    NoParticipants(GiveawayId),

    /// A participant from the same address already joined.
    #[error("already joined this giveaway from this address")]
    DuplicateJoin,

    /// A referral click from the same address was already tracked.
    #[error("referral already tracked for this address")]
    DuplicateReferral,

    /// The operator credential did not match.
    #[error("invalid operator token")]
    InvalidCredential,

    /// The creator identifier did not match the giveaway.
    #[error("creator id does not match giveaway {0}")]
    CreatorMismatch(GiveawayId),

    /// The ledger store failed to load or save.
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl LedgerError {
    /// Returns the coarse classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRequest(_) => ErrorKind::Validation,
            Self::GiveawayNotFound(_) => ErrorKind::NotFound,
            Self::GiveawayInactive(_) | Self::NoParticipants(_) => ErrorKind::State,
            Self::DuplicateJoin | Self::DuplicateReferral => ErrorKind::Duplicate,
            Self::InvalidCredential | Self::CreatorMismatch(_) => ErrorKind::Auth,
            Self::Persistence(_) => ErrorKind::Storage,
        }
    }

    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::GiveawayNotFound(_) => 2001,
            Self::GiveawayInactive(_) => 2101,
            Self::NoParticipants(_) => 2102,
            Self::DuplicateJoin => 2201,
            Self::DuplicateReferral => 2202,
            Self::Persistence(_) => 3001,
            Self::InvalidCredential => 4001,
            Self::CreatorMismatch(_) => 4002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::State | ErrorKind::Duplicate => StatusCode::CONFLICT,
            ErrorKind::Auth => StatusCode::FORBIDDEN,
            ErrorKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
