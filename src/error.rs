use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures surfaced by the announcement operations.
///
/// None of these are retried; each one is reported to the caller as-is.
#[derive(Debug, Error)]
pub enum AnnouncementError {
    /// The author is not a registered member.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Announcement not found")]
    NotFound,

    /// The request is well-formed but carries nothing to act on.
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid announcement id: {0}")]
    MalformedIdentifier(String),

    /// The record store or membership registry failed.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl AnnouncementError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::BadRequest(_) | Self::MalformedIdentifier(_) => StatusCode::BAD_REQUEST,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label used for the `outcome` metric dimension.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::NotFound => "not_found",
            Self::BadRequest(_) => "bad_request",
            Self::MalformedIdentifier(_) => "malformed_id",
            Self::Store(_) => "store_error",
        }
    }
}

impl IntoResponse for AnnouncementError {
    fn into_response(self) -> Response {
        if let Self::Store(e) = &self {
            tracing::error!("announcement store failure: {e:#}");
        }
        (
            self.status_code(),
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
