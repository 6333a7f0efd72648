use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::domain::GameError;

/// Unified transport error type that maps to JSON HTTP responses.
///
/// Error format: `{ "error": { "code": "...", "message": "..." } }`.
#[derive(Debug)]
pub enum AppError {
    /// 400 Bad Request
    BadRequest(String),
    /// 404 Not Found
    NotFound(String),
    /// A game rule violation or lookup failure, mapped per kind
    Game(GameError),
    /// 500 Internal Server Error (wraps any error, logs details, returns generic message)
    Internal(anyhow::Error),
}

impl AppError {
    const fn status_for(err: &GameError) -> StatusCode {
        match err {
            GameError::InvalidGameConfiguration(_)
            | GameError::InvalidPointOfInterest(_)
            | GameError::InvalidPosition { .. } => StatusCode::BAD_REQUEST,
            GameError::PlayerNotFound { .. }
            | GameError::GameNotFound(_)
            | GameError::MapNotFound(_)
            | GameError::PoiNotFound(_) => StatusCode::NOT_FOUND,
            GameError::IllegalPhaseTransition { .. }
            | GameError::NoPlayersRegistered(_)
            | GameError::GameNotInWindow(_)
            | GameError::GameNotActive { .. }
            | GameError::DuplicateRegistration { .. } => StatusCode::CONFLICT,
            GameError::InvalidBiteCode => StatusCode::UNPROCESSABLE_ENTITY,
            GameError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            Self::Game(GameError::Storage(err)) => {
                tracing::error!("Storage error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
            Self::Game(err) => (Self::status_for(&err), err.code(), err.to_string()),
            Self::Internal(err) => {
                tracing::error!("Internal server error: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        (
            status,
            Json(json!({
                "error": {
                    "code": code,
                    "message": message,
                }
            })),
        )
            .into_response()
    }
}

impl From<GameError> for AppError {
    fn from(err: GameError) -> Self {
        Self::Game(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}
