//! Mapping of service failures onto HTTP responses.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use derive_more::{Display, Error};
use serde::Serialize;
use tracing::{error, warn};

use crate::ServiceError;

/// Machine-readable cause carried in some error bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorReason {
    /// The game id is unknown or malformed.
    InvalidGameId,
    /// The player is not seated in the game.
    InvalidPlayerId,
    /// The game is waiting on the other side.
    IncorrectTurn,
    /// The board rules refuse the move.
    IllegalMove,
    /// The request body is not the JSON the route expects.
    InvalidRequest,
}

/// Error body; `{}` when there is no reason to give.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Cause, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<ErrorReason>,
}

/// Failure of an HTTP handler.
#[derive(Debug, Display, Error)]
pub enum ApiError {
    /// The service refused or failed the request.
    #[display("{}", _0)]
    Service(ServiceError),

    /// The path segment is not a game id.
    #[display("Malformed game id '{}'", _0)]
    MalformedGameId(#[error(not(source))] String),

    /// The request body could not be read as the expected JSON.
    #[display("Malformed request body: {}", _0)]
    MalformedBody(#[error(not(source))] String),

    /// The blocking task running the request died.
    #[display("Worker task failed: {}", _0)]
    Worker(#[error(not(source))] String),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self::Service(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

impl ApiError {
    /// Status code and body for this error.
    pub fn parts(&self) -> (StatusCode, ErrorBody) {
        let reason = |r| ErrorBody { reason: Some(r) };
        let empty = ErrorBody { reason: None };
        match self {
            Self::MalformedGameId(_) | Self::Service(ServiceError::UnknownGame(_)) => {
                (StatusCode::NOT_FOUND, reason(ErrorReason::InvalidGameId))
            }
            Self::Service(ServiceError::InvalidPlayer) => {
                (StatusCode::NOT_FOUND, reason(ErrorReason::InvalidPlayerId))
            }
            Self::Service(ServiceError::IncorrectTurn) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                reason(ErrorReason::IncorrectTurn),
            ),
            Self::Service(ServiceError::IllegalMove(_)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                reason(ErrorReason::IllegalMove),
            ),
            Self::MalformedBody(_) => {
                (StatusCode::BAD_REQUEST, reason(ErrorReason::InvalidRequest))
            }
            Self::Service(ServiceError::InvalidPieceType(_)) => (StatusCode::NOT_FOUND, empty),
            Self::Service(ServiceError::GameFull) => (StatusCode::GONE, empty),
            Self::Service(ServiceError::Inconsistent(_) | ServiceError::Persistence(_))
            | Self::Worker(_) => (StatusCode::INTERNAL_SERVER_ERROR, empty),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.parts();
        if status.is_server_error() {
            error!(error = %self, status = %status, "Request failed");
        } else {
            warn!(error = %self, status = %status, "Request refused");
        }
        (status, Json(body)).into_response()
    }
}
