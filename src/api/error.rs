//! API Error Types
//!
//! Every failure leaves the server as `{ok: false, error, code, request_id}`
//! with a matching status code. `error` is the text the player sees.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::game::GameError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request could not be decoded or failed validation
    #[error("{0}")]
    Validation(String),

    /// A game rule refused the action
    #[error(transparent)]
    Game(#[from] GameError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
    pub code: String,
    pub request_id: String,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::Game(e) => {
                let status = match e {
                    GameError::PlayerNotFound | GameError::ListingNotFound => StatusCode::NOT_FOUND,
                    GameError::AlreadyClaimed { .. } | GameError::AlreadyListed => {
                        StatusCode::CONFLICT
                    }
                    GameError::OwnListing => StatusCode::FORBIDDEN,
                    GameError::PaymentsDisabled => StatusCode::SERVICE_UNAVAILABLE,
                    GameError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
                    _ => StatusCode::BAD_REQUEST,
                };
                (status, e.code())
            }
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let request_id = uuid::Uuid::new_v4().to_string();

        if status.is_server_error() {
            tracing::error!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "API error occurred"
            );
        } else {
            tracing::warn!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "Request refused"
            );
        }

        let body = ErrorResponse {
            ok: false,
            error: self.to_string(),
            code: code.to_string(),
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::Game(GameError::NotEnoughCoins), StatusCode::BAD_REQUEST),
            (ApiError::Game(GameError::ListingNotFound), StatusCode::NOT_FOUND),
            (ApiError::Game(GameError::AlreadyListed), StatusCode::CONFLICT),
            (ApiError::Game(GameError::OwnListing), StatusCode::FORBIDDEN),
            (
                ApiError::Game(GameError::Store(StoreError::Lock("x".into()))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (ApiError::Validation("bad".into()), StatusCode::BAD_REQUEST),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_game_error_text_is_unwrapped() {
        let err = ApiError::from(GameError::NoPlayers);
        assert_eq!(err.to_string(), "No players");
    }
}
