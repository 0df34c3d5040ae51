use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use roost_auth::AuthError;
use roost_store::StoreError;
use roost_types::api::ErrorResponse;

/// Failure taxonomy shared by every handler. Client-caused kinds map to
/// their own status; server-side kinds are logged with context here and
/// collapse into a generic 500 with no internal detail in the body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("email already registered")]
    EmailTaken,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("internal failure: {0}")]
    Internal(&'static str),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized => ApiError::Unauthorized,
            AuthError::Hashing => ApiError::Internal("password hashing failed"),
            AuthError::Signing => ApiError::Internal("token signing failed"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, *msg),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "forbidden"),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "not found"),
            ApiError::EmailTaken => (StatusCode::CONFLICT, "email already registered"),
            ApiError::Store(err) => {
                error!("store failure: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "server error")
            }
            ApiError::Internal(ctx) => {
                error!("internal failure: {ctx}");
                (StatusCode::INTERNAL_SERVER_ERROR, "server error")
            }
        };
        (
            status,
            Json(ErrorResponse {
                error: message.to_owned(),
            }),
        )
            .into_response()
    }
}
