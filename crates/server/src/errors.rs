use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use common::types::ErrorBody;
use service::auth::errors::AuthError;
use service::errors::ServiceError;

/// HTTP-facing error: a status code plus the `{"success": false, "message"}`
/// envelope every endpoint returns on failure.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Unclassified failure: generic message to the client, detail to the log.
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        error!(error = %detail, "internal server error");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody::new(self.message))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(m) => Self::new(StatusCode::BAD_REQUEST, m),
            ServiceError::NotFound(m) => Self::new(StatusCode::NOT_FOUND, m),
            ServiceError::Conflict(m) => Self::new(StatusCode::CONFLICT, m),
            ServiceError::InvalidTransition { .. } => {
                Self::new(StatusCode::CONFLICT, e.to_string())
            }
            ServiceError::Db(detail) => Self::internal(detail),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(m) => Self::new(StatusCode::BAD_REQUEST, m),
            AuthError::Conflict => Self::new(StatusCode::CONFLICT, "user already exists"),
            AuthError::NotFound => Self::new(StatusCode::NOT_FOUND, "user not found"),
            AuthError::Unauthorized => Self::unauthorized("Invalid credentials"),
            AuthError::HashError(detail)
            | AuthError::TokenError(detail)
            | AuthError::Repository(detail) => Self::internal(detail),
        }
    }
}
