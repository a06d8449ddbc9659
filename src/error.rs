use crate::repositories::RepositoryError;
use crate::services::{RoleServiceError, TokenError, UserServiceError};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

// Type alias for Result with our AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Token error: {0}")]
    Token(TokenError),
}

impl AppError {
    /// Status and client-facing message. Internal details stay in the logs.
    pub fn describe(&self) -> (StatusCode, String) {
        match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized access".into()),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "forbidden access".into()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Token(_) | AppError::Repository(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".into(),
            ),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::InvalidClaims(e) => AppError::Validation(e.to_string()),
            TokenError::InvalidToken | TokenError::Expired | TokenError::Malformed => {
                AppError::Unauthorized
            }
            other => AppError::Token(other),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<UserServiceError> for AppError {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::InvalidEmail
            | UserServiceError::RoleNotAllowed(_)
            | UserServiceError::UserNotFound => AppError::Validation(err.to_string()),
            UserServiceError::RepositoryError(e) => AppError::Repository(e),
        }
    }
}

impl From<RoleServiceError> for AppError {
    fn from(err: RoleServiceError) -> Self {
        match err {
            RoleServiceError::Forbidden => AppError::Forbidden,
            RoleServiceError::RepositoryError(e) => AppError::Repository(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.describe();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        (status, Json(json!({ "message": message }))).into_response()
    }
}
