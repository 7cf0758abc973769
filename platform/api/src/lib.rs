use std::sync::Arc;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use platform_authn::AuthError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Shared handler result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error, Clone)]
pub enum ApiError {
    #[error("Access denied")]
    Unauthorized,
    #[error("Invalid token")]
    Forbidden,
    #[error("{0}")]
    BadRequest(String),
    #[error("Server error")]
    Internal(Arc<anyhow::Error>),
}

#[derive(Serialize)]
struct MessageBody<'a> {
    message: &'a str,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(Arc::new(err.into()))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(value: anyhow::Error) -> Self {
        Self::Internal(Arc::new(value))
    }
}

impl From<AuthError> for ApiError {
    fn from(value: AuthError) -> Self {
        match value {
            AuthError::MissingToken => ApiError::Unauthorized,
            AuthError::InvalidToken(_) => ApiError::Forbidden,
            other => ApiError::internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            // Internals stay in the logs; clients get a fixed text body.
            ApiError::Internal(err) => {
                error!(error = ?err, "request failed");
                (status, self.to_string()).into_response()
            }
            _ => {
                let message = self.to_string();
                (status, Json(MessageBody { message: &message })).into_response()
            }
        }
    }
}
