//! Maps vault errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sles_vault::{ErrorKind, VaultError};
use thiserror::Error;
use tracing::{error, warn};

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors a handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A vault operation failed.
    #[error(transparent)]
    Vault(#[from] VaultError),

    /// The request was missing fields or could not be read.
    #[error("{0}")]
    BadRequest(String),

    /// The server failed for reasons unrelated to the request.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// The status code this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Vault(VaultError::LinkExpired { .. }) => StatusCode::UNAUTHORIZED,
            Self::Vault(err) => match err.kind() {
                ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
                ErrorKind::NotFound
                | ErrorKind::Expired
                | ErrorKind::Exhausted
                | ErrorKind::AccessDenied => StatusCode::FORBIDDEN,
                ErrorKind::Io => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        Self::Vault(VaultError::Io(err))
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Request rejected ({}): {}", status.as_u16(), self);
        }
        let body = serde_json::json!({ "message": self.to_string() });
        (status, Json(body)).into_response()
    }
}
