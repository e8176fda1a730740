//! Error types for cosmic-api
//!
//! Every handler failure is rendered as `{"error": "...", "details": "..."}`
//! with `details` omitted when there is nothing beyond the message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cosmic_common::config::Credential;
use serde::Serialize;
use thiserror::Error;

use crate::services::UpstreamError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed request parameter (400)
    #[error("{0}")]
    InvalidRequest(String),

    /// Required server credential absent (500)
    #[error("{0}")]
    Configuration(String),

    /// Third-party call failed; status is forwarded to the caller
    #[error("{message}")]
    Upstream {
        status: StatusCode,
        message: String,
        details: Option<String>,
    },

    /// Resource not found (404)
    #[error("{0}")]
    NotFound(String),

    /// Internal server error (500)
    #[error("{0}")]
    Internal(String),

    /// cosmic-common error
    #[error(transparent)]
    Common(#[from] cosmic_common::Error),
}

impl ApiError {
    /// Configuration error for a missing upstream credential
    pub fn missing_credential(credential: Credential) -> Self {
        ApiError::Configuration(format!(
            "Server configuration error (missing {} API key).",
            credential.service()
        ))
    }

    /// Upstream failure reported as a plain 500
    pub fn upstream(message: impl Into<String>) -> Self {
        ApiError::Upstream {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
            details: None,
        }
    }

    /// Upstream failure carrying its own status and an optional body excerpt
    pub fn upstream_status(
        status: StatusCode,
        message: impl Into<String>,
        details: Option<String>,
    ) -> Self {
        ApiError::Upstream {
            status,
            message: message.into(),
            details,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upstream { status, .. } => *status,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Common(cosmic_common::Error::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            ApiError::Common(cosmic_common::Error::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Common(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        ApiError::upstream(err.to_string())
    }
}

/// Uniform error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Upstream {
                message, details, ..
            } => ErrorBody {
                error: message,
                details,
            },
            // Input errors from the common crate already carry a user-facing message
            ApiError::Common(cosmic_common::Error::InvalidInput(msg)) => ErrorBody {
                error: msg,
                details: None,
            },
            other => ErrorBody {
                error: other.to_string(),
                details: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
