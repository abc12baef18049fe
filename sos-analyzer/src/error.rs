//! Error types for sos-analyzer
//!
//! Only request-level failures surface as HTTP errors. Per-clip analysis
//! failures travel inside `ClipOutcome` and are reported with status 200.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Requested clip does not exist under the root folder (404)
    #[error("Clip not found: {0}")]
    ClipNotFound(String),

    /// Clip path is empty or escapes the root folder (400)
    #[error("Invalid clip path: {0}")]
    InvalidPath(String),

    #[error(transparent)]
    Common(#[from] sos_common::Error),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::ClipNotFound(_) => (StatusCode::NOT_FOUND, "CLIP_NOT_FOUND"),
            ApiError::InvalidPath(_) => (StatusCode::BAD_REQUEST, "INVALID_PATH"),
            ApiError::Common(sos_common::Error::InvalidDistance(_)) => {
                (StatusCode::BAD_REQUEST, "INVALID_DISTANCE")
            }
            ApiError::Common(sos_common::Error::Config(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::ClipNotFound("x.wav".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::InvalidPath("../x.wav".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(sos_common::Error::InvalidDistance(-1.0))
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(sos_common::Error::Config("x".into()))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_codes() {
        let (_, code) = ApiError::from(sos_common::Error::InvalidDistance(0.0)).status_and_code();
        assert_eq!(code, "INVALID_DISTANCE");
    }
}
