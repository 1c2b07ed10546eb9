//! Error handling for the Bloom Climate relay
//!
//! Every failure is answered with a JSON body `{ "error": ..., "code": ... }`
//! rather than a raw upstream passthrough.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Message surfaced for any upstream failure
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to fetch data from NASA POWER API";

/// Relay error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Invalid coordinates")]
    InvalidCoordinates,

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    // External service errors
    #[error("Upstream request failed: {message}")]
    Upstream {
        /// Upstream HTTP status, absent on transport failure or timeout
        status: Option<u16>,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl AppError {
    fn status_and_body(&self) -> (StatusCode, ErrorResponse) {
        match self {
            AppError::InvalidCoordinates => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Invalid coordinates".to_string(),
                    code: "INVALID_COORDINATES".to_string(),
                },
            ),
            AppError::InvalidDateRange(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: format!("Invalid date range: {}", msg),
                    code: "INVALID_DATE_RANGE".to_string(),
                },
            ),
            AppError::Upstream { status, .. } => (
                status
                    .and_then(|code| StatusCode::from_u16(code).ok())
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                ErrorResponse {
                    error: UPSTREAM_FAILURE_MESSAGE.to_string(),
                    code: "UPSTREAM_ERROR".to_string(),
                },
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: format!("Configuration error: {}", msg),
                    code: "CONFIGURATION_ERROR".to_string(),
                },
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
