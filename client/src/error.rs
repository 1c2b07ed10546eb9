//! Error handling for the Bloom Climate client
//!
//! Only network-shaped failures can be downgraded to demo data. Input
//! errors, unknown places and storage failures always reach the user.

use shared::{DemoReason, ExportError, ParamId, ValidationError};
use thiserror::Error;

/// Client error types
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Location not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("No valid daily values for {0}")]
    EmptySeries(ParamId),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl ClientError {
    /// The demo-data reason for a recoverable failure, or the error itself
    /// when it must not be masked
    pub fn into_demo_reason(self) -> Result<DemoReason, ClientError> {
        match self {
            ClientError::Network(msg) => Ok(DemoReason::Network(msg)),
            ClientError::Upstream(msg) => Ok(DemoReason::Upstream(msg)),
            ClientError::EmptySeries(_) => Ok(DemoReason::EmptySeries),
            other => Err(other),
        }
    }
}

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        ClientError::InvalidInput(err.to_string())
    }
}

impl From<ExportError> for ClientError {
    fn from(err: ExportError) -> Self {
        ClientError::Storage(format!("CSV export failed: {}", err))
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Storage(err.to_string())
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
