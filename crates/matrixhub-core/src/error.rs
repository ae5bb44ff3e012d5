//! Error types for MatrixHub client operations.
//!
//! Only failures of the HTTP exchange itself, readiness timeouts, cancellation
//! and configuration problems are errors. A structured rejection returned by
//! the service is data and lives in [`crate::types::OperationResult`].

use std::time::Duration;
use thiserror::Error;

/// Main error type for MatrixHub client operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The service could not be reached
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Request timed out
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Request URL could not be built
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Request payload could not be encoded
    #[error("Failed to serialize request: {0}")]
    SerializationError(String),

    /// Health probe answered with something other than 200
    #[error("Health check returned status {status}")]
    Unhealthy {
        /// HTTP status returned by the probe
        status: u16,
    },

    /// Readiness deadline elapsed without a successful probe
    #[error("Timeout waiting for service to be ready after {0:?}")]
    ReadinessTimeout(Duration),

    /// Operation aborted by an external cancellation signal
    #[error("Operation cancelled: {0}")]
    Cancelled(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Specialized result type for MatrixHub client operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            Self::HttpError(_) => "HTTP_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::SerializationError(_) => "SERIALIZATION_ERROR",
            Self::Unhealthy { .. } => "UNHEALTHY",
            Self::ReadinessTimeout(_) => "READINESS_TIMEOUT",
            Self::Cancelled(_) => "CANCELLED",
            Self::ConfigError(_) => "CONFIG_ERROR",
        }
    }

    /// Returns true if the HTTP exchange itself failed.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ServiceUnavailable(_)
                | Self::HttpError(_)
                | Self::Timeout(_)
                | Self::InvalidEndpoint(_)
                | Self::SerializationError(_)
        )
    }

    /// Returns true if the operation was aborted by cancellation.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ServiceUnavailable(err.to_string())
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ConfigError(err.to_string())
    }
}
