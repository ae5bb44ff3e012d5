//! Core MatrixHub domain types.
//!
//! This module provides the project resource, the structured error payload
//! the service embeds in response bodies, and the per-call result envelope.

use serde::{Deserialize, Deserializer, Serialize};

/// A MatrixHub project, identified by its name.
///
/// Names are opaque and compared byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Project {
    /// Project name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

impl Project {
    /// Create a project reference from a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Structured application-level failure returned inside a response body.
///
/// The payload follows the gRPC gateway status shape. A `code` of zero means
/// no error is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ServiceError {
    /// Numeric status code
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: i64,
    /// Human-readable message
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    /// Opaque detail entries, in server order
    #[serde(default, deserialize_with = "null_as_default")]
    pub details: Vec<serde_json::Value>,
}

impl ServiceError {
    /// Create a service error without details.
    #[must_use]
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Returns true if the payload carries an actual error.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.code != 0
    }
}

/// Uniform result of a project API call.
///
/// A rejected request has `succeeded == false` and usually a populated
/// `error`; an accepted one has no `error` and may carry the returned
/// `resource`.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationResult {
    /// HTTP status code of the response
    pub http_status: u16,
    /// Whether the service accepted the request
    pub succeeded: bool,
    /// Project returned by the service, if any
    pub resource: Option<Project>,
    /// Structured error returned by the service, if any
    pub error: Option<ServiceError>,
}

impl OperationResult {
    /// Result carrying a structured service error.
    #[must_use]
    pub const fn rejected(http_status: u16, error: ServiceError) -> Self {
        Self {
            http_status,
            succeeded: false,
            resource: None,
            error: Some(error),
        }
    }

    /// Result decided by HTTP status alone.
    #[must_use]
    pub const fn from_status(http_status: u16) -> Self {
        Self {
            http_status,
            succeeded: is_success_status(http_status),
            resource: None,
            error: None,
        }
    }

    /// Attach a returned project.
    #[must_use]
    pub fn with_resource(mut self, resource: Project) -> Self {
        self.resource = Some(resource);
        self
    }

    /// Error code of the structured error, if any.
    #[must_use]
    pub fn error_code(&self) -> Option<i64> {
        self.error.as_ref().map(|e| e.code)
    }

    /// Name of the returned project, if any.
    #[must_use]
    pub fn resource_name(&self) -> Option<&str> {
        self.resource.as_ref().map(|p| p.name.as_str())
    }
}

/// Returns true for any 2xx status.
#[must_use]
pub const fn is_success_status(status: u16) -> bool {
    matches!(status, 200..=299)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
