//! Project API request payloads.

use serde::{Deserialize, Serialize};

/// Body of a project creation request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateProjectRequest {
    /// Name of the project to create. Sent as-is, even when empty.
    pub name: String,
}

impl CreateProjectRequest {
    /// Create a request for the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_name_only() {
        let body = serde_json::to_value(CreateProjectRequest::new("proj-1")).unwrap();
        assert_eq!(body, json!({"name": "proj-1"}));
    }

    #[test]
    fn empty_name_is_kept() {
        let body = serde_json::to_value(CreateProjectRequest::new("")).unwrap();
        assert_eq!(body, json!({"name": ""}));
    }
}
