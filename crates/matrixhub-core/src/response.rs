//! Response classification.
//!
//! Turns a raw HTTP status and body into an [`OperationResult`]. The service
//! may report a structured error inside a 2xx response, so the body is
//! consulted before the status.

use crate::types::{OperationResult, Project, ServiceError};
use tracing::trace;

const EMPTY_OBJECT: &[u8] = b"{}";

/// Classify a response.
///
/// 1. A body that decodes as a [`ServiceError`] with a non-zero code is a
///    rejection, whatever the status.
/// 2. Otherwise the call succeeded iff the status is 2xx.
/// 3. A successful, non-empty body other than `{}` that decodes as a
///    [`Project`] with a non-empty name becomes the result's resource.
///
/// Malformed bodies never cause an error.
#[must_use]
pub fn classify(http_status: u16, body: &[u8]) -> OperationResult {
    if let Ok(error) = serde_json::from_slice::<ServiceError>(body) {
        if error.is_error() {
            trace!(http_status, code = error.code, "response carries service error");
            return OperationResult::rejected(http_status, error);
        }
    }

    let result = OperationResult::from_status(http_status);
    if !result.succeeded || body.is_empty() || body == EMPTY_OBJECT {
        return result;
    }

    match serde_json::from_slice::<Project>(body) {
        Ok(project) if !project.name.is_empty() => result.with_resource(project),
        _ => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_in_ok_response_is_rejection() {
        let result = classify(
            200,
            br#"{"code":3,"message":"invalid argument","details":[]}"#,
        );
        assert!(!result.succeeded);
        assert_eq!(result.http_status, 200);
        assert_eq!(result.error, Some(ServiceError::new(3, "invalid argument")));
        assert!(result.resource.is_none());
    }

    #[test]
    fn service_error_wins_over_any_status() {
        for status in [200_u16, 201, 204, 400, 404, 500] {
            let result = classify(status, br#"{"code":5,"message":"not found"}"#);
            assert!(!result.succeeded, "status {status}");
            assert_eq!(result.error_code(), Some(5));
        }
    }

    #[test]
    fn zero_code_is_not_an_error() {
        let result = classify(200, br#"{"code":0,"message":"","name":"proj-1"}"#);
        assert!(result.succeeded);
        assert!(result.error.is_none());
        assert_eq!(result.resource_name(), Some("proj-1"));
    }

    #[test]
    fn empty_and_empty_object_bodies_carry_no_resource() {
        for body in [&b""[..], &b"{}"[..]] {
            let result = classify(200, body);
            assert!(result.succeeded);
            assert!(result.resource.is_none());
            assert!(result.error.is_none());
        }
    }

    #[test]
    fn created_project_is_returned() {
        let result = classify(201, br#"{"name":"proj-1"}"#);
        assert!(result.succeeded);
        assert_eq!(result.resource, Some(Project::new("proj-1")));
    }

    #[test]
    fn empty_name_is_not_a_resource() {
        let result = classify(200, br#"{"name":""}"#);
        assert!(result.succeeded);
        assert!(result.resource.is_none());
    }

    #[test]
    fn no_content_delete_has_neither_field() {
        let result = classify(204, b"");
        assert!(result.succeeded);
        assert_eq!(result.http_status, 204);
        assert!(result.resource.is_none());
        assert!(result.error.is_none());
    }

    #[test]
    fn malformed_bodies_fall_back_to_status() {
        let ok = classify(200, b"not json at all");
        assert!(ok.succeeded);
        assert!(ok.resource.is_none());

        let array = classify(200, b"[1,2,3]");
        assert!(array.succeeded);
        assert!(array.resource.is_none());

        let failed = classify(502, b"<html>bad gateway</html>");
        assert!(!failed.succeeded);
        assert!(failed.error.is_none());
    }

    #[test]
    fn non_numeric_code_is_ignored() {
        let result = classify(200, br#"{"code":"boom","name":"proj-2"}"#);
        assert!(result.succeeded);
        assert!(result.error.is_none());
    }

    #[test]
    fn non_2xx_without_error_payload_is_failure() {
        let result = classify(404, br#"{"name":"proj-1"}"#);
        assert!(!result.succeeded);
        assert!(result.resource.is_none());
        assert!(result.error.is_none());
    }

    #[test]
    fn classification_is_pure() {
        let inputs: [(u16, &[u8]); 4] = [
            (200, br#"{"code":3,"message":"x","details":[1]}"#),
            (201, br#"{"name":"proj"}"#),
            (204, b""),
            (500, b"oops"),
        ];
        for (status, body) in inputs {
            assert_eq!(classify(status, body), classify(status, body));
        }
    }
}
