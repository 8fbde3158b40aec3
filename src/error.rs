//! Error types
//!
//! Every operation returns [`Result<T>`]. Failures are reported before the
//! network call ([`Error::Validation`], [`Error::Encoding`]), by the transport
//! ([`Error::Transport`]) or by the service itself ([`Error::Service`]).

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::Deserialize;
use std::fmt;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the VPC client
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required parameter was missing or empty, or a header value could
    /// not be encoded. Carries the wire name of the parameter or header.
    #[error("missing or invalid parameter {0}")]
    Validation(String),

    /// The request could not be sent or the response could not be read
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status code
    #[error("{0}")]
    Service(Box<ServiceError>),

    /// A prototype or patch value could not be encoded as JSON
    #[error("failed to encode request body: {0}")]
    Encoding(#[source] serde_json::Error),

    /// A success response body did not match the expected shape
    #[error("failed to decode response body (status {status}): {source}")]
    Decoding {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },

    /// Credentials could not be exchanged for an access token
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The client configuration is unusable
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// `Pager::get_next` was called after the last page
    #[error("no more pages available")]
    Exhausted,
}

impl Error {
    /// HTTP status of a service error, if this is one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Service(e) => Some(e.status),
            Error::Decoding { status, .. } => Some(*status),
            Error::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// The service error details, if this is one
    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            Error::Service(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    pub fn is_conflict(&self) -> bool {
        self.status() == Some(StatusCode::CONFLICT)
    }

    /// The `If-Match` token did not match the current resource version
    pub fn is_precondition_failed(&self) -> bool {
        self.status() == Some(StatusCode::PRECONDITION_FAILED)
    }
}

impl From<ServiceError> for Error {
    fn from(e: ServiceError) -> Self {
        Error::Service(Box::new(e))
    }
}

/// A non-success response from the service
#[derive(Debug, Clone)]
pub struct ServiceError {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Structured error entries, empty when the body was not the documented shape
    pub errors: Vec<ServiceErrorDetail>,
    /// Request trace identifier reported by the service
    pub trace: Option<String>,
    /// Raw response body
    pub body: String,
}

/// Documented error body: `{"errors": [...], "trace": "..."}`
#[derive(Debug, Clone, Default, Deserialize)]
struct ServiceErrorBody {
    #[serde(default)]
    errors: Vec<ServiceErrorDetail>,
    #[serde(default)]
    trace: Option<String>,
}

/// One entry of a service error body
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub more_info: Option<String>,
    #[serde(default)]
    pub target: Option<ServiceErrorTarget>,
}

/// The request field, header or parameter an error entry refers to
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceErrorTarget {
    pub name: String,
    #[serde(rename = "type")]
    pub target_type: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl ServiceError {
    /// Build from a raw response; malformed bodies yield an empty `errors` list
    pub fn new(status: StatusCode, headers: HeaderMap, body: String) -> Self {
        let parsed: ServiceErrorBody = serde_json::from_str(&body).unwrap_or_default();
        Self {
            status,
            headers,
            errors: parsed.errors,
            trace: parsed.trace,
            body,
        }
    }

    /// Error code of the first entry (e.g. `not_found`, `validation_invalid_argument`)
    pub fn code(&self) -> Option<&str> {
        self.errors.first().map(|e| e.code.as_str())
    }

    /// Message of the first entry
    pub fn message(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.first() {
            Some(detail) => write!(
                f,
                "service error {}: {} ({})",
                self.status.as_u16(),
                detail.message,
                detail.code
            ),
            None => write!(f, "service error {}", self.status.as_u16()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_documented_error_body() {
        let body = r#"{
            "errors": [{
                "code": "not_found",
                "message": "VPC not found",
                "more_info": "https://cloud.ibm.com/docs",
                "target": {"name": "id", "type": "parameter", "value": "r006-123"}
            }],
            "trace": "1a2b3c"
        }"#;
        let err = ServiceError::new(StatusCode::NOT_FOUND, HeaderMap::new(), body.to_string());

        assert_eq!(err.code(), Some("not_found"));
        assert_eq!(err.message(), Some("VPC not found"));
        assert_eq!(err.trace.as_deref(), Some("1a2b3c"));
        let target = err.errors[0].target.as_ref().unwrap();
        assert_eq!(target.target_type, "parameter");
        assert_eq!(err.to_string(), "service error 404: VPC not found (not_found)");
    }

    #[test]
    fn tolerates_unstructured_error_body() {
        let err = ServiceError::new(
            StatusCode::BAD_GATEWAY,
            HeaderMap::new(),
            "<html>bad gateway</html>".to_string(),
        );
        assert!(err.errors.is_empty());
        assert_eq!(err.code(), None);
        assert_eq!(err.body, "<html>bad gateway</html>");
        assert_eq!(err.to_string(), "service error 502");
    }

    #[test]
    fn status_predicates() {
        let err = Error::from(ServiceError::new(
            StatusCode::PRECONDITION_FAILED,
            HeaderMap::new(),
            String::new(),
        ));
        assert!(err.is_precondition_failed());
        assert!(!err.is_not_found());
        assert_eq!(err.status(), Some(StatusCode::PRECONDITION_FAILED));
        assert!(Error::Validation("id".into()).status().is_none());
    }

    #[test]
    fn validation_names_field() {
        let err = Error::Validation("vpc_id".to_string());
        assert_eq!(err.to_string(), "missing required parameter vpc_id");
    }
}
