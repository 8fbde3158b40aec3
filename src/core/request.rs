//! Request descriptors
//!
//! An [`ApiRequest`] captures everything one operation contributes to a
//! call: method, path (relative to the service URL), query, headers and
//! body. The service adds the base URL, version parameters and credentials.

use crate::error::{Error, Result};
use crate::patch::Patch;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, IF_MATCH};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;

pub(crate) const CONTENT_TYPE_JSON: &str = "application/json";
pub(crate) const CONTENT_TYPE_MERGE_PATCH: &str = "application/merge-patch+json";

/// Request body and its content type
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    MergePatch(Value),
}

impl RequestBody {
    pub fn content_type(&self) -> &'static str {
        match self {
            RequestBody::Json(_) => CONTENT_TYPE_JSON,
            RequestBody::MergePatch(_) => CONTENT_TYPE_MERGE_PATCH,
        }
    }

    pub fn value(&self) -> &Value {
        match self {
            RequestBody::Json(v) | RequestBody::MergePatch(v) => v,
        }
    }
}

/// A single operation's request, before the service URL is applied
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<RequestBody>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Add a query parameter when the value is present
    pub fn query<T: ToString>(mut self, name: &str, value: Option<T>) -> Self {
        if let Some(value) = value {
            self.query.push((name.to_string(), value.to_string()));
        }
        self
    }

    /// Add the `start` / `limit` paging parameters
    pub fn page(self, start: Option<&str>, limit: Option<i64>) -> Self {
        self.query("start", start).query("limit", limit)
    }

    /// Add a conditional-update header carrying the caller's concurrency token
    ///
    /// A token that cannot be sent as a header value is rejected rather than
    /// dropped, so the update never goes out unconditionally.
    pub fn if_match(self, token: Option<&str>) -> Result<Self> {
        self.header(IF_MATCH, token)
            .map_err(|_| Error::Validation("If-Match".to_string()))
    }

    /// Add a header when the value is present
    pub fn header(mut self, name: HeaderName, value: Option<&str>) -> Result<Self> {
        if let Some(value) = value {
            let value = HeaderValue::from_str(value).map_err(|_| {
                tracing::debug!("Rejecting invalid value for header {}", name);
                Error::Validation(name.to_string())
            })?;
            self.headers.insert(name, value);
        }
        Ok(self)
    }

    /// Attach a JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body).map_err(Error::Encoding)?;
        self.body = Some(RequestBody::Json(value));
        Ok(self)
    }

    /// Attach a merge-patch body
    pub fn merge_patch(mut self, patch: &Patch) -> Self {
        self.body = Some(RequestBody::MergePatch(patch.to_value()));
        self
    }
}

/// Validate a required path parameter and percent-encode it for the URL path
pub fn path_param<'a>(name: &str, value: &'a str) -> Result<Cow<'a, str>> {
    if value.is_empty() {
        return Err(Error::Validation(name.to_string()));
    }
    Ok(urlencoding::encode(value))
}

/// Validate a required non-path string field
pub fn required<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    if value.is_empty() {
        return Err(Error::Validation(name.to_string()));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn path_param_rejects_empty() {
        let err = path_param("vpc_id", "").unwrap_err();
        assert!(matches!(err, Error::Validation(ref f) if f == "vpc_id"));
    }

    #[test]
    fn path_param_encodes_reserved_characters() {
        assert_eq!(path_param("id", "a/b c").unwrap(), "a%2Fb%20c");
        assert_eq!(path_param("id", "r006-1234").unwrap(), "r006-1234");
    }

    #[test]
    fn query_skips_absent_values() {
        let request = ApiRequest::get("/vpcs")
            .query("limit", Some(10))
            .query::<&str>("start", None)
            .query("resource_group.id", Some("rg-1"));
        assert_eq!(
            request.query,
            vec![
                ("limit".to_string(), "10".to_string()),
                ("resource_group.id".to_string(), "rg-1".to_string()),
            ]
        );
    }

    #[test]
    fn if_match_only_when_supplied() {
        let with = ApiRequest::delete("/volumes/v1")
            .if_match(Some("W/\"abc\""))
            .unwrap();
        assert_eq!(with.headers.get(IF_MATCH).unwrap(), "W/\"abc\"");

        let without = ApiRequest::delete("/volumes/v1").if_match(None).unwrap();
        assert!(without.headers.get(IF_MATCH).is_none());
    }

    #[test]
    fn if_match_rejects_unencodable_token() {
        let err = ApiRequest::delete("/volumes/v1")
            .if_match(Some("W/\"tok\nen\""))
            .unwrap_err();
        assert!(matches!(err, Error::Validation(ref f) if f == "If-Match"));
    }

    #[test]
    fn header_rejection_names_the_header() {
        let err = ApiRequest::get("/vpn_servers/s1/client_configuration")
            .header(reqwest::header::ACCEPT, Some("text/\u{7f}plain"))
            .unwrap_err();
        assert!(matches!(err, Error::Validation(ref f) if f == "accept"));
    }

    #[test]
    fn json_body_uses_json_content_type() {
        let request = ApiRequest::post("/keys").json(&json!({"name": "k"})).unwrap();
        let body = request.body.unwrap();
        assert_eq!(body.content_type(), "application/json");
        assert_eq!(body.value(), &json!({"name": "k"}));
    }
}
