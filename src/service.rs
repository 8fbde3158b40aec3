//! VPC service client
//!
//! [`VpcService`] holds the configuration, HTTP client and authenticator.
//! Operation methods live next to their models under [`crate::api`]; each
//! one builds an [`ApiRequest`] and hands it to [`VpcService::execute`].

use crate::config::ServiceConfig;
use crate::core::auth::Authenticator;
use crate::core::http::VpcHttpClient;
use crate::core::request::ApiRequest;
use crate::error::{Error, Result, ServiceError};
use reqwest::header::{HeaderMap, ETAG};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// A decoded result together with the response metadata
#[derive(Debug, Clone)]
pub struct DetailedResponse<T> {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub result: T,
}

impl<T> DetailedResponse<T> {
    /// Concurrency token for a later `If-Match` header
    pub fn etag(&self) -> Option<&str> {
        self.headers.get(ETAG).and_then(|v| v.to_str().ok())
    }

    pub fn into_result(self) -> T {
        self.result
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DetailedResponse<U> {
        DetailedResponse {
            status: self.status,
            headers: self.headers,
            result: f(self.result),
        }
    }
}

struct Inner {
    config: ServiceConfig,
    http: VpcHttpClient,
}

/// Main VPC client
///
/// Cheap to clone; clones share the HTTP connection pool and token cache.
#[derive(Clone)]
pub struct VpcService {
    inner: Arc<Inner>,
}

impl VpcService {
    /// Create a new client from an explicit configuration
    pub fn new(config: ServiceConfig) -> Result<Self> {
        config.validate()?;
        let http = VpcHttpClient::new(&config.user_agent, config.timeout)?;
        Ok(Self::with_http_client(config, http))
    }

    /// Create a client that uses a caller-supplied HTTP client
    pub fn with_http_client(config: ServiceConfig, http: VpcHttpClient) -> Self {
        Self {
            inner: Arc::new(Inner { config, http }),
        }
    }

    /// Create a client from the credentials file and environment for `service_name`
    pub fn from_external_config(service_name: &str) -> Result<Self> {
        let config = crate::config::ExternalConfig::load(service_name).into_service_config()?;
        Self::new(config)
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.inner.config
    }

    pub fn service_url(&self) -> &str {
        &self.inner.config.service_url
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.inner.config.authenticator
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.config.service_url.trim_end_matches('/'), path)
    }

    async fn round_trip(&self, request: ApiRequest) -> Result<crate::core::http::RawResponse> {
        let config = &self.inner.config;
        let token = config.authenticator.token().await?;

        let mut query = Vec::with_capacity(request.query.len() + 2);
        query.push(("version".to_string(), config.version.clone()));
        query.push(("generation".to_string(), config.generation.to_string()));
        query.extend(request.query);

        let url = self.url(&request.path);
        let response = self
            .inner
            .http
            .send(
                request.method,
                &url,
                &query,
                request.headers,
                request.body.as_ref(),
                token.as_deref(),
            )
            .await?;

        if !response.status.is_success() {
            return Err(ServiceError::new(response.status, response.headers, response.body).into());
        }
        Ok(response)
    }

    /// Send a request and decode its JSON body
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<DetailedResponse<T>> {
        let response = self.round_trip(request).await?;
        let result = serde_json::from_str(&response.body).map_err(|source| Error::Decoding {
            status: response.status,
            source,
        })?;
        Ok(DetailedResponse {
            status: response.status,
            headers: response.headers,
            result,
        })
    }

    /// Send a request and return its body as text
    pub(crate) async fn execute_text(&self, request: ApiRequest) -> Result<DetailedResponse<String>> {
        let response = self.round_trip(request).await?;
        Ok(DetailedResponse {
            status: response.status,
            headers: response.headers,
            result: response.body,
        })
    }

    /// Send a request whose success response carries no body of interest
    pub(crate) async fn execute_empty(&self, request: ApiRequest) -> Result<DetailedResponse<()>> {
        let response = self.round_trip(request).await?;
        Ok(DetailedResponse {
            status: response.status,
            headers: response.headers,
            result: (),
        })
    }
}

impl std::fmt::Debug for VpcService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VpcService")
            .field("config", &self.inner.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slash() {
        let config = ServiceConfig::new(Authenticator::NoAuth)
            .with_service_url("https://us-south.iaas.cloud.ibm.com/v1/");
        let service = VpcService::new(config).unwrap();
        assert_eq!(
            service.url("/vpcs/r006-1"),
            "https://us-south.iaas.cloud.ibm.com/v1/vpcs/r006-1"
        );
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = ServiceConfig::new(Authenticator::NoAuth).with_service_url("::");
        assert!(VpcService::new(config).is_err());
    }

    #[test]
    fn etag_is_read_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(ETAG, "W/\"96d225c4\"".parse().unwrap());
        let response = DetailedResponse {
            status: StatusCode::OK,
            headers,
            result: (),
        };
        assert_eq!(response.etag(), Some("W/\"96d225c4\""));
    }
}
