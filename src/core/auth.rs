//! Authentication
//!
//! Exchanges an IAM API key for short-lived bearer tokens, or passes a
//! static bearer token through.

use crate::error::{Error, Result};
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Default IAM token service
pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com";

const IAM_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Token expiry buffer - refresh tokens this much before they actually expire
/// This prevents using tokens that are about to expire during a request
const TOKEN_EXPIRY_BUFFER: Duration = Duration::from_secs(60);

/// Default token TTL if the token service does not report one
const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(30 * 60);

/// How requests are authenticated
#[derive(Clone)]
pub enum Authenticator {
    /// Exchange an API key for IAM access tokens
    Iam(IamAuthenticator),
    /// Send a caller-managed bearer token as is
    BearerToken(String),
    /// Send no `Authorization` header (mock servers, local testing)
    NoAuth,
}

impl Authenticator {
    /// Token for the `Authorization: Bearer` header, if any
    pub async fn token(&self) -> Result<Option<String>> {
        match self {
            Authenticator::Iam(iam) => iam.get_token().await.map(Some),
            Authenticator::BearerToken(token) => Ok(Some(token.clone())),
            Authenticator::NoAuth => Ok(None),
        }
    }

    /// Short name used in configuration files
    pub fn auth_type(&self) -> &'static str {
        match self {
            Authenticator::Iam(_) => "iam",
            Authenticator::BearerToken(_) => "bearertoken",
            Authenticator::NoAuth => "noauth",
        }
    }
}

impl fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Authenticator::Iam(iam) => f.debug_tuple("Iam").field(iam).finish(),
            Authenticator::BearerToken(_) => f.write_str("BearerToken([redacted])"),
            Authenticator::NoAuth => f.write_str("NoAuth"),
        }
    }
}

/// IAM API-key authenticator with token caching
#[derive(Clone)]
pub struct IamAuthenticator {
    apikey: String,
    url: String,
    client: Client,
    token_cache: Arc<RwLock<Option<CachedToken>>>,
}

#[derive(Clone)]
struct CachedToken {
    token: String,
    /// When this token expires (with buffer applied)
    expires_at: Instant,
}

impl CachedToken {
    fn is_valid(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

impl IamAuthenticator {
    /// Create an authenticator for the given API key against the default IAM endpoint
    pub fn new(apikey: impl Into<String>) -> Result<Self> {
        let apikey = apikey.into();
        if apikey.trim().is_empty() {
            return Err(Error::Configuration("IAM API key must not be empty".into()));
        }

        let client = Client::builder()
            .user_agent(crate::config::DEFAULT_USER_AGENT)
            .build()?;

        Ok(Self {
            apikey,
            url: DEFAULT_IAM_URL.to_string(),
            client,
            token_cache: Arc::new(RwLock::new(None)),
        })
    }

    /// Use a different IAM endpoint (base URL, without `/identity/token`)
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get an access token for API calls
    /// Checks token expiry before returning a cached token
    pub async fn get_token(&self) -> Result<String> {
        {
            let cache = self.token_cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.is_valid() {
                    return Ok(cached.token.clone());
                }
                tracing::debug!("Cached IAM token expired, fetching new token");
            }
        }

        let (token, ttl) = self.request_token().await?;
        let expires_at = Instant::now() + ttl.saturating_sub(TOKEN_EXPIRY_BUFFER);

        {
            let mut cache = self.token_cache.write().await;
            *cache = Some(CachedToken {
                token: token.clone(),
                expires_at,
            });
        }

        tracing::debug!(
            "New IAM token cached, expires in ~{} minutes",
            ttl.saturating_sub(TOKEN_EXPIRY_BUFFER).as_secs() / 60
        );

        Ok(token)
    }

    /// Force refresh the token
    pub async fn refresh_token(&self) -> Result<String> {
        {
            let mut cache = self.token_cache.write().await;
            *cache = None;
        }
        self.get_token().await
    }

    async fn request_token(&self) -> Result<(String, Duration)> {
        let url = format!("{}/identity/token", self.url);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[("grant_type", IAM_GRANT_TYPE), ("apikey", self.apikey.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!("IAM token request failed: {}", status);
            return Err(Error::Authentication(format!(
                "token request returned {}",
                status
            )));
        }

        let parsed: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| Error::Authentication(format!("malformed token response: {}", e)))?;

        let ttl = parsed
            .expires_in
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TOKEN_TTL);

        Ok((parsed.access_token, ttl))
    }
}

impl fmt::Debug for IamAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IamAuthenticator")
            .field("apikey", &"[redacted]")
            .field("url", &self.url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_apikey() {
        assert!(matches!(
            IamAuthenticator::new("  "),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn debug_redacts_secrets() {
        let iam = IamAuthenticator::new("super-secret-key").unwrap();
        let rendered = format!("{:?}", Authenticator::Iam(iam));
        assert!(!rendered.contains("super-secret-key"));

        let bearer = format!("{:?}", Authenticator::BearerToken("tok-123".into()));
        assert!(!bearer.contains("tok-123"));
    }

    #[test]
    fn bearer_token_is_passed_through() {
        let auth = Authenticator::BearerToken("tok-123".into());
        let token = tokio_test::block_on(auth.token()).unwrap();
        assert_eq!(token.as_deref(), Some("tok-123"));
    }

    #[test]
    fn no_auth_sends_nothing() {
        let token = tokio_test::block_on(Authenticator::NoAuth.token()).unwrap();
        assert!(token.is_none());
        assert_eq!(Authenticator::NoAuth.auth_type(), "noauth");
    }

    #[test]
    fn with_url_strips_trailing_slash() {
        let iam = IamAuthenticator::new("key")
            .unwrap()
            .with_url("http://localhost:8080/");
        assert_eq!(iam.url(), "http://localhost:8080");
    }
}
