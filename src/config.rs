//! Configuration Management
//!
//! [`ServiceConfig`] is the explicit configuration a [`crate::VpcService`]
//! is built from. [`ExternalConfig`] is the bootstrap layer that fills one
//! in from a credentials file and environment variables.

use crate::core::auth::{Authenticator, IamAuthenticator};
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default regional endpoint
pub const DEFAULT_SERVICE_URL: &str = "https://us-south.iaas.cloud.ibm.com/v1";

/// API version date sent with every request
pub const DEFAULT_VERSION: &str = "2024-04-30";

/// Infrastructure generation sent with every request
pub const DEFAULT_GENERATION: u32 = 2;

/// Service name used for external configuration lookups
pub const DEFAULT_SERVICE_NAME: &str = "vpcbeta";

pub const DEFAULT_USER_AGENT: &str = concat!("vpcbeta-rust/", env!("CARGO_PKG_VERSION"));

/// Credentials file name searched in the working and home directories
const CREDENTIALS_FILE_NAME: &str = "ibm-credentials.env";

/// Environment variable naming an explicit credentials file
const CREDENTIALS_FILE_ENV: &str = "IBM_CREDENTIALS_FILE";

/// Client configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL, e.g. `https://us-south.iaas.cloud.ibm.com/v1`
    pub service_url: String,
    /// API version date (`version` query parameter)
    pub version: String,
    /// Infrastructure generation (`generation` query parameter)
    pub generation: u32,
    pub authenticator: Authenticator,
    pub user_agent: String,
    /// Overall request timeout; the reqwest default applies when unset
    pub timeout: Option<Duration>,
}

impl ServiceConfig {
    pub fn new(authenticator: Authenticator) -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            version: DEFAULT_VERSION.to_string(),
            generation: DEFAULT_GENERATION,
            authenticator,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }

    pub fn with_service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = url.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_generation(mut self, generation: u32) -> Self {
        self.generation = generation;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Check the configuration can produce requests
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.service_url).map_err(|e| {
            Error::Configuration(format!("invalid service URL {:?}: {}", self.service_url, e))
        })?;
        if url.cannot_be_a_base() {
            return Err(Error::Configuration(format!(
                "service URL {:?} cannot be used as a base",
                self.service_url
            )));
        }
        if self.version.is_empty() {
            return Err(Error::Configuration("version must not be empty".into()));
        }
        Ok(())
    }
}

/// Properties gathered from a credentials file and the environment
///
/// Keys are `<SERVICE_NAME>_<PROPERTY>`, with the service name upper-cased
/// and `-` mapped to `_`: `VPCBETA_URL`, `VPCBETA_AUTH_TYPE`,
/// `VPCBETA_APIKEY`, `VPCBETA_BEARER_TOKEN`, `VPCBETA_AUTH_URL`,
/// `VPCBETA_VERSION`, `VPCBETA_GENERATION`.
#[derive(Debug, Clone, Default)]
pub struct ExternalConfig {
    properties: HashMap<String, String>,
}

impl ExternalConfig {
    /// Load properties for `service_name`
    ///
    /// The credentials file is read first, then environment variables
    /// override anything it set.
    pub fn load(service_name: &str) -> Self {
        let mut config = Self::default();

        if let Some(path) = credentials_file_path() {
            match std::fs::read_to_string(&path) {
                Ok(content) => config.merge(parse_properties(&content, service_name)),
                Err(e) => tracing::warn!("Cannot read credentials file {:?}: {}", path, e),
            }
        }

        config.merge(properties_from_env(std::env::vars(), service_name));
        config
    }

    /// Load properties for `service_name` from one file only
    pub fn from_file(path: &Path, service_name: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("cannot read credentials file {:?}: {}", path, e))
        })?;
        Ok(Self {
            properties: parse_properties(&content, service_name),
        })
    }

    /// Build from `(key, value)` pairs such as an environment snapshot
    pub fn from_vars<I>(vars: I, service_name: &str) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            properties: properties_from_env(vars, service_name),
        }
    }

    fn merge(&mut self, other: HashMap<String, String>) {
        self.properties.extend(other);
    }

    /// A property by its short name (`URL`, `APIKEY`, ...)
    pub fn get(&self, property: &str) -> Option<&str> {
        self.properties.get(property).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Turn the properties into a [`ServiceConfig`]
    pub fn into_service_config(self) -> Result<ServiceConfig> {
        let authenticator = self.authenticator()?;
        let mut config = ServiceConfig::new(authenticator);

        if let Some(url) = self.get("URL") {
            config = config.with_service_url(url);
        }
        if let Some(version) = self.get("VERSION") {
            config = config.with_version(version);
        }
        if let Some(generation) = self.get("GENERATION") {
            let generation = generation.parse().map_err(|_| {
                Error::Configuration(format!("invalid generation {:?}", generation))
            })?;
            config = config.with_generation(generation);
        }

        config.validate()?;
        Ok(config)
    }

    fn authenticator(&self) -> Result<Authenticator> {
        let auth_type = self.get("AUTH_TYPE").unwrap_or("iam").to_ascii_lowercase();

        match auth_type.as_str() {
            "iam" => {
                let apikey = self.get("APIKEY").ok_or_else(|| {
                    Error::Configuration("APIKEY is required for iam authentication".into())
                })?;
                let mut iam = IamAuthenticator::new(apikey)?;
                if let Some(url) = self.get("AUTH_URL") {
                    iam = iam.with_url(url);
                }
                Ok(Authenticator::Iam(iam))
            },
            "bearertoken" => {
                let token = self.get("BEARER_TOKEN").ok_or_else(|| {
                    Error::Configuration("BEARER_TOKEN is required for bearertoken authentication".into())
                })?;
                Ok(Authenticator::BearerToken(token.to_string()))
            },
            "noauth" => Ok(Authenticator::NoAuth),
            other => {
                tracing::warn!("Unsupported auth type in external configuration");
                Err(Error::Configuration(format!("unsupported auth type {:?}", other)))
            },
        }
    }
}

/// Environment prefix for a service name: `vpc-beta` -> `VPC_BETA_`
fn property_prefix(service_name: &str) -> String {
    let mut prefix = service_name.to_ascii_uppercase().replace('-', "_");
    prefix.push('_');
    prefix
}

/// Locate the credentials file: explicit env var, then working dir, then home
fn credentials_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CREDENTIALS_FILE_ENV) {
        return Some(PathBuf::from(path));
    }

    let local = PathBuf::from(CREDENTIALS_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    dirs::home_dir()
        .map(|home| home.join(CREDENTIALS_FILE_NAME))
        .filter(|path| path.exists())
}

/// Parse `KEY=VALUE` lines, keeping only keys for `service_name`
fn parse_properties(content: &str, service_name: &str) -> HashMap<String, String> {
    let prefix = property_prefix(service_name);
    let mut properties = HashMap::new();

    for line in content.lines() {
        let line = line.trim();
        // Skip comments and empty lines
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            tracing::warn!("Ignoring malformed credentials line");
            continue;
        };
        if let Some(property) = key.trim().strip_prefix(&prefix) {
            properties.insert(property.to_string(), unquote(value.trim()).to_string());
        }
    }

    properties
}

fn properties_from_env<I>(vars: I, service_name: &str) -> HashMap<String, String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let prefix = property_prefix(service_name);
    vars.into_iter()
        .filter_map(|(key, value)| {
            key.strip_prefix(&prefix)
                .map(|property| (property.to_string(), value))
        })
        .collect()
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = ServiceConfig::new(Authenticator::NoAuth);
        assert_eq!(config.service_url, DEFAULT_SERVICE_URL);
        assert_eq!(config.version, DEFAULT_VERSION);
        assert_eq!(config.generation, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_invalid_service_url() {
        let config = ServiceConfig::new(Authenticator::NoAuth).with_service_url("not a url");
        assert!(matches!(config.validate(), Err(Error::Configuration(_))));
    }

    #[test]
    fn prefix_normalizes_service_name() {
        assert_eq!(property_prefix("vpc-beta"), "VPC_BETA_");
        assert_eq!(property_prefix("vpcbetaint"), "VPCBETAINT_");
    }

    #[test]
    fn parses_credentials_file_lines() {
        let content = "\
# comment line
VPCBETA_URL=https://eu-de.iaas.cloud.ibm.com/v1
VPCBETA_AUTH_TYPE=iam
VPCBETA_APIKEY=\"abc123\"
OTHER_APIKEY=ignored
not a property line
";
        let props = parse_properties(content, "vpcbeta");
        assert_eq!(props.len(), 3);
        assert_eq!(props["URL"], "https://eu-de.iaas.cloud.ibm.com/v1");
        assert_eq!(props["APIKEY"], "abc123");
    }

    #[test]
    fn env_vars_build_noauth_config() {
        let vars = vec![
            ("VPCBETA_AUTH_TYPE".to_string(), "noauth".to_string()),
            ("VPCBETA_URL".to_string(), "http://localhost:9000/v1".to_string()),
            ("VPCBETA_GENERATION".to_string(), "1".to_string()),
            ("PATH".to_string(), "/usr/bin".to_string()),
        ];
        let config = ExternalConfig::from_vars(vars, "vpcbeta")
            .into_service_config()
            .unwrap();
        assert_eq!(config.service_url, "http://localhost:9000/v1");
        assert_eq!(config.generation, 1);
        assert!(matches!(config.authenticator, Authenticator::NoAuth));
    }

    #[test]
    fn iam_requires_apikey() {
        let vars = vec![("VPCBETA_AUTH_TYPE".to_string(), "IAM".to_string())];
        let err = ExternalConfig::from_vars(vars, "vpcbeta")
            .into_service_config()
            .unwrap_err();
        assert!(err.to_string().contains("APIKEY"));
    }

    #[test]
    fn unknown_auth_type_is_rejected() {
        let vars = vec![("VPCBETA_AUTH_TYPE".to_string(), "basic".to_string())];
        assert!(ExternalConfig::from_vars(vars, "vpcbeta")
            .into_service_config()
            .is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "VPCBETA_AUTH_TYPE=bearertoken").unwrap();
        writeln!(file, "VPCBETA_BEARER_TOKEN=tok").unwrap();

        let config = ExternalConfig::from_file(file.path(), "vpcbeta")
            .unwrap()
            .into_service_config()
            .unwrap();
        assert_eq!(config.authenticator.auth_type(), "bearertoken");
    }
}
