//! Monitor configuration (TOML file + CLI overrides).

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::MonitorError;

/// Region used when neither the file nor the command line names one.
pub const DEFAULT_REGION: &str = "ap-southeast-1";

/// Connection settings for the batch service.
///
/// Every field is optional in the file; `toml::from_str("")` yields the
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MonitorConfig {
    pub region: String,

    /// Override for the service endpoint (LocalStack, VPC endpoints).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,

    /// Queue used when a command does not name one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_queue: Option<String>,

    /// Static keys. When absent the default AWS credential chain is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<StaticCredentials>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            endpoint_url: None,
            default_queue: None,
            credentials: None,
        }
    }
}

impl MonitorConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, MonitorError> {
        let config: Self =
            toml::from_str(text).map_err(|e| MonitorError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, MonitorError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| MonitorError::Config(format!("failed reading {}: {e}", path.display())))?;
        let config: Self = toml::from_str(&text)
            .map_err(|e| MonitorError::Config(format!("failed parsing {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, otherwise start from defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, MonitorError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), MonitorError> {
        if self.region.trim().is_empty() {
            return Err(MonitorError::Config("region must not be empty".to_string()));
        }
        if let Some(endpoint) = &self.endpoint_url
            && endpoint.trim().is_empty()
        {
            return Err(MonitorError::Config(
                "endpoint_url must not be empty".to_string(),
            ));
        }
        if let Some(creds) = &self.credentials {
            creds.validate()?;
        }
        Ok(())
    }

    /// The queue to operate on: the explicit one, else `default_queue`.
    pub fn resolve_queue<'a>(&'a self, explicit: Option<&'a str>) -> Result<&'a str, MonitorError> {
        explicit
            .or(self.default_queue.as_deref())
            .filter(|q| !q.is_empty())
            .ok_or(MonitorError::MissingQueue)
    }
}

/// Access key pair, optionally with a session token.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
}

impl StaticCredentials {
    fn validate(&self) -> Result<(), MonitorError> {
        if self.access_key_id.is_empty() || self.secret_access_key.is_empty() {
            return Err(MonitorError::Config(
                "credentials need both access_key_id and secret_access_key".to_string(),
            ));
        }
        Ok(())
    }
}

// secrets stay out of logs
impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
