//! Connection settings for the API.

use std::time::Duration;

use crate::{user_agent::default_user_agent, Error};

pub const DEFAULT_ENDPOINT: &str = "https://api.flexmls.com";
pub const DEFAULT_VERSION: &str = "v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Endpoint, credentials and HTTP settings used by [`crate::ApiAuth`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Scheme and host, without a trailing slash.
    pub endpoint: String,
    /// API version segment prefixed to every request path.
    pub version: String,
    pub api_key: String,
    pub api_secret: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Config {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            version: DEFAULT_VERSION.to_string(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            user_agent: default_user_agent(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Reads settings from `FLEXMLS_*` environment variables.
    ///
    /// The key and secret are required; everything else falls back to defaults.
    pub fn from_env() -> Result<Self, Error> {
        let api_key = env_required("FLEXMLS_API_KEY")?;
        let api_secret = env_required("FLEXMLS_API_SECRET")?;
        let mut config = Self::new(api_key, api_secret);
        if let Some(endpoint) = env_string("FLEXMLS_ENDPOINT") {
            config = config.with_endpoint(&endpoint);
        }
        if let Some(version) = env_string("FLEXMLS_API_VERSION") {
            config = config.with_version(&version);
        }
        config.timeout = Duration::from_secs(env_u64("FLEXMLS_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS));
        Ok(config)
    }

    /// Sets the endpoint. Used for testing with wiremock.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.trim_matches('/').to_string();
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|val| !val.trim().is_empty())
}

fn env_required(key: &str) -> Result<String, Error> {
    env_string(key).ok_or_else(|| Error::Config(format!("{} is not set", key)))
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .unwrap_or(default)
}
