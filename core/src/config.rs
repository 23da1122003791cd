//! Client configuration.
//!
//! Values come from code or from the environment:
//!
//! | variable | default |
//! |---|---|
//! | `DIGITALOCEAN_ENDPOINT` | `https://api.digitalocean.com/v2` |
//! | `DIGITALOCEAN_TOKEN` | none |
//! | `DIGITALOCEAN_TIMEOUT_SECS` | `30` |

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ApiError;

pub const DEFAULT_ENDPOINT: &str = "https://api.digitalocean.com/v2";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENDPOINT_VAR: &str = "DIGITALOCEAN_ENDPOINT";
pub const TOKEN_VAR: &str = "DIGITALOCEAN_TOKEN";
pub const TIMEOUT_VAR: &str = "DIGITALOCEAN_TIMEOUT_SECS";

#[derive(Debug)]
pub struct ClientConfig {
    pub endpoint: String,
    pub token: Option<SecretString>,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = match get(ENDPOINT_VAR) {
            Some(endpoint) => Self::new(endpoint.trim()),
            None => Self::default(),
        };
        if let Some(token) = get(TOKEN_VAR) {
            config = config.with_token(token);
        }
        if let Some(raw) = get(TIMEOUT_VAR) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ApiError::Config(format!("{TIMEOUT_VAR} must be a whole number of seconds, got {raw:?}")))?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}
