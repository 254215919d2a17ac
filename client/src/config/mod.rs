pub mod manager;
pub mod secrets;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::constants::defaults;

pub use manager::{ConfigManager, ConfigOverrides};
pub use secrets::SecretsLoader;

/// Connection settings for one backend. Immutable once handed to a client.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without trailing slash
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
    /// Skip TLS certificate and hostname verification
    pub accept_invalid_certs: bool,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            api_key: api_key.into(),
            timeout: Duration::from_secs(defaults::TIMEOUT_SECONDS),
            accept_invalid_certs: false,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }
}

// Keep the bearer token out of logs and panic messages
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}

/// Strip every trailing slash from a base URL
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// On-disk layout of `cdng.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub backend: BackendConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub url: Option<String>,
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            timeout_seconds: default_timeout_seconds(),
            accept_invalid_certs: false,
        }
    }
}

fn default_timeout_seconds() -> u64 {
    defaults::TIMEOUT_SECONDS
}
