use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info};

use super::{normalize_base_url, ClientConfig, ConfigFile, SecretsLoader};
use crate::constants::{defaults, env};
use crate::errors::{ConfigError, Result};

/// Values that take precedence over the config file, in order flag > env.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub insecure: bool,
}

impl ConfigOverrides {
    /// Read `CDNG_URL` / `CDNG_API_KEY`, ignoring empty values
    pub fn from_env() -> Self {
        Self {
            url: read_env(env::URL),
            api_key: read_env(env::API_KEY),
            insecure: false,
        }
    }

    /// Layer `self` over `lower`: anything set here wins
    pub fn or(self, lower: ConfigOverrides) -> Self {
        Self {
            url: self.url.or(lower.url),
            api_key: self.api_key.or(lower.api_key),
            insecure: self.insecure || lower.insecure,
        }
    }
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

pub struct ConfigManager {
    current_config: Arc<ClientConfig>,
}

impl ConfigManager {
    /// Load configuration from `config_path` (or `cdng.toml` when `None`),
    /// the neighbouring secrets file, the environment and `overrides`.
    ///
    /// An explicitly given config file must exist; the default one is optional.
    pub async fn load(config_path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let (path, required) = match config_path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(defaults::CONFIG_FILE), false),
        };

        let file = Self::read_config_file(&path, required).await?;
        let secrets = SecretsLoader::load(&secrets_path_for(&path))?;
        let overrides = overrides.or(ConfigOverrides::from_env());

        let config = Self::resolve(file, &secrets, overrides)?;

        info!(
            "Configuration loaded: backend {} (timeout {}s)",
            config.base_url,
            config.timeout.as_secs()
        );

        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    pub fn get_current_config(&self) -> Arc<ClientConfig> {
        self.current_config.clone()
    }

    async fn read_config_file(path: &Path, required: bool) -> Result<ConfigFile> {
        if !required && !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(ConfigFile::default());
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::LoadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let file: ConfigFile = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            reason: format!("{}: {}", path.display(), e),
        })?;

        debug!("Loaded config file {}", path.display());
        Ok(file)
    }

    /// Merge every source into a validated `ClientConfig`.
    ///
    /// Precedence: overrides > config file > secrets file.
    pub fn resolve(
        file: ConfigFile,
        secrets: &SecretsLoader,
        overrides: ConfigOverrides,
    ) -> Result<ClientConfig> {
        let backend = file.backend;

        let url = overrides
            .url
            .or(backend.url)
            .map(|u| normalize_base_url(u.trim()))
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ConfigError::MissingRequired {
                field: "backend.url".to_string(),
            })?;

        let api_key = overrides
            .api_key
            .or(backend.api_key)
            .or_else(|| secrets.api_key().map(str::to_string))
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ConfigError::MissingRequired {
                field: "backend.api_key".to_string(),
            })?;

        if backend.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "backend.timeout_seconds".to_string(),
                reason: "must be greater than zero".to_string(),
            }
            .into());
        }

        let accept_invalid_certs = overrides.insecure || backend.accept_invalid_certs;

        Ok(ClientConfig::new(url, api_key)
            .with_timeout(Duration::from_secs(backend.timeout_seconds))
            .with_accept_invalid_certs(accept_invalid_certs))
    }
}

fn secrets_path_for(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(defaults::SECRETS_FILE),
        _ => PathBuf::from(defaults::SECRETS_FILE),
    }
}
