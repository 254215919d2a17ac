//! Secrets loader for the backend API key.
//!
//! The key may live in a separate TOML file (secrets.toml, next to the main
//! config) so the main config can be committed without it.
//!
//! Example secrets.toml:
//! ```toml
//! api_key = "secret-api-key"
//! ```

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::errors::{ConfigError, Result};

/// Structure matching the secrets.toml file format
#[derive(Debug, Deserialize, Default)]
pub struct SecretsFile {
    pub api_key: Option<String>,
}

/// Loader for secrets from the secrets.toml file
pub struct SecretsLoader {
    secrets: SecretsFile,
}

impl SecretsLoader {
    /// Load secrets from the specified file path.
    /// Returns an empty loader if the file doesn't exist.
    pub fn load(secrets_path: &Path) -> Result<Self> {
        if !secrets_path.exists() {
            debug!("No secrets file at {:?}", secrets_path);
            return Ok(Self::empty());
        }

        let content =
            std::fs::read_to_string(secrets_path).map_err(|e| ConfigError::LoadFailed {
                path: secrets_path.display().to_string(),
                reason: e.to_string(),
            })?;

        let secrets: SecretsFile = toml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                reason: format!("{}: {}", secrets_path.display(), e),
            }
        })?;

        debug!("Loaded secrets from {:?}", secrets_path);

        Ok(Self { secrets })
    }

    pub fn empty() -> Self {
        Self {
            secrets: SecretsFile::default(),
        }
    }

    pub fn api_key(&self) -> Option<&str> {
        self.secrets.api_key.as_deref()
    }
}
