//! Test configuration builder for writing cdng.toml / secrets.toml to a temp dir

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Builder for creating test configurations
pub struct TestConfigBuilder {
    temp_dir: TempDir,
    url: Option<String>,
    api_key: Option<String>,
    timeout_seconds: Option<u64>,
    accept_invalid_certs: Option<bool>,
    secrets_api_key: Option<String>,
    raw: Option<String>,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self {
            temp_dir,
            url: None,
            api_key: None,
            timeout_seconds: None,
            accept_invalid_certs: None,
            secrets_api_key: None,
            raw: None,
        }
    }

    pub fn url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    pub fn api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    pub fn timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = Some(accept);
        self
    }

    /// Write a secrets.toml next to the config
    pub fn secrets_api_key(mut self, key: &str) -> Self {
        self.secrets_api_key = Some(key.to_string());
        self
    }

    /// Use this text verbatim as cdng.toml
    pub fn raw(mut self, content: &str) -> Self {
        self.raw = Some(content.to_string());
        self
    }

    fn to_toml(&self) -> String {
        let mut toml = String::from("[backend]\n");
        if let Some(url) = &self.url {
            toml.push_str(&format!("url = \"{}\"\n", url));
        }
        if let Some(key) = &self.api_key {
            toml.push_str(&format!("api_key = \"{}\"\n", key));
        }
        if let Some(timeout) = self.timeout_seconds {
            toml.push_str(&format!("timeout_seconds = {}\n", timeout));
        }
        if let Some(accept) = self.accept_invalid_certs {
            toml.push_str(&format!("accept_invalid_certs = {}\n", accept));
        }
        toml
    }

    /// Build and write config files to the temp directory
    pub fn build(self) -> TestConfig {
        let config_path = self.temp_dir.path().join("cdng.toml");
        let content = self.raw.clone().unwrap_or_else(|| self.to_toml());
        fs::write(&config_path, content).expect("Failed to write cdng.toml");

        if let Some(key) = &self.secrets_api_key {
            fs::write(
                self.temp_dir.path().join("secrets.toml"),
                format!("api_key = \"{}\"\n", key),
            )
            .expect("Failed to write secrets.toml");
        }

        TestConfig {
            _temp_dir: self.temp_dir,
            config_path,
        }
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Config files on disk; removed when dropped
pub struct TestConfig {
    _temp_dir: TempDir,
    pub config_path: PathBuf,
}
