//! Central repository for client constants
//!
//! Timeouts, defaults and environment variable names live here so the client,
//! the config loader and the CLI agree on them.

/// HTTP client constants
pub mod http {
    /// Maximum redirect hops followed before giving up
    pub const MAX_REDIRECTS: usize = 10;

    pub const CONTENT_TYPE_JSON: &str = "application/json";
}

/// Default configuration values
pub mod defaults {
    /// Default request timeout in seconds
    pub const TIMEOUT_SECONDS: u64 = 3;

    /// Config file looked up in the working directory
    pub const CONFIG_FILE: &str = "cdng.toml";

    /// Secrets file looked up next to the config file
    pub const SECRETS_FILE: &str = "secrets.toml";
}

/// Environment variables that override the config file
pub mod env {
    pub const URL: &str = "CDNG_URL";
    pub const API_KEY: &str = "CDNG_API_KEY";
}
