//! Error types for the cdng client
//!
//! Every remote call fails in one of a few well-defined ways: the request never
//! completed, the backend refused it through the envelope, or the reply could
//! not be understood.

use std::fmt;

/// Main error type for the cdng client
#[derive(Debug)]
pub enum ClientError {
    /// Network, DNS, TLS or timeout failure. The response body was never read.
    Transport { url: String, reason: String },

    /// The backend answered with `ok` unset or false
    Api {
        url: String,
        status: u16,
        message: String,
    },

    /// The backend answered with something that is not a JSON envelope
    Decode {
        url: String,
        status: u16,
        reason: String,
    },

    /// A successful envelope whose payload field is missing or malformed
    Payload { field: String, reason: String },

    /// A domain or port that cannot be placed in a URL path segment
    InvalidPathSegment { field: &'static str, value: String },

    /// HTTP verb outside GET/POST/PUT/DELETE
    UnsupportedMethod { method: String },

    /// Configuration-related errors
    Config(ConfigError),
}

/// Configuration error variants
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to load configuration file
    LoadFailed { path: String, reason: String },

    /// Invalid configuration value
    InvalidValue { field: String, reason: String },

    /// Missing required configuration
    MissingRequired { field: String },

    /// Configuration parsing error
    ParseError { reason: String },
}

impl ClientError {
    /// Message carried by an API error, if this is one
    pub fn api_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            ClientError::Decode { .. } | ClientError::Payload { .. }
        )
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Transport { url, reason } => {
                write!(f, "Request to {} failed: {}", url, reason)
            }
            ClientError::Api { message, .. } if message.is_empty() => {
                write!(f, "Backend rejected the request without a message")
            }
            ClientError::Api { message, .. } => write!(f, "{}", message),
            ClientError::Decode {
                url,
                status,
                reason,
            } => {
                write!(
                    f,
                    "Invalid response from {} (HTTP {}): {}",
                    url, status, reason
                )
            }
            ClientError::Payload { field, reason } => {
                write!(f, "Invalid '{}' payload: {}", field, reason)
            }
            ClientError::InvalidPathSegment { field, value } => {
                write!(f, "Invalid {} '{}': not usable as a URL path segment", field, value)
            }
            ClientError::UnsupportedMethod { method } => {
                write!(f, "Unsupported HTTP method: {}", method)
            }
            ClientError::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path, reason)
            }
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
            ConfigError::MissingRequired { field } => {
                write!(f, "Missing required field: {}", field)
            }
            ConfigError::ParseError { reason } => {
                write!(f, "Failed to parse config: {}", reason)
            }
        }
    }
}

impl std::error::Error for ClientError {}
impl std::error::Error for ConfigError {}

impl From<ConfigError> for ClientError {
    fn from(err: ConfigError) -> Self {
        ClientError::Config(err)
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
