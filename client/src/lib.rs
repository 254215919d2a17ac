pub mod config;
pub mod constants;
pub mod errors;
pub mod http;

// Re-export commonly used types
pub use config::{ClientConfig, ConfigManager, ConfigOverrides};
pub use errors::{ClientError, ConfigError, Result};
pub use http::{Envelope, HttpMethod, NginxStatus, Operation, RemoteClient, Stats};
