//! Common test data and constants

use serde_json::{json, Value};
use std::net::TcpListener;

pub const TEST_API_KEY: &str = "test-api-key";

/// Common test domains
pub mod domains {
    pub const EXAMPLE: &str = "example.com";
    pub const SUBDOMAIN: &str = "cdn.example.org";
}

pub const TEST_IP: &str = "1.2.3.4";

/// Stats payload shaped like the backend's
pub fn sample_stats() -> Value {
    json!({
        "ports": ["80", "443", "8443"],
        "domain_count": 2,
        "cpu_load": "0.15/2",
        "ram_usage": "512/2048 MB",
        "cpu_usage": "25%",
        "upload": "0.50/Mb",
        "download": "1.75/Mb"
    })
}

/// A local URL nothing is listening on
pub fn unused_local_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
