use serde_json::{json, Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::errors::ClientError;

/// HTTP verbs the backend understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Only POST and PUT requests carry a JSON body
    pub fn carries_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }

    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl FromStr for HttpMethod {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(ClientError::UnsupportedMethod {
                method: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One remote operation exposed by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    AddDomain { domain: String, ip: String },
    DeleteDomain { domain: String },
    AddPort { port: String },
    DeletePort { port: String },
    Status,
    Reload,
    Stop,
    Restart,
    Stats,
}

impl Operation {
    /// Route name, also used as the CLI subcommand
    pub fn name(&self) -> &'static str {
        match self {
            Operation::AddDomain { .. } => "add-domain",
            Operation::DeleteDomain { .. } => "delete-domain",
            Operation::AddPort { .. } => "add-port",
            Operation::DeletePort { .. } => "delete-port",
            Operation::Status => "status",
            Operation::Reload => "reload",
            Operation::Stop => "stop",
            Operation::Restart => "restart",
            Operation::Stats => "stats",
        }
    }

    pub fn method(&self) -> HttpMethod {
        match self {
            Operation::AddDomain { .. }
            | Operation::AddPort { .. }
            | Operation::Reload
            | Operation::Stop
            | Operation::Restart => HttpMethod::Post,
            Operation::DeleteDomain { .. } | Operation::DeletePort { .. } => HttpMethod::Delete,
            Operation::Status | Operation::Stats => HttpMethod::Get,
        }
    }

    /// Path relative to the base URL, with interpolated values percent-encoded.
    /// Values that would not stay inside their own segment are rejected.
    pub fn endpoint(&self) -> Result<String, ClientError> {
        let segment = match self {
            Operation::DeleteDomain { domain } => path_segment("domain", domain)?,
            Operation::DeletePort { port } => path_segment("port", port)?,
            _ => return Ok(self.name().to_string()),
        };
        Ok(format!("{}/{}", self.name(), segment))
    }

    pub fn body(&self) -> Option<Map<String, Value>> {
        let body = match self {
            Operation::AddDomain { domain, ip } => json!({ "domain": domain, "ip": ip }),
            Operation::AddPort { port } => json!({ "port": port }),
            _ => return None,
        };
        match body {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Line printed by the CLI when the backend sends no message of its own
    pub fn success_message(&self) -> &'static str {
        match self {
            Operation::AddDomain { .. } => "Domain added successfully.",
            Operation::DeleteDomain { .. } => "Domain deleted successfully.",
            Operation::AddPort { .. } => "Port added successfully.",
            Operation::DeletePort { .. } => "Port deleted successfully.",
            Operation::Status => "Status retrieved.",
            Operation::Reload => "Nginx reloaded successfully.",
            Operation::Stop => "Nginx stopped successfully.",
            Operation::Restart => "Nginx restarted successfully.",
            Operation::Stats => "Stats retrieved.",
        }
    }
}

/// Encode `value` as one path segment.
///
/// Empty values and the dot segments `.` and `..` are collapsed by URL
/// parsing, so they are refused instead of encoded.
fn path_segment(field: &'static str, value: &str) -> Result<String, ClientError> {
    if value.is_empty() || value == "." || value == ".." {
        return Err(ClientError::InvalidPathSegment {
            field,
            value: value.to_string(),
        });
    }
    Ok(encode_path_segment(value))
}

/// Percent-encode a value so it occupies exactly one path segment.
///
/// Alphanumerics and `-._*` pass through, so domains and port numbers are
/// unchanged.
pub fn encode_path_segment(value: &str) -> String {
    // form encoding turns spaces into '+' and literal '+' into %2B
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
