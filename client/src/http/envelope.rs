//! The JSON envelope every backend reply is wrapped in, plus typed views of
//! the payloads carried by `status` and `stats`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::errors::{ClientError, Result};

/// Decoded `{ "ok": bool, "message"?: string, ... }` reply, kept whole
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Envelope(Map<String, Value>);

impl Envelope {
    /// Decode a raw response body. Empty, non-JSON and non-object bodies are
    /// rejected with a human-readable reason.
    pub fn from_body(body: &[u8]) -> std::result::Result<Self, String> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err("empty response body".to_string());
        }

        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(other) => Err(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            )),
            Err(e) => Err(format!("malformed JSON: {}", e)),
        }
    }

    /// Whether the backend reported success. A missing `ok` counts as failure.
    pub fn ok(&self) -> bool {
        self.0.get("ok").map(is_truthy).unwrap_or(false)
    }

    /// The `message` field; non-string messages are rendered as JSON text
    pub fn message(&self) -> Option<String> {
        match self.0.get("message")? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Deserialize one payload field
    pub fn field<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self.0.get(key).ok_or_else(|| ClientError::Payload {
            field: key.to_string(),
            reason: "field is missing".to_string(),
        })?;

        serde_json::from_value(value.clone()).map_err(|e| ClientError::Payload {
            field: key.to_string(),
            reason: e.to_string(),
        })
    }

    /// Typed view of the `status` payload returned by `get_status`
    pub fn nginx_status(&self) -> Result<NginxStatus> {
        let raw: String = self.field("status")?;
        Ok(NginxStatus { raw })
    }

    /// Typed view of the `stats` payload returned by `get_stats`.
    ///
    /// The backend may send the stats either as an object or as a JSON
    /// document encoded into a string.
    pub fn stats(&self) -> Result<Stats> {
        match self.0.get("stats") {
            Some(Value::String(encoded)) => {
                serde_json::from_str(encoded).map_err(|e| ClientError::Payload {
                    field: "stats".to_string(),
                    reason: e.to_string(),
                })
            }
            _ => self.field("stats"),
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Envelope {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Envelope> for Value {
    fn from(envelope: Envelope) -> Self {
        Value::Object(envelope.0)
    }
}

/// Loose truthiness for the `ok` flag: null, false, zero, "", "0" and empty
/// collections are all false.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// nginx service state as reported by `systemctl is-active nginx`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NginxStatus {
    raw: String,
}

impl NginxStatus {
    /// State without the trailing newline, e.g. `active`, `inactive`, `failed`
    pub fn state(&self) -> &str {
        self.raw.trim()
    }

    pub fn is_active(&self) -> bool {
        self.state() == "active"
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for NginxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.state())
    }
}

/// Backend host statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ports: Vec<String>,
    pub domain_count: u64,
    pub cpu_load: String,
    pub ram_usage: String,
    pub cpu_usage: String,
    pub upload: String,
    pub download: String,
}

// An empty port list arrives as `null`
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ports = if self.ports.is_empty() {
            "-".to_string()
        } else {
            self.ports.join(", ")
        };
        writeln!(f, "Ports:     {}", ports)?;
        writeln!(f, "Domains:   {}", self.domain_count)?;
        writeln!(f, "CPU load:  {}", self.cpu_load)?;
        writeln!(f, "CPU usage: {}", self.cpu_usage)?;
        writeln!(f, "RAM usage: {}", self.ram_usage)?;
        writeln!(f, "Upload:    {}", self.upload)?;
        write!(f, "Download:  {}", self.download)
    }
}
