use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::redirect::Policy;
use reqwest::Client;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use super::envelope::Envelope;
use super::operations::{HttpMethod, Operation};
use crate::config::ClientConfig;
use crate::constants::http::{CONTENT_TYPE_JSON, MAX_REDIRECTS};
use crate::errors::{ClientError, Result};

/// Client for one cdng backend.
///
/// Holds only immutable configuration and a thread-safe `reqwest::Client`, so
/// it can be cloned freely and shared across tasks.
#[derive(Clone)]
pub struct RemoteClient {
    config: Arc<ClientConfig>,
    client: Client,
}

impl RemoteClient {
    /// Build a client with default settings. The URL and key are not
    /// validated here; a bad URL surfaces as a transport error on first use.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        Self::from_config(ClientConfig::new(base_url, api_key))
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        if config.accept_invalid_certs {
            warn!(
                "TLS certificate verification is disabled for {}",
                config.base_url
            );
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| ClientError::Transport {
                url: config.base_url.clone(),
                reason: error_chain(&e),
            })?;

        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Join an endpoint onto the base URL with exactly one slash
    pub fn url_for(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url,
            endpoint.trim_start_matches('/')
        )
    }

    /// Issue a request with a verb given as text (case-insensitive)
    pub async fn request(
        &self,
        method: &str,
        endpoint: &str,
        body: Option<&Map<String, Value>>,
    ) -> Result<Envelope> {
        let method: HttpMethod = method.parse()?;
        self.send(method, endpoint, body).await
    }

    /// Run one backend operation
    pub async fn execute(&self, operation: &Operation) -> Result<Envelope> {
        let endpoint = operation.endpoint()?;
        let body = operation.body();
        self.send(operation.method(), &endpoint, body.as_ref())
            .await
    }

    /// Send a single request and unwrap the envelope.
    ///
    /// Transport failures are reported before the body is looked at. The HTTP
    /// status is carried into errors but never decides success.
    pub async fn send(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: Option<&Map<String, Value>>,
    ) -> Result<Envelope> {
        let url = self.url_for(endpoint);

        let mut builder = self
            .client
            .request(method.to_reqwest(), &url)
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key));

        if method.carries_body() {
            let payload = Value::Object(body.cloned().unwrap_or_default());
            builder = builder.json(&payload);
        } else if body.is_some() {
            debug!("Ignoring request body for {} {}", method, url);
        }

        debug!("Sending {} {}", method, url);

        let response = builder.send().await.map_err(|e| ClientError::Transport {
            url: url.clone(),
            reason: error_chain(&e),
        })?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(|e| ClientError::Transport {
            url: url.clone(),
            reason: error_chain(&e),
        })?;

        debug!("{} {} -> HTTP {} ({} bytes)", method, url, status, bytes.len());

        let envelope = Envelope::from_body(&bytes).map_err(|reason| ClientError::Decode {
            url: url.clone(),
            status,
            reason,
        })?;

        if !envelope.ok() {
            let message = envelope.message().unwrap_or_default();
            warn!("Backend rejected {} {}: {}", method, url, message);
            return Err(ClientError::Api {
                url,
                status,
                message,
            });
        }

        Ok(envelope)
    }

    // === Domain Operations ===

    pub async fn add_domain(&self, domain: &str, ip: &str) -> Result<Envelope> {
        self.execute(&Operation::AddDomain {
            domain: domain.to_string(),
            ip: ip.to_string(),
        })
        .await
    }

    pub async fn delete_domain(&self, domain: &str) -> Result<Envelope> {
        self.execute(&Operation::DeleteDomain {
            domain: domain.to_string(),
        })
        .await
    }

    // === Port Operations ===

    /// The backend expects the port as a string on the wire
    pub async fn add_port(&self, port: impl fmt::Display) -> Result<Envelope> {
        self.execute(&Operation::AddPort {
            port: port.to_string(),
        })
        .await
    }

    pub async fn delete_port(&self, port: impl fmt::Display) -> Result<Envelope> {
        self.execute(&Operation::DeletePort {
            port: port.to_string(),
        })
        .await
    }

    // === Nginx Service Operations ===

    pub async fn get_status(&self) -> Result<Envelope> {
        self.execute(&Operation::Status).await
    }

    pub async fn reload_nginx(&self) -> Result<Envelope> {
        self.execute(&Operation::Reload).await
    }

    pub async fn stop_nginx(&self) -> Result<Envelope> {
        self.execute(&Operation::Stop).await
    }

    pub async fn restart_nginx(&self) -> Result<Envelope> {
        self.execute(&Operation::Restart).await
    }

    pub async fn get_stats(&self) -> Result<Envelope> {
        self.execute(&Operation::Stats).await
    }
}

impl fmt::Debug for RemoteClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Render an error with all of its causes, `outer: inner: root`
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.ends_with(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}
