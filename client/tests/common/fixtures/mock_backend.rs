//! Mock cdng backend for testing
//!
//! A wiremock server that answers the backend routes with canned envelopes,
//! so client behaviour can be checked without a real nginx host.

use serde_json::{json, Value};
use std::time::Duration;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, Request, ResponseTemplate,
};

use super::test_data::TEST_API_KEY;

/// Mock backend server that simulates cdng HTTP responses
pub struct MockBackendServer {
    pub server: MockServer,
    pub base_url: String,
}

impl MockBackendServer {
    /// Create a new mock backend server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();
        Self { server, base_url }
    }

    /// Respond to an authenticated `verb /route` with an arbitrary JSON body
    pub async fn mock_json(&self, verb: &str, route: &str, status: u16, body: Value) {
        Mock::given(method(verb))
            .and(path(route))
            .and(header("authorization", format!("Bearer {}", TEST_API_KEY).as_str()))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Successful envelope with a message, like the backend's mutating routes
    pub async fn mock_ok(&self, verb: &str, route: &str, message: &str) {
        self.mock_json(verb, route, 200, json!({"ok": true, "message": message}))
            .await;
    }

    /// Failed envelope, as the backend sends for rejected operations
    pub async fn mock_rejected(&self, verb: &str, route: &str, status: u16, message: &str) {
        self.mock_json(verb, route, status, json!({"ok": false, "message": message}))
            .await;
    }

    /// Raw, possibly non-JSON body
    pub async fn mock_raw(&self, verb: &str, route: &str, status: u16, body: &str) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// nginx status route
    pub async fn mock_status(&self, state: &str) {
        self.mock_json("GET", "/status", 200, json!({"ok": true, "status": state}))
            .await;
    }

    /// Stats route, with the payload JSON-encoded into a string
    pub async fn mock_stats(&self, stats: Value) {
        let encoded = serde_json::to_string_pretty(&stats).unwrap();
        self.mock_json("GET", "/stats", 200, json!({"ok": true, "stats": encoded}))
            .await;
    }

    /// Route that answers only after `delay`
    pub async fn mock_slow(&self, verb: &str, route: &str, delay: Duration) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"ok": true}))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    /// Redirect `from` to `to` on this server
    pub async fn mock_redirect(&self, verb: &str, from: &str, to: &str) {
        Mock::given(method(verb))
            .and(path(from))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("location", format!("{}{}", self.base_url, to).as_str()),
            )
            .mount(&self.server)
            .await;
    }

    /// Everything the server has received so far
    pub async fn requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// The single request received so far
    pub async fn only_request(&self) -> Request {
        let mut requests = self.requests().await;
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.remove(0)
    }
}
