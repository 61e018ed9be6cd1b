//! Common test utilities for integration tests
//!
//! Provides a mock authority exposing the `/introspect` endpoint, plus the
//! configuration pointing at it.

#![allow(dead_code)]

use serde_json::json;
use tokengate::AuthConfig;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock authorization server with a token introspection endpoint.
pub struct MockAuthority {
    pub server: MockServer,
}

impl MockAuthority {
    /// Start a fresh mock authority.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// A configuration pointing at this authority.
    pub fn config(&self) -> AuthConfig {
        AuthConfig::new("test-client-id", "test-client-secret").with_base_url(self.server.uri())
    }

    /// Introspection of `token` succeeds with `active: true` plus `claims`,
    /// and is expected to be called exactly `expected_calls` times.
    pub async fn mock_active(&self, token: &str, claims: serde_json::Value, expected_calls: u64) {
        let mut body = json!({"active": true});
        body.as_object_mut()
            .unwrap()
            .extend(claims.as_object().unwrap().clone());

        Mock::given(method("POST"))
            .and(path("/introspect"))
            .and(body_partial_json(json!({"token": token})))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(expected_calls)
            .mount(&self.server)
            .await;
    }

    /// Introspection of any token reports `active: false`.
    pub async fn mock_inactive(&self) {
        Mock::given(method("POST"))
            .and(path("/introspect"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"active": false})))
            .mount(&self.server)
            .await;
    }

    /// Introspection of any token fails with the given HTTP status.
    pub async fn mock_error(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path("/introspect"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Introspection answers 2xx with a body that is not JSON.
    pub async fn mock_garbage(&self) {
        Mock::given(method("POST"))
            .and(path("/introspect"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&self.server)
            .await;
    }

    /// A configuration whose authority is no longer listening.
    ///
    /// A dropped `MockServer::start()` server goes back to wiremock's pool
    /// and keeps listening, so instead bind an ephemeral port ourselves and
    /// release it before handing out the address.
    pub async fn unreachable_config() -> AuthConfig {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let uri = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);
        AuthConfig::new("test-client-id", "test-client-secret").with_base_url(uri)
    }
}
