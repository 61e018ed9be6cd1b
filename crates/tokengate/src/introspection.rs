//! OAuth 2.0 Token Introspection (RFC 7662-style)
//!
//! Real-time token validation against the authority's introspection
//! endpoint. There is deliberately no caching, no retrying, and no timeout
//! override: every call is a fresh round trip, so revocation takes effect
//! immediately and the authority's availability directly bounds throughput.
//!
//! # Wire format
//!
//! The endpoint is `POST {base_url}/introspect` with a JSON body
//! `{token, token_type_hint, client_id, client_secret}` (not the RFC 7662
//! form encoding). The underlying client keeps a cookie store so that
//! deployments fronted by session-affine infrastructure keep working.
//!
//! # Example
//!
//! ```rust,no_run
//! use tokengate::{AuthConfig, IntrospectionClient, TokenTypeHint};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = IntrospectionClient::new(&AuthConfig::new("client_id", "client_secret"))?;
//!
//! let response = client.introspect("access_token_here", TokenTypeHint::AccessToken).await?;
//! println!("subject: {:?}", response.sub);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::AuthConfig;
use crate::error::IntrospectionError;

/// Hint for the kind of token being introspected (RFC 7662 Section 2.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenTypeHint {
    /// An access token (the default for middleware-driven validation).
    #[default]
    AccessToken,
    /// A refresh token.
    RefreshToken,
}

/// Introspection request body.
#[derive(Clone, Serialize)]
struct IntrospectionRequest<'a> {
    token: &'a str,
    token_type_hint: TokenTypeHint,
    client_id: &'a str,
    client_secret: &'a str,
}

// Manual Debug impl to prevent token/secret exposure in logs
impl std::fmt::Debug for IntrospectionRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntrospectionRequest")
            .field("token", &"[REDACTED]")
            .field("token_type_hint", &self.token_type_hint)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// Token introspection response per RFC 7662 Section 2.2.
///
/// Beyond `active`, the claim set is defined by the authority, not by this
/// crate: common RFC 7662 claims get typed fields and everything else lands
/// in [`additional`](Self::additional).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IntrospectionResponse {
    /// Whether the token is currently active. Absent is treated as `false`.
    #[serde(default)]
    pub active: bool,

    /// Scope(s) associated with the token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// Client identifier the token was issued to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// Username (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Token type (Bearer, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,

    /// Expiration timestamp (seconds since epoch)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,

    /// Issued at timestamp (seconds since epoch)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,

    /// Not before timestamp (seconds since epoch)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<u64>,

    /// Subject
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Audience
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<Value>,

    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Token identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    /// Claims outside the RFC 7662 set (display name, roles, ...)
    #[serde(flatten)]
    pub additional: HashMap<String, Value>,
}

impl IntrospectionResponse {
    /// Look up a claim by name across typed fields and
    /// [`additional`](Self::additional).
    pub fn claim(&self, name: &str) -> Option<Value> {
        match name {
            "active" => Some(Value::Bool(self.active)),
            "scope" => self.scope.clone().map(Value::String),
            "client_id" => self.client_id.clone().map(Value::String),
            "username" => self.username.clone().map(Value::String),
            "token_type" => self.token_type.clone().map(Value::String),
            "exp" => self.exp.map(Value::from),
            "iat" => self.iat.map(Value::from),
            "nbf" => self.nbf.map(Value::from),
            "sub" => self.sub.clone().map(Value::String),
            "aud" => self.aud.clone(),
            "iss" => self.iss.clone().map(Value::String),
            "jti" => self.jti.clone().map(Value::String),
            other => self.additional.get(other).cloned(),
        }
    }
}

/// Client for the authority's token introspection endpoint.
///
/// Cheap to clone is not a goal here; wrap it in an `Arc` (which
/// [`Authenticator`](crate::Authenticator) does) to share one connection
/// pool and cookie store across the parser and the guard.
pub struct IntrospectionClient {
    /// Fully resolved introspection endpoint URL
    endpoint: String,

    /// Client ID for authentication
    client_id: String,

    /// Client secret for authentication
    client_secret: SecretString,

    /// HTTP client (connection pool + cookie store)
    http_client: reqwest::Client,
}

// Manual Debug impl to prevent client_secret exposure in logs
impl std::fmt::Debug for IntrospectionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntrospectionClient")
            .field("endpoint", &self.endpoint)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("http_client", &"<reqwest::Client>")
            .finish()
    }
}

impl IntrospectionClient {
    /// Create a client bound to one configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IntrospectionError::Transport`] if the underlying HTTP
    /// client cannot be built (a setup-time TLS/backend problem, not a
    /// per-request condition).
    pub fn new(config: &AuthConfig) -> Result<Self, IntrospectionError> {
        // Cookie store enabled so session credentials set by the authority
        // are replayed on subsequent calls.
        let http_client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(IntrospectionError::Transport)?;

        Ok(Self {
            endpoint: format!("{}/introspect", config.base_url.trim_end_matches('/')),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            http_client,
        })
    }

    /// The resolved introspection endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Introspect a token.
    ///
    /// # Errors
    ///
    /// Fails with an [`IntrospectionError`] when the round trip fails, the
    /// endpoint answers non-2xx, the body is malformed, or the token is not
    /// active. To a caller holding a token these all mean the same thing:
    /// the token could not be validated.
    pub async fn introspect(
        &self,
        token: &str,
        token_type_hint: TokenTypeHint,
    ) -> Result<IntrospectionResponse, IntrospectionError> {
        use secrecy::ExposeSecret;

        let body = IntrospectionRequest {
            token,
            token_type_hint,
            client_id: &self.client_id,
            client_secret: self.client_secret.expose_secret(),
        };

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(IntrospectionError::Transport)?;

        if !response.status().is_success() {
            return Err(IntrospectionError::Status(response.status()));
        }

        let introspection_response = response
            .json::<IntrospectionResponse>()
            .await
            .map_err(IntrospectionError::Malformed)?;

        if !introspection_response.active {
            return Err(IntrospectionError::Inactive);
        }

        Ok(introspection_response)
    }

    /// Check whether a token is currently active (convenience method).
    ///
    /// Unlike [`introspect`](Self::introspect) this does not treat an
    /// inactive token as an error; it only fails when the endpoint could
    /// not be consulted at all.
    ///
    /// # Errors
    ///
    /// Returns the transport-level [`IntrospectionError`] variants only.
    pub async fn is_token_active(&self, token: &str) -> Result<bool, IntrospectionError> {
        match self.introspect(token, TokenTypeHint::AccessToken).await {
            Ok(_) => Ok(true),
            Err(IntrospectionError::Inactive) => Ok(false),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_serializes_hint_in_snake_case() {
        let body = IntrospectionRequest {
            token: "tok",
            token_type_hint: TokenTypeHint::AccessToken,
            client_id: "id",
            client_secret: "secret",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["token_type_hint"], "access_token");
        assert_eq!(json["token"], "tok");
        assert_eq!(json["client_id"], "id");
        assert_eq!(json["client_secret"], "secret");
    }

    #[test]
    fn request_debug_redacts_credentials() {
        let body = IntrospectionRequest {
            token: "opaque-bearer-value",
            token_type_hint: TokenTypeHint::RefreshToken,
            client_id: "id",
            client_secret: "hunter2",
        };
        let rendered = format!("{body:?}");
        assert!(!rendered.contains("opaque-bearer-value"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn response_missing_active_defaults_to_inactive() {
        let response: IntrospectionResponse =
            serde_json::from_str(r#"{"sub": "123"}"#).unwrap();
        assert!(!response.active);
    }

    #[test]
    fn response_keeps_unknown_claims() {
        let json = r#"{"active": true, "sub": "123", "name": "Bob", "scope": "read write"}"#;
        let response: IntrospectionResponse = serde_json::from_str(json).unwrap();

        assert!(response.active);
        assert_eq!(response.sub.as_deref(), Some("123"));
        assert_eq!(response.scope.as_deref(), Some("read write"));
        assert_eq!(
            response.additional.get("name"),
            Some(&Value::String("Bob".into()))
        );
        assert_eq!(response.claim("name"), Some(Value::String("Bob".into())));
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let config =
            AuthConfig::new("id", "secret").with_base_url("https://auth.example.com/api/auth/");
        let client = IntrospectionClient::new(&config).unwrap();
        assert_eq!(client.endpoint(), "https://auth.example.com/api/auth/introspect");
    }
}
