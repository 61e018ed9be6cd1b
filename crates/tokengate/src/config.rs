//! Authentication configuration
//!
//! An [`AuthConfig`] is the `{client_id, client_secret}` pair (plus the
//! authority base URL) that a parser/guard pair is bound to at construction
//! time. It is immutable once bound and safe to read concurrently from any
//! number of in-flight requests.
//!
//! # Explicit vs. process-wide binding
//!
//! The recommended path is explicit: pass the config into
//! [`Authenticator::new`](crate::Authenticator::new) and derive both layers
//! from the returned value. For multi-file setups where threading the config
//! around is awkward, [`AuthConfig::bind_global`] stores it once per process
//! and [`Authenticator::from_bound`](crate::Authenticator::from_bound) picks
//! it up - failing fast at construction if nothing was ever bound.

use once_cell::sync::OnceCell;
use secrecy::SecretString;
use serde::Deserialize;

/// Default authority base URL; the introspection endpoint lives at
/// `{base_url}/introspect`.
pub const DEFAULT_BASE_URL: &str = "https://auth.blitzware.xyz/api/auth";

static BOUND: OnceCell<AuthConfig> = OnceCell::new();

/// Client credentials for the token introspection endpoint.
///
/// # Example
///
/// ```rust
/// use tokengate::AuthConfig;
///
/// let config = AuthConfig::new("my-client-id", "my-client-secret")
///     .with_base_url("https://auth.example.com/api/auth");
/// ```
#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    /// OAuth2 client identifier presented to the introspection endpoint.
    pub client_id: String,

    /// OAuth2 client secret. Wrapped so it cannot leak through `Debug`
    /// or accidental serialization.
    pub client_secret: SecretString,

    /// Authority base URL (no trailing `/introspect`).
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

// Manual Debug impl to prevent client_secret exposure in logs
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl AuthConfig {
    /// Create a configuration for the default hosted authority.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::new(client_secret.into()),
            base_url: default_base_url(),
        }
    }

    /// Point the configuration at a self-hosted authority.
    ///
    /// A trailing slash is tolerated; the introspection endpoint is always
    /// `{base_url}/introspect`.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Bind this configuration process-wide.
    ///
    /// The first binding wins; later calls are ignored (with a warning) so
    /// the configuration stays immutable for every guard already derived
    /// from it.
    pub fn bind_global(self) {
        if BOUND.set(self).is_err() {
            tracing::warn!("global auth configuration already bound; keeping the first binding");
        }
    }

    /// The process-wide configuration, if [`bind_global`](Self::bind_global)
    /// has ever been called.
    pub fn bound() -> Option<&'static AuthConfig> {
        BOUND.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn debug_redacts_secret() {
        let config = AuthConfig::new("id-1", "tell-no-one");
        let rendered = format!("{config:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("tell-no-one"));
    }

    #[test]
    fn base_url_defaults_and_overrides() {
        let config = AuthConfig::new("id", "secret");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);

        let config = config.with_base_url("https://auth.example.com");
        assert_eq!(config.base_url, "https://auth.example.com");
    }

    #[test]
    fn deserializes_without_base_url() {
        let config: AuthConfig =
            serde_json::from_str(r#"{"client_id": "id", "client_secret": "s3cret"}"#).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.client_secret.expose_secret(), "s3cret");
    }
}
