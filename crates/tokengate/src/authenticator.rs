//! Binding one configuration to a parser/guard pair
//!
//! [`Authenticator`] is the construction point for the whole crate: it takes
//! one [`AuthConfig`], builds one shared [`IntrospectionClient`], and hands
//! out the two middleware phases bound to it. Constructing both layers from
//! the same `Authenticator` is what guarantees they share credentials (and a
//! connection pool) consistently.

use std::sync::Arc;

use http::HeaderMap;
use http::header::AUTHORIZATION;

use crate::config::AuthConfig;
use crate::context::AuthContext;
use crate::error::AuthError;
use crate::introspection::{IntrospectionClient, TokenTypeHint};
use crate::tower::{AuthParserLayer, RequireAuthLayer};

/// One configuration, bound to one introspection client, producing the
/// parser and guard layers.
///
/// # Example
///
/// ```rust,no_run
/// use tokengate::{AuthConfig, Authenticator};
///
/// # fn example() -> Result<(), tokengate::AuthError> {
/// let auth = Authenticator::new(&AuthConfig::new("client_id", "client_secret"))?;
/// let parser = auth.parser_layer();   // mount globally, never rejects
/// let guard = auth.require_layer();   // mount on protected routes
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Authenticator {
    client: Arc<IntrospectionClient>,
}

impl Authenticator {
    /// Bind an explicit configuration. This is the recommended path.
    ///
    /// # Errors
    ///
    /// Fails only if the underlying HTTP client cannot be built.
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        Ok(Self {
            client: Arc::new(IntrospectionClient::new(config)?),
        })
    }

    /// Bind the process-wide configuration set by
    /// [`AuthConfig::bind_global`].
    ///
    /// # Errors
    ///
    /// Fails with [`AuthError::ConfigurationUnbound`] when no configuration
    /// was ever bound. This happens here, at setup time, so a missing
    /// binding aborts startup instead of surfacing as per-request 401s.
    pub fn from_bound() -> Result<Self, AuthError> {
        let config = AuthConfig::bound().ok_or(AuthError::ConfigurationUnbound)?;
        Self::new(config)
    }

    /// The shared introspection client.
    pub fn client(&self) -> &Arc<IntrospectionClient> {
        &self.client
    }

    /// Resolve the authentication state for a set of request headers.
    ///
    /// This is the framework-agnostic core both middleware phases are built
    /// on; hosts that are not Tower-based can call it directly.
    ///
    /// # Errors
    ///
    /// - [`AuthError::MissingOrMalformedHeader`] when no usable
    ///   `Bearer <token>` credential is present
    /// - [`AuthError::Introspection`] when the token could not be validated
    pub async fn authenticate(&self, headers: &HeaderMap) -> Result<AuthContext, AuthError> {
        let token = bearer_token(headers).ok_or(AuthError::MissingOrMalformedHeader)?;
        let payload = self
            .client
            .introspect(token, TokenTypeHint::AccessToken)
            .await?;
        Ok(AuthContext::new(token.to_owned(), payload))
    }

    /// The non-enforcing phase: resolves auth state when it can, always
    /// forwards the request.
    pub fn parser_layer(&self) -> AuthParserLayer {
        AuthParserLayer::new(self.clone())
    }

    /// The enforcing phase: rejects requests without valid auth state with
    /// `401 Unauthorized`.
    pub fn require_layer(&self) -> RequireAuthLayer {
        RequireAuthLayer::new(self.clone())
    }
}

/// Extract the bearer token from the `Authorization` header.
///
/// Header-name lookup is case-insensitive (a property of `HeaderMap`); the
/// value must be exactly `Bearer <token>` with a non-empty token. Anything
/// else counts as "no credentials offered".
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    if token.is_empty() { None } else { Some(token) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(bearer_token(&headers_with("Bearer abc123")), Some("abc123"));
    }

    #[test]
    fn header_name_lookup_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Bearer abc123"));
        assert_eq!(bearer_token(&headers), Some("abc123"));
    }

    #[test]
    fn rejects_missing_and_malformed_values() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
        assert_eq!(bearer_token(&headers_with("Basic abc123")), None);
        assert_eq!(bearer_token(&headers_with("bearer abc123")), None);
        assert_eq!(bearer_token(&headers_with("Bearer")), None);
        assert_eq!(bearer_token(&headers_with("Bearer ")), None);
    }

    #[test]
    fn token_may_itself_contain_spaces() {
        // Everything after the scheme prefix is the opaque token.
        assert_eq!(bearer_token(&headers_with("Bearer a b")), Some("a b"));
    }
}
