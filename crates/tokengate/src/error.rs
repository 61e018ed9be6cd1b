//! Error types for authentication and introspection
//!
//! The externally visible surface is deliberately coarse: middleware
//! collapses every [`AuthError`] into a single `401 Unauthorized` response,
//! so none of the detail below ever reaches an HTTP caller. The detail
//! exists for logs and for hosts that call
//! [`Authenticator::authenticate`](crate::Authenticator::authenticate)
//! directly.

use http::StatusCode;
use thiserror::Error;

/// Failures while resolving a request's authentication state.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The `Authorization` header is absent or not of the form
    /// `Bearer <token>`.
    #[error("missing or malformed Authorization header")]
    MissingOrMalformedHeader,

    /// The token could not be validated - transport failure and an
    /// explicitly inactive token are deliberately indistinguishable here.
    #[error(transparent)]
    Introspection(#[from] IntrospectionError),

    /// A guard was constructed through the process-wide convenience path
    /// before any [`AuthConfig`](crate::AuthConfig) was bound.
    ///
    /// This is a setup-time programming error, surfaced at construction so
    /// misconfiguration cannot manifest as silent per-request 401s.
    #[error("no authentication configuration bound; call AuthConfig::bind_global first or construct Authenticator::new with an explicit config")]
    ConfigurationUnbound,
}

/// Failures of a single introspection round trip.
///
/// Every variant means the same thing to a caller holding a token:
/// "could not validate". The split exists only for logging.
#[derive(Debug, Error)]
pub enum IntrospectionError {
    /// The request never completed (connect, TLS, timeout, ...).
    #[error("introspection request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("introspection endpoint returned {0}")]
    Status(StatusCode),

    /// The endpoint answered 2xx but the body was not a valid
    /// introspection response.
    #[error("malformed introspection response: {0}")]
    Malformed(#[source] reqwest::Error),

    /// The endpoint reported the token as not active (or omitted the
    /// `active` field entirely).
    #[error("token is not active")]
    Inactive,
}
