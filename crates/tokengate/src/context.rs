//! Per-request authentication context
//!
//! [`AuthContext`] is the value the middleware attaches to a request's
//! extensions once a bearer token has been validated. It exists only for
//! tokens the authority reported as active: handlers can treat its presence
//! as proof of authentication and never need to re-check `payload.active`.

use serde::Serialize;

use crate::introspection::IntrospectionResponse;

/// Validated authentication state for one request.
///
/// Created by the parser or the guard, never mutated afterwards, dropped
/// with the request. A request carries either no context (unauthenticated)
/// or exactly one.
///
/// # Example
///
/// ```rust,ignore
/// // In a downstream service or handler:
/// if let Some(ctx) = req.extensions().get::<AuthContext>() {
///     println!("authenticated subject: {:?}", ctx.payload.sub);
/// }
/// ```
#[derive(Clone, Serialize)]
pub struct AuthContext {
    /// The raw bearer token the request presented.
    pub token: String,

    /// The full introspection response, including any claims the authority
    /// attached. `payload.active` is always `true`.
    pub payload: IntrospectionResponse,
}

// Manual Debug impl to prevent token exposure in logs
impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("token", &"[REDACTED]")
            .field("payload", &self.payload)
            .finish()
    }
}

impl AuthContext {
    /// Build a context from a token and the introspection response that
    /// validated it.
    pub(crate) fn new(token: String, payload: IntrospectionResponse) -> Self {
        Self { token, payload }
    }

    /// Look up a claim by name, covering both the typed RFC 7662 fields and
    /// any additional claims the authority returned.
    pub fn claim(&self, name: &str) -> Option<serde_json::Value> {
        self.payload.claim(name)
    }
}
