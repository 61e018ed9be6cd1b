//! # Tokengate - Bearer Token Authentication via Introspection
//!
//! Tower middleware that gates HTTP request pipelines on OAuth2 token
//! introspection (RFC 7662-style). Every bearer token is validated against
//! the authorization server's introspection endpoint in real time - there is
//! no local signature validation, no caching, and therefore no revocation
//! lag.
//!
//! ## Design Principles
//!
//! - **Two-Phase Authentication**: a non-enforcing [`AuthParserLayer`] that
//!   opportunistically resolves auth state, and an enforcing
//!   [`RequireAuthLayer`] that rejects requests without it
//! - **Single Source of Truth**: ONE [`AuthContext`] type attached to the
//!   request extensions and read by every downstream handler
//! - **Framework-Agnostic**: the core operates on `http::Request<B>` through
//!   Tower traits; any Tower-compatible framework can host it unmodified
//! - **Opaque Failures**: every validation failure collapses to the same
//!   `401 Unauthorized` response - callers never learn whether a token was
//!   inactive, malformed, or unreachable
//!
//! ## Architecture
//!
//! - [`config`] - `AuthConfig` credentials and the optional process-wide binding
//! - [`introspection`] - the outbound introspection client and wire types
//! - [`context`] - the per-request `AuthContext` value
//! - [`authenticator`] - binds one configuration to a parser/guard pair
//! - [`tower`] - the Tower `Layer`/`Service` implementations
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tokengate::{AuthConfig, Authenticator};
//! use tower::ServiceBuilder;
//!
//! # fn example() -> Result<(), tokengate::AuthError> {
//! let auth = Authenticator::new(&AuthConfig::new("my-client-id", "my-client-secret"))?;
//!
//! let service = ServiceBuilder::new()
//!     // Optional: resolve auth for every request without enforcing it
//!     .layer(auth.parser_layer())
//!     // Required: reject unauthenticated requests with 401
//!     .layer(auth.require_layer())
//!     .service_fn(|req: http::Request<String>| async move {
//!         let ctx = req.extensions().get::<tokengate::AuthContext>();
//!         Ok::<_, std::convert::Infallible>(http::Response::new(format!("{ctx:?}")))
//!     });
//! # Ok(())
//! # }
//! ```
//!
//! ## Two-Phase Flow
//!
//! The parser is safe to mount globally: it introspects at most once per
//! request and never alters the response. The guard is mounted on protected
//! routes only; when the parser already attached an [`AuthContext`] the
//! guard proceeds without a second introspection call, otherwise it resolves
//! the token itself on demand.
//!
//! Per-request state machine: `Unauthenticated -> Authenticated` on a valid
//! token, terminal for the lifetime of the request; anything else stays
//! `Unauthenticated` (and is rejected by the guard, if present).

// Submodules
pub mod authenticator;
pub mod config;
pub mod context;
pub mod error;
pub mod introspection;
pub mod tower;

// Re-export the primary surface
#[doc(inline)]
pub use authenticator::Authenticator;
#[doc(inline)]
pub use config::AuthConfig;
#[doc(inline)]
pub use context::AuthContext;
#[doc(inline)]
pub use error::{AuthError, IntrospectionError};
#[doc(inline)]
pub use introspection::{IntrospectionClient, IntrospectionResponse, TokenTypeHint};
#[doc(inline)]
pub use self::tower::{AuthParserLayer, RequireAuthLayer};
