//! # Tokengate Axum Adapter
//!
//! Thin translation layer between [`tokengate`]'s framework-agnostic core
//! and axum handlers. The core layers already compose with axum routers
//! (they operate on `http::Request<B>` through Tower); this crate only adds
//! the handler-side ergonomics: extractors that read the per-request
//! [`AuthContext`] out of the request extensions.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use axum::{Json, Router, routing::get};
//! use tokengate::{AuthConfig, Authenticator};
//! use tokengate_axum::{Auth, MaybeAuth};
//!
//! # fn example() -> Result<(), tokengate::AuthError> {
//! let auth = Authenticator::new(&AuthConfig::new("client-id", "client-secret"))?;
//!
//! async fn profile(Auth(ctx): Auth) -> Json<tokengate::IntrospectionResponse> {
//!     Json(ctx.payload)
//! }
//!
//! async fn landing(MaybeAuth(ctx): MaybeAuth) -> String {
//!     match ctx {
//!         Some(ctx) => format!("hello, {:?}", ctx.payload.username),
//!         None => "hello, anonymous".to_string(),
//!     }
//! }
//!
//! let app: Router = Router::new()
//!     // Protected routes sit under the guard...
//!     .route("/profile", get(profile))
//!     .layer(auth.require_layer())
//!     // ...public routes only under the parser.
//!     .route("/", get(landing))
//!     .layer(auth.parser_layer());
//! # Ok(())
//! # }
//! ```

use axum::extract::FromRequestParts;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use http::request::Parts;

#[doc(inline)]
pub use tokengate::{AuthContext, AuthParserLayer, Authenticator, RequireAuthLayer};

/// Extractor for the validated [`AuthContext`] of the current request.
///
/// Intended for handlers behind [`RequireAuthLayer`], where the context is
/// guaranteed to exist. Used without the guard it doubles as a per-handler
/// enforcer: a missing context rejects the request with the same
/// `401 Unauthorized` the guard produces.
#[derive(Debug, Clone)]
pub struct Auth(pub AuthContext);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = Unauthorized;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .map(Auth)
            .ok_or(Unauthorized)
    }
}

/// Extractor for handlers that serve both authenticated and anonymous
/// callers (parser-only routes).
#[derive(Debug, Clone)]
pub struct MaybeAuth(pub Option<AuthContext>);

impl<S> FromRequestParts<S> for MaybeAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuth(parts.extensions.get::<AuthContext>().cloned()))
    }
}

/// Rejection for [`Auth`]: the same opaque response the guard sends.
#[derive(Debug, Clone, Copy)]
pub struct Unauthorized;

impl IntoResponse for Unauthorized {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
    }
}
