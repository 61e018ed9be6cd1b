//! # Tower Middleware Integration
//!
//! The two authentication phases as Tower `Layer`/`Service` pairs:
//!
//! - [`AuthParserLayer`] / [`AuthParserService`] - non-enforcing: resolves
//!   auth state when a valid bearer token is present, always forwards the
//!   request, never errors
//! - [`RequireAuthLayer`] / [`RequireAuthService`] - enforcing: requires a
//!   resolved [`AuthContext`](crate::AuthContext), rejecting anything else
//!   with `401 Unauthorized`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tower::ServiceBuilder;
//! use tokengate::{AuthConfig, Authenticator};
//!
//! let auth = Authenticator::new(&config)?;
//!
//! let service = ServiceBuilder::new()
//!     .layer(auth.parser_layer())
//!     .layer(auth.require_layer())
//!     .service(my_inner_service);
//! ```
//!
//! Stacking both is the common shape for a mixed router: the parser runs
//! everywhere so even public handlers can personalize for authenticated
//! callers, and the guard wraps only the protected subset. When the parser
//! already attached a context, the guard forwards without a second
//! introspection call.
//!
//! ## Request Extensions
//!
//! On successful validation the `AuthContext` is inserted into the
//! request's extensions, where inner services and handlers can read it:
//!
//! ```rust,ignore
//! if let Some(ctx) = req.extensions().get::<AuthContext>() {
//!     println!("authenticated subject: {:?}", ctx.payload.sub);
//! }
//! ```

mod parse;
mod require;

pub use parse::{AuthParserLayer, AuthParserService};
pub use require::{RequireAuthLayer, RequireAuthService};

/// The single externally visible rejection: `401`, plain `"Unauthorized"`
/// body, no custom headers. Built directly as an `http::Response` so the
/// guard composes with infallible services (axum handlers in particular).
fn unauthorized<ResBody>() -> http::Response<ResBody>
where
    ResBody: From<&'static str>,
{
    let mut response = http::Response::new(ResBody::from("Unauthorized"));
    *response.status_mut() = http::StatusCode::UNAUTHORIZED;
    response
}
