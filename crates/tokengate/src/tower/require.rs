//! The enforcing guard phase

use std::task::{Context, Poll};

use futures_util::future::BoxFuture;
use tower::Layer;
use tower_service::Service;

use crate::authenticator::Authenticator;
use crate::context::AuthContext;
use crate::error::AuthError;

use super::unauthorized;

/// Tower Layer for the guard phase.
///
/// The wrapped service requires a resolved [`AuthContext`]. One already
/// present in the request extensions (typically attached by
/// [`AuthParserLayer`](super::AuthParserLayer)) is trusted as-is - the
/// guard never introspects a token the parser already validated. Otherwise
/// it resolves the bearer token on demand, and any failure - missing
/// header, malformed header, inactive token, unreachable authority -
/// collapses to the same `401 Unauthorized` response.
///
/// Once the guard forwards a request, it is out of the picture: errors from
/// the inner service propagate to the host untouched.
#[derive(Debug, Clone)]
pub struct RequireAuthLayer {
    authenticator: Authenticator,
}

impl RequireAuthLayer {
    /// Create a guard layer bound to an [`Authenticator`].
    pub fn new(authenticator: Authenticator) -> Self {
        Self { authenticator }
    }

    /// Create a guard layer from the process-wide configuration.
    ///
    /// # Errors
    ///
    /// Fails with [`AuthError::ConfigurationUnbound`] when
    /// [`AuthConfig::bind_global`](crate::AuthConfig::bind_global) was never
    /// called - at construction time, so startup aborts instead of every
    /// request failing.
    pub fn from_bound() -> Result<Self, AuthError> {
        Ok(Self::new(Authenticator::from_bound()?))
    }
}

impl<S> Layer<S> for RequireAuthLayer {
    type Service = RequireAuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequireAuthService {
            inner,
            authenticator: self.authenticator.clone(),
        }
    }
}

/// Tower Service for the guard phase. See [`RequireAuthLayer`].
#[derive(Debug, Clone)]
pub struct RequireAuthService<S> {
    inner: S,
    authenticator: Authenticator,
}

impl<S> RequireAuthService<S> {
    /// Get a reference to the inner service
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S, B, ResBody> Service<http::Request<B>> for RequireAuthService<S>
where
    S: Service<http::Request<B>, Response = http::Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send,
    B: Send + 'static,
    ResBody: From<&'static str>,
{
    type Response = http::Response<ResBody>;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: http::Request<B>) -> Self::Future {
        let inner = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, inner);

        // Already resolved upstream: single-call guarantee.
        if req.extensions().get::<AuthContext>().is_some() {
            return Box::pin(async move { inner.call(req).await });
        }

        let authenticator = self.authenticator.clone();

        Box::pin(async move {
            match authenticator.authenticate(req.headers()).await {
                Ok(ctx) => {
                    req.extensions_mut().insert(ctx);
                    inner.call(req).await
                }
                Err(err) => {
                    if let AuthError::Introspection(ref cause) = err {
                        tracing::warn!(error = %cause, "token introspection failed; rejecting request");
                    }
                    Ok(unauthorized())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;

    #[test]
    fn layer_wraps_service() {
        let authenticator = Authenticator::new(&AuthConfig::new("id", "secret")).unwrap();
        let layer = RequireAuthLayer::new(authenticator);

        let svc = tower::service_fn(|_req: http::Request<String>| async move {
            Ok::<_, std::convert::Infallible>(http::Response::new(String::new()))
        });
        let _wrapped = layer.layer(svc);
    }
}
