//! The non-enforcing parser phase

use std::task::{Context, Poll};

use futures_util::future::BoxFuture;
use tower::Layer;
use tower_service::Service;

use crate::authenticator::{Authenticator, bearer_token};

/// Tower Layer for the parser phase.
///
/// Safe to mount globally: the wrapped service attempts to resolve auth
/// state for every request carrying a bearer token, attaches an
/// [`AuthContext`](crate::AuthContext) on success, and otherwise forwards the request
/// untouched. Its public contract is "always continues; presence of the
/// context is the only signal" - it never rejects and never produces an
/// error of its own.
#[derive(Debug, Clone)]
pub struct AuthParserLayer {
    authenticator: Authenticator,
}

impl AuthParserLayer {
    /// Create a parser layer bound to an [`Authenticator`].
    pub fn new(authenticator: Authenticator) -> Self {
        Self { authenticator }
    }
}

impl<S> Layer<S> for AuthParserLayer {
    type Service = AuthParserService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthParserService {
            inner,
            authenticator: self.authenticator.clone(),
        }
    }
}

/// Tower Service for the parser phase. See [`AuthParserLayer`].
#[derive(Debug, Clone)]
pub struct AuthParserService<S> {
    inner: S,
    authenticator: Authenticator,
}

impl<S> AuthParserService<S> {
    /// Get a reference to the inner service
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S, B> Service<http::Request<B>> for AuthParserService<S>
where
    S: Service<http::Request<B>> + Clone + Send + 'static,
    S::Future: Send,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: http::Request<B>) -> Self::Future {
        let authenticator = self.authenticator.clone();
        let inner = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, inner);

        // No bearer credential offered: nothing to resolve.
        if bearer_token(req.headers()).is_none() {
            return Box::pin(async move { inner.call(req).await });
        }

        Box::pin(async move {
            match authenticator.authenticate(req.headers()).await {
                Ok(ctx) => {
                    req.extensions_mut().insert(ctx);
                }
                Err(err) => {
                    // Swallowed by contract: the request continues
                    // unauthenticated and a later guard (if any) decides.
                    tracing::debug!(error = %err, "bearer token did not validate; continuing unauthenticated");
                }
            }
            inner.call(req).await
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
        let layer = AuthParserLayer::new(authenticator);

        let svc = tower::service_fn(|_req: http::Request<String>| async move {
            Ok::<_, std::convert::Infallible>(http::Response::new(String::new()))
        });
        let _wrapped = layer.layer(svc);
    }
}
