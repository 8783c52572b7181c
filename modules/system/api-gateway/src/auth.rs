use std::sync::Arc;

use authkit_security::Client;
use authn_resolver::Authenticator;
use authn_resolver_sdk::AuthNResolverError;
use axum::extract::{FromRequestParts, MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use http::request::Parts;

use crate::problem::Problem;

/// Shared state for the authentication middleware.
#[derive(Clone)]
pub struct AuthState {
    pub authenticator: Arc<Authenticator>,
}

impl AuthState {
    #[must_use]
    pub fn new(authenticator: Arc<Authenticator>) -> Self {
        Self { authenticator }
    }
}

/// Authentication middleware backed by the [`Authenticator`].
///
/// For each request:
/// 1. Names the resource after the matched route, or the URI path when no route matched
/// 2. Runs the strategy chain and attaches the resolved [`Client`] to the request
/// 3. Answers with a problem response when no client could be resolved
pub async fn authn_middleware(
    State(state): State<AuthState>,
    req: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = req.into_parts();
    let resource_name = resource_name(&parts);

    match state.authenticator.auth(&mut parts, &resource_name) {
        Ok(()) => next.run(Request::from_parts(parts, body)).await,
        Err(err) => {
            log_authn_error(&err);
            Problem::from(&err).into_response()
        }
    }
}

fn resource_name(parts: &Parts) -> String {
    parts.extensions.get::<MatchedPath>().map_or_else(
        || parts.uri.path().to_owned(),
        |path| path.as_str().to_owned(),
    )
}

fn log_authn_error(err: &AuthNResolverError) {
    match err {
        AuthNResolverError::AuthenticationIsNotAvailable { .. } => {
            tracing::debug!("AuthN rejected: {err}");
        }
        AuthNResolverError::Strategy { .. } => tracing::error!("AuthN strategy failure: {err}"),
    }
}

/// Extractor for the client attached by [`authn_middleware`].
///
/// Rejects with a 500 problem when the middleware is not installed on the route.
#[derive(Debug, Clone)]
pub struct AuthClient(pub Client);

impl<S> FromRequestParts<S> for AuthClient
where
    S: Send + Sync,
{
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Client>()
            .cloned()
            .map(Self)
            .ok_or_else(|| {
                tracing::error!("Client extractor used on a route without authn_middleware");
                Problem::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    "Auth middleware not configured",
                )
            })
    }
}
