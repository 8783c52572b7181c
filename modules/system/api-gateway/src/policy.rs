//! Authorization middleware.
//!
//! Two ways to attach policies: [`authz_middleware`] guards the routes it is
//! layered on with one [`Gate`]; [`route_policy_middleware`] looks the gate up
//! by method and path in a [`RoutePolicies`] table built from configuration.

use std::collections::HashMap;
use std::sync::Arc;

use authkit_security::{Group, Permission, Policy};
use authkit_spec::and_;
use authz_resolver_sdk::{Gate, authorize_request};
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::Method;
use thiserror::Error;

use crate::config::RoutePolicyConfig;
use crate::problem::Problem;

/// Shared state for [`authz_middleware`].
#[derive(Clone)]
pub struct PolicyState {
    pub gate: Arc<Gate>,
}

impl PolicyState {
    #[must_use]
    pub fn new(gate: Gate) -> Self {
        Self {
            gate: Arc::new(gate),
        }
    }
}

/// Check the attached client against the gate of [`PolicyState`].
///
/// Must run after [`crate::authn_middleware`].
pub async fn authz_middleware(
    State(state): State<PolicyState>,
    req: Request,
    next: Next,
) -> Response {
    guard(req, &state.gate, next).await
}

async fn guard(req: Request, gate: &Gate, next: Next) -> Response {
    let (parts, body) = req.into_parts();
    let outcome = authorize_request(&parts, gate.spec(), gate.resource_name()).map(|_| ());

    match outcome {
        Ok(()) => next.run(Request::from_parts(parts, body)).await,
        Err(err) => Problem::from(&err).into_response(),
    }
}

/// Errors building a [`RoutePolicies`] table.
#[derive(Debug, Error)]
pub enum RoutePolicyError {
    #[error("invalid HTTP method `{0}`")]
    InvalidMethod(String),

    #[error("failed to insert route pattern '{path}': {source}")]
    InvalidPattern {
        path: String,
        #[source]
        source: matchit::InsertError,
    },

    #[error("policy for '{path}' lists no permissions and no groups")]
    EmptyPolicy { path: String },
}

/// Gates per HTTP method, matched by route pattern.
#[derive(Clone, Default)]
pub struct RoutePolicies {
    routes: Arc<HashMap<Method, matchit::Router<Arc<Gate>>>>,
}

impl RoutePolicies {
    /// Build the table from configuration.
    ///
    /// # Errors
    ///
    /// - `InvalidMethod` for an unparsable method
    /// - `InvalidPattern` for a malformed or duplicate route pattern
    /// - `EmptyPolicy` for a rule without permissions and groups
    pub fn from_config(policies: &[RoutePolicyConfig]) -> Result<Self, RoutePolicyError> {
        let mut routes: HashMap<Method, matchit::Router<Arc<Gate>>> = HashMap::new();

        for cfg in policies {
            let method = Method::from_bytes(cfg.method.to_ascii_uppercase().as_bytes())
                .map_err(|_| RoutePolicyError::InvalidMethod(cfg.method.clone()))?;
            let gate = Gate::new(cfg.resource_name(), policy_for(cfg)?);

            routes
                .entry(method)
                .or_insert_with(matchit::Router::new)
                .insert(cfg.path.clone(), Arc::new(gate))
                .map_err(|source| RoutePolicyError::InvalidPattern {
                    path: cfg.path.clone(),
                    source,
                })?;
        }

        Ok(Self {
            routes: Arc::new(routes),
        })
    }

    /// Gate guarding `(method, path)`, if any.
    #[must_use]
    pub fn resolve(&self, method: &Method, path: &str) -> Option<&Arc<Gate>> {
        self.routes
            .get(method)
            .and_then(|router| router.at(path).ok())
            .map(|matched| matched.value)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn policy_for(cfg: &RoutePolicyConfig) -> Result<Policy, RoutePolicyError> {
    let permissions = cfg.permissions.iter().map(|p| Policy::from(Permission::new(p)));
    let groups = cfg.groups.iter().map(|g| Policy::from(Group::new(g)));

    and_(permissions.chain(groups)).map_err(|_| RoutePolicyError::EmptyPolicy {
        path: cfg.path.clone(),
    })
}

/// Check the attached client against the gate configured for the request's route.
///
/// Routes without a configured gate only need an authenticated client.
/// Must run after [`crate::authn_middleware`].
pub async fn route_policy_middleware(
    State(policies): State<RoutePolicies>,
    req: Request,
    next: Next,
) -> Response {
    let Some(gate) = policies.resolve(req.method(), req.uri().path()).cloned() else {
        return next.run(req).await;
    };

    guard(req, &gate, next).await
}
