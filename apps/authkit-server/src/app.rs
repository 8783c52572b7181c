//! Wiring: strategies, authenticator and router.

use std::sync::Arc;

use anyhow::Context;
use api_gateway::{AuthClient, AuthState, RoutePolicies, authn_middleware, route_policy_middleware};
use authn_resolver::Authenticator;
use authn_resolver_sdk::AuthStrategy;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::{Json, Router};
use jwt_authn_plugin::{JwtStrategy, KeycloakStrategy};
use serde_json::{Value, json};
use static_authn_plugin::StaticStrategy;

use crate::config::AppConfig;

/// Build the strategy chain in priority order: keycloak, jwt, static.
///
/// # Errors
///
/// Fails if a strategy is misconfigured or none is configured at all.
pub fn build_authenticator(cfg: &AppConfig) -> anyhow::Result<Authenticator> {
    let mut strategies: Vec<Arc<dyn AuthStrategy>> = Vec::new();

    if let Some(keycloak) = &cfg.keycloak_authn {
        strategies.push(Arc::new(
            KeycloakStrategy::from_config(keycloak).context("keycloak_authn")?,
        ));
    }
    if let Some(jwt) = &cfg.jwt_authn {
        strategies.push(Arc::new(JwtStrategy::from_config(jwt).context("jwt_authn")?));
    }
    if let Some(static_authn) = &cfg.static_authn {
        strategies.push(Arc::new(StaticStrategy::from_config(static_authn)));
    }

    anyhow::ensure!(
        !strategies.is_empty(),
        "no authentication strategy configured (keycloak_authn, jwt_authn or static_authn)"
    );

    Ok(Authenticator::from_config(&cfg.authn).with_strategies(strategies))
}

/// Build the HTTP router.
///
/// `/health` is public; every other route requires an authenticated client
/// and is checked against the configured policies.
///
/// # Errors
///
/// Fails on an invalid policy table.
pub fn build_router(cfg: &AppConfig, authenticator: Arc<Authenticator>) -> anyhow::Result<Router> {
    let policies = RoutePolicies::from_config(&cfg.policies).context("policies")?;

    Ok(Router::new()
        .route("/whoami", get(whoami))
        .layer(from_fn_with_state(policies, route_policy_middleware))
        .layer(from_fn_with_state(
            AuthState::new(authenticator),
            authn_middleware,
        ))
        .route("/health", get(health)))
}

async fn whoami(AuthClient(client): AuthClient) -> Json<Value> {
    Json(json!({
        "user_id": client.user_id(),
        "login": client.login(),
        "name": client.name(),
        "email": client.email(),
        "groups": client.groups(),
        "permissions": client.permissions(),
    }))
}

async fn health() -> &'static str {
    "ok"
}
