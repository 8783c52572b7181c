#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for the auth middleware stack
//!
//! These tests verify that:
//! 1. Requests nobody can authenticate get a 401 problem
//! 2. Authenticated clients lacking a permission get a 403 problem
//! 3. Allowed clients reach the handler, which sees the attached client
//! 4. Routes without the authn layer stay public

use std::sync::Arc;

use api_gateway::{
    AuthClient, AuthState, PolicyState, RoutePolicies, RoutePolicyConfig, authn_middleware,
    authz_middleware, route_policy_middleware,
};
use authkit_security::{Group, Permission, Policy};
use authn_resolver::Authenticator;
use authz_resolver_sdk::Gate;
use axum::{
    Json, Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
    middleware::from_fn_with_state,
    routing::{delete, get},
};
use serde_json::{Value, json};
use static_authn_plugin::StaticStrategy;
use static_authn_plugin::config::{AuthNMode, IdentityConfig, StaticAuthNPluginConfig, TokenMapping};
use tower::ServiceExt;

fn identity(login: &str, groups: &[&str]) -> IdentityConfig {
    IdentityConfig {
        login: login.to_owned(),
        name: login.to_owned(),
        groups: groups.iter().map(|g| (*g).to_owned()).collect(),
        ..IdentityConfig::default()
    }
}

fn authenticator() -> Arc<Authenticator> {
    let strategy = StaticStrategy::from_config(&StaticAuthNPluginConfig {
        mode: AuthNMode::StaticTokens,
        tokens: vec![
            TokenMapping {
                token: "admin-token".to_owned(),
                identity: identity("admin", &["admins"]),
            },
            TokenMapping {
                token: "reader-token".to_owned(),
                identity: identity("reader", &["readers"]),
            },
        ],
        ..StaticAuthNPluginConfig::default()
    });

    let app_groups = vec![
        Group::new("admins").with_permissions([
            Permission::new("orders.read"),
            Permission::new("orders.delete"),
        ]),
        Group::new("readers").with_permissions([Permission::new("orders.read")]),
    ];

    Arc::new(Authenticator::new(app_groups).with_strategy(strategy))
}

async fn whoami(AuthClient(client): AuthClient) -> Json<Value> {
    Json(json!({
        "login": client.login(),
        "permissions": client.permissions(),
    }))
}

async fn health() -> &'static str {
    "ok"
}

/// Router guarding one route with `authz_middleware`.
fn gated_router() -> Router {
    let delete_gate = Gate::new(
        "Orders.delete",
        Policy::from(Permission::new("orders.delete")),
    );

    let orders = Router::new()
        .route("/orders/{id}", delete(whoami))
        .route_layer(from_fn_with_state(
            PolicyState::new(delete_gate),
            authz_middleware,
        ));

    Router::new()
        .route("/whoami", get(whoami))
        .merge(orders)
        .layer(from_fn_with_state(
            AuthState::new(authenticator()),
            authn_middleware,
        ))
        .route("/health", get(health))
}

/// Router guarding routes from a configured policy table.
fn configured_router() -> Router {
    let policies = RoutePolicies::from_config(&[RoutePolicyConfig {
        method: "DELETE".to_owned(),
        path: "/orders/{id}".to_owned(),
        resource_name: Some("Orders.delete".to_owned()),
        permissions: vec!["orders.delete".to_owned()],
        groups: Vec::new(),
    }])
    .unwrap();

    Router::new()
        .route("/whoami", get(whoami))
        .route("/orders/{id}", delete(whoami))
        .layer(from_fn_with_state(policies, route_policy_middleware))
        .layer(from_fn_with_state(
            AuthState::new(authenticator()),
            authn_middleware,
        ))
}

fn request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn send(router: Router, req: Request<Body>) -> (StatusCode, Option<String>, Value) {
    let response = router.oneshot(req).await.expect("Request failed");
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_owned());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, content_type, json)
}

#[tokio::test]
async fn missing_credentials_is_401_problem() {
    let (status, content_type, body) =
        send(gated_router(), request(Method::GET, "/whoami", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(content_type.as_deref(), Some("application/problem+json"));
    assert_eq!(body["code"], "auth.authentication_is_not_available");
    assert_eq!(body["resource_name"], "/whoami");
    assert_eq!(
        body["detail"],
        "Authentication is not available, resource is [/whoami]"
    );
}

#[tokio::test]
async fn unknown_token_is_401() {
    let (status, _, _) = send(
        gated_router(),
        request(Method::GET, "/whoami", Some("forged")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn authenticated_client_reaches_handler() {
    let (status, _, body) = send(
        gated_router(),
        request(Method::GET, "/whoami", Some("reader-token")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["login"], "reader");
    assert_eq!(body["permissions"], json!(["orders.read"]));
}

#[tokio::test]
async fn lacking_permission_is_403_problem() {
    let (status, content_type, body) = send(
        gated_router(),
        request(Method::DELETE, "/orders/7", Some("reader-token")),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(content_type.as_deref(), Some("application/problem+json"));
    assert_eq!(body["code"], "auth.permission_denied");
    assert_eq!(body["detail"], "Permission denied, resource is [Orders.delete]");
}

#[tokio::test]
async fn allowed_client_passes_gate() {
    let (status, _, body) = send(
        gated_router(),
        request(Method::DELETE, "/orders/7", Some("admin-token")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["login"], "admin");
}

#[tokio::test]
async fn public_route_needs_no_credentials() {
    let response = gated_router()
        .oneshot(request(Method::GET, "/health", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn configured_policies_guard_matching_routes() {
    let (status, _, body) = send(
        configured_router(),
        request(Method::DELETE, "/orders/1", Some("reader-token")),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["resource_name"], "Orders.delete");

    let (status, _, _) = send(
        configured_router(),
        request(Method::DELETE, "/orders/1", Some("admin-token")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Routes without a rule only need authentication.
    let (status, _, _) = send(
        configured_router(),
        request(Method::GET, "/whoami", Some("reader-token")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn extractor_without_middleware_is_500() {
    let router = Router::new().route("/whoami", get(whoami));

    let (status, _, body) = send(router, request(Method::GET, "/whoami", None)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Auth middleware not configured");
}

#[tokio::test]
async fn gate_without_authn_is_500() {
    let router = Router::new()
        .route("/orders/{id}", delete(whoami))
        .route_layer(from_fn_with_state(
            PolicyState::new(Gate::new("Orders.delete", Permission::new("orders.delete"))),
            authz_middleware,
        ));

    let (status, _, body) = send(router, request(Method::DELETE, "/orders/1", None)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "auth.client_not_attached");
}
