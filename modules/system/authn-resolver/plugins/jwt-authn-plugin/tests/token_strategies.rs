#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Signed-token round trips through both strategies.

use std::sync::Arc;

use authkit_security::{AppGroups, Group, Permission, UserId};
use authn_resolver_sdk::{AuthStrategy, StrategyError};
use http::request::Parts;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode, get_current_timestamp};
use jwt_authn_plugin::{
    JwtAuthNPluginConfig, JwtStrategy, KeycloakAuthNPluginConfig, KeycloakStrategy,
};
use secrecy::SecretString;
use serde_json::json;

const SECRET: &str = "integration-secret";
const RSA_PRIVATE: &str = include_str!("fixtures/rsa_private.pem");
const RSA_PUBLIC: &str = include_str!("fixtures/rsa_public.b64");
const RSA_OTHER_PUBLIC: &str = include_str!("fixtures/rsa_other_public.b64");

fn app_groups() -> AppGroups {
    Arc::from(vec![
        Group::new("admins").with_permissions([Permission::new("edit"), Permission::new("delete")]),
    ])
}

fn request(authorization: &str) -> Parts {
    http::Request::builder()
        .uri("/orders")
        .header(http::header::AUTHORIZATION, authorization)
        .body(())
        .unwrap()
        .into_parts()
        .0
}

fn jwt_strategy() -> JwtStrategy {
    JwtStrategy::from_config(&JwtAuthNPluginConfig {
        secret: SecretString::from(SECRET.to_owned()),
        ..JwtAuthNPluginConfig::default()
    })
    .unwrap()
}

fn hs256(claims: &serde_json::Value, secret: &str) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn rs256(claims: &serde_json::Value) -> String {
    encode(
        &Header::new(Algorithm::RS256),
        claims,
        &EncodingKey::from_rsa_pem(RSA_PRIVATE.as_bytes()).unwrap(),
    )
    .unwrap()
}

fn keycloak_strategy(public_key: &str) -> KeycloakStrategy {
    KeycloakStrategy::from_config(&KeycloakAuthNPluginConfig {
        public_key: public_key.to_owned(),
        ..KeycloakAuthNPluginConfig::default()
    })
    .unwrap()
}

#[test]
fn jwt_round_trip_builds_client() {
    let token = hs256(
        &json!({
            "sub": 7,
            "login": "jdoe",
            "name": "John Doe",
            "groups": "admins",
            "exp": get_current_timestamp() + 600,
        }),
        SECRET,
    );

    let client = jwt_strategy()
        .get_client(&request(&format!("Bearer {token}")), &app_groups())
        .unwrap();

    assert_eq!(client.user_id(), &UserId::Int(7));
    assert_eq!(client.login(), "jdoe");
    assert!(client.has_permission("delete"));
}

#[test]
fn jwt_accepts_bare_token() {
    let token = hs256(&json!({ "sub": 1, "login": "a", "name": "A" }), SECRET);
    let client = jwt_strategy().get_client(&request(&token), &app_groups()).unwrap();
    assert_eq!(client.login(), "a");
}

#[test]
fn jwt_rejects_audience_nobody_configured() {
    let token = hs256(
        &json!({ "sub": 1, "login": "a", "name": "A", "aud": "billing" }),
        SECRET,
    );

    let err = jwt_strategy()
        .get_client(&request(&format!("Bearer {token}")), &app_groups())
        .unwrap_err();
    assert!(err.is_authentication_failure());
}

#[test]
fn jwt_accepts_configured_audience() {
    let mut cfg = JwtAuthNPluginConfig {
        secret: SecretString::from(SECRET.to_owned()),
        ..JwtAuthNPluginConfig::default()
    };
    cfg.options.audience = vec!["billing".to_owned()];
    let strategy = JwtStrategy::from_config(&cfg).unwrap();

    let token = hs256(
        &json!({ "sub": 1, "login": "a", "name": "A", "aud": "billing" }),
        SECRET,
    );
    let client = strategy
        .get_client(&request(&format!("Bearer {token}")), &app_groups())
        .unwrap();
    assert_eq!(client.login(), "a");
}

#[test]
fn jwt_with_wrong_secret_is_decoding_error() {
    let token = hs256(&json!({ "sub": 1, "login": "a", "name": "A" }), "other-secret");

    let err = jwt_strategy()
        .get_client(&request(&format!("Bearer {token}")), &app_groups())
        .unwrap_err();

    assert_eq!(
        err,
        StrategyError::Unauthenticated("Token decoding error".to_owned())
    );
}

#[test]
fn jwt_garbage_token_is_unauthenticated() {
    let err = jwt_strategy()
        .get_client(&request("Bearer a.b.c"), &app_groups())
        .unwrap_err();
    assert!(err.is_authentication_failure());
}

#[test]
fn jwt_expired_token_is_unauthenticated() {
    let token = hs256(
        &json!({ "sub": 1, "login": "a", "name": "A", "exp": get_current_timestamp() - 600 }),
        SECRET,
    );

    let err = jwt_strategy()
        .get_client(&request(&format!("Bearer {token}")), &app_groups())
        .unwrap_err();

    assert!(matches!(
        err,
        StrategyError::Unauthenticated(msg) if msg.starts_with("Unexpected token error")
    ));
}

#[test]
fn keycloak_round_trip_builds_client() {
    let token = rs256(&json!({
        "sub": "8f5c0c3e-7a8b-4c57-9f4e-2b1d6f7a9e10",
        "preferred_username": "jdoe",
        "given_name": "John",
        "family_name": "Doe",
        "email": "jdoe@example.com",
        "groups": ["admins"],
        "aud": "account",
        "exp": get_current_timestamp() + 600,
    }));

    let client = keycloak_strategy(RSA_PUBLIC)
        .get_client(&request(&format!("Bearer {token}")), &app_groups())
        .unwrap();

    assert_eq!(client.login(), "jdoe");
    assert_eq!(client.name(), "John Doe");
    assert!(client.has_permission("edit"));
}

#[test]
fn keycloak_rejects_token_signed_by_other_key() {
    let token = rs256(&json!({ "sub": 1, "preferred_username": "j", "name": "J" }));

    let err = keycloak_strategy(RSA_OTHER_PUBLIC)
        .get_client(&request(&format!("Bearer {token}")), &app_groups())
        .unwrap_err();

    assert_eq!(
        err,
        StrategyError::Unauthenticated("Token decoding error".to_owned())
    );
}

#[test]
fn keycloak_accepts_full_pem_when_wrapping_is_disabled() {
    let pem = format!(
        "-----BEGIN PUBLIC KEY-----\n{}\n-----END PUBLIC KEY-----\n",
        RSA_PUBLIC.trim()
    );
    let strategy = KeycloakStrategy::from_config(&KeycloakAuthNPluginConfig {
        public_key: pem,
        is_wrap_key: false,
        ..KeycloakAuthNPluginConfig::default()
    })
    .unwrap();

    let token = rs256(&json!({ "sub": 1, "preferred_username": "j", "name": "J" }));
    assert!(strategy
        .get_client(&request(&format!("Bearer {token}")), &app_groups())
        .is_ok());
}

#[test]
fn keycloak_rejects_shared_secret_token() {
    let token = hs256(&json!({ "sub": 1, "preferred_username": "j", "name": "J" }), SECRET);

    let err = keycloak_strategy(RSA_PUBLIC)
        .get_client(&request(&format!("Bearer {token}")), &app_groups())
        .unwrap_err();

    assert!(err.is_authentication_failure());
}
