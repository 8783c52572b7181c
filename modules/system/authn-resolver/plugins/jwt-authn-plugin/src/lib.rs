#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! JWT `AuthN` Plugin
//!
//! Two [`authn_resolver_sdk::AuthStrategy`] implementations that read a token
//! from the `Authorization` header and verify it with `jsonwebtoken`:
//!
//! - [`JwtStrategy`] - shared-secret tokens (`HS256` by default)
//! - [`KeycloakStrategy`] - Keycloak OpenID tokens signed with the realm RSA
//!   key (`RS256` by default)
//!
//! Verified claims become the client data handed to the strategy's client
//! factory ([`JwtClientFactory`] / [`KeycloakClientFactory`] unless replaced).
//!
//! ## Configuration
//!
//! ```yaml
//! jwt_authn:
//!   secret: "change-me"
//!   algorithms: ["HS256"]
//!   options:
//!     verify_exp: true
//!     leeway: 30
//!
//! keycloak_authn:
//!   public_key: "MIIBIjANBgkqhkiG9w0BAQEFAAOC..."
//!   is_wrap_key: true
//! ```

pub mod config;
pub mod domain;
pub mod error;

pub use config::{DecodingOptions, JwtAuthNPluginConfig, KeycloakAuthNPluginConfig};
pub use domain::{JwtClientFactory, JwtStrategy, KeycloakClientFactory, KeycloakStrategy};
pub use error::JwtConfigError;
