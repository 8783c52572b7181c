#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! HTTP adapter for the authenticator and the authorization gate.
//!
//! - [`authn_middleware`] resolves the client of every request and attaches it
//! - [`authz_middleware`] guards one route with a [`authz_resolver_sdk::Gate`]
//! - [`route_policy_middleware`] guards many routes from a [`RoutePolicies`] table
//! - [`AuthClient`] hands the attached client to handlers
//! - [`Problem`] renders failures as RFC 9457 problem details
//!
//! ```ignore
//! let app = Router::new()
//!     .route("/orders/{id}", delete(delete_order))
//!     .route_layer(from_fn_with_state(PolicyState::new(gate), authz_middleware))
//!     .layer(from_fn_with_state(AuthState::new(authenticator), authn_middleware));
//! ```

pub mod auth;
pub mod config;
pub mod policy;
pub mod problem;

pub use auth::{AuthClient, AuthState, authn_middleware};
pub use config::{ApiGatewayConfig, RoutePolicyConfig};
pub use policy::{PolicyState, RoutePolicies, RoutePolicyError, authz_middleware, route_policy_middleware};
pub use problem::Problem;
