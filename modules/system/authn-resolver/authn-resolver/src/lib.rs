//! `AuthN` Resolver
//!
//! Resolves the client of an incoming request by asking an ordered list of
//! [`authn_resolver_sdk::AuthStrategy`] implementations until one of them
//! produces a client, then attaches it to the request.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;

pub use config::AuthNResolverConfig;
pub use domain::Authenticator;
