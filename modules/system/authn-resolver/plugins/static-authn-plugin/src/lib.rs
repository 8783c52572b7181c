#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static `AuthN` Plugin
//!
//! An [`authn_resolver_sdk::AuthStrategy`] that hands out identities from
//! configuration instead of verifying credentials. Meant for development and
//! tests, typically as the last strategy in the chain.
//!
//! ## Modes
//!
//! - **`accept_all`** (default): Ignores the request and always returns the configured
//!   default identity.
//!
//! - **`static_tokens`**: Maps specific bearer tokens to specific identities. Useful for E2E
//!   tests with distinct users.
//!
//! ## Configuration
//!
//! ```yaml
//! static_authn:
//!   mode: accept_all
//!   default_identity:
//!     user_id: 1
//!     login: "dummy"
//!     name: "Dummy User"
//!     groups: ["admins"]
//!   tokens: []
//! ```

pub mod config;
pub mod domain;

pub use config::StaticAuthNPluginConfig;
pub use domain::{StaticClientFactory, StaticStrategy};
