//! `AuthN` Resolver SDK
//!
//! Contracts shared by the authenticator and the concrete authentication
//! mechanisms:
//!
//! - [`AuthStrategy`] - extracts raw client data from a request
//! - [`ClientFactory`] - turns raw client data into a [`Client`]
//! - [`ClientData`] and the `claim_*` helpers - raw attribute mapping
//! - [`StrategyError`] / [`AuthNResolverError`] - error types
//!
//! ## Usage
//!
//! ```ignore
//! use authn_resolver_sdk::{AuthStrategy, ClientData, ClientFactory, StrategyError};
//!
//! struct HeaderStrategy { factory: Arc<dyn ClientFactory> }
//!
//! impl AuthStrategy for HeaderStrategy {
//!     fn name(&self) -> &str { "header" }
//!     fn client_data(&self, request: &Parts) -> Result<ClientData, StrategyError> { ... }
//!     fn client_factory(&self) -> &dyn ClientFactory { self.factory.as_ref() }
//! }
//! ```

pub mod error;
pub mod factory;
pub mod models;
pub mod strategy;

// Re-export main types at crate root
pub use authkit_security::{AppGroups, Client};
pub use error::{AuthNResolverError, StrategyError};
pub use factory::ClientFactory;
pub use models::{ClientData, bearer_token, claim_groups, claim_string, claim_user_id};
pub use strategy::AuthStrategy;
