#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! `AuthZ` Resolver SDK
//!
//! Guards operations with a [`Policy`] evaluated against the authenticated
//! [`Client`]:
//!
//! - [`authorize`] - one-shot check around a closure
//! - [`Gate`] - a policy bound to a resource name, built once and reused
//! - [`authorize_request`] - check against the client attached to a request
//! - [`AuthZResolverError`] - error types
//!
//! ## Usage
//!
//! ```ignore
//! use authz_resolver_sdk::Gate;
//! use authkit_security::{Group, Permission, Policy};
//!
//! let gate = Gate::new("Orders.delete", Policy::from(Permission::new("delete")));
//!
//! let deleted = gate.run(&client, || orders.delete(id))?;
//! ```

pub mod error;
pub mod pep;

// Re-export main types at crate root
pub use authkit_security::{Client, Policy};
pub use error::AuthZResolverError;
pub use pep::{Gate, authorize, authorize_request};
