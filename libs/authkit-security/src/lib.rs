#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Identity model shared by authentication strategies and authorization policies.
//!
//! - [`Client`] - the authenticated identity attached to a request
//! - [`Group`] / [`Permission`] - application-defined access units, usable as
//!   policy leaves
//! - [`Policy`] - a [`Specification`] evaluated against a [`Client`]

use std::sync::Arc;

pub mod client;
pub mod group;
pub mod user_id;

pub use authkit_spec::{Predicate, SpecError, Specification};
pub use client::{Client, ClientBuildError, ClientBuilder};
pub use group::{Group, Permission};
pub use user_id::UserId;

/// Groups known to the application, shared by every client built by one authenticator.
pub type AppGroups = Arc<[Group]>;

/// Authorization policy over an authenticated client.
pub type Policy = Specification<Client>;
