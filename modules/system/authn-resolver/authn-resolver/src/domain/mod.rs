//! Domain layer for the `AuthN` resolver.

pub mod authenticator;

pub use authenticator::Authenticator;
