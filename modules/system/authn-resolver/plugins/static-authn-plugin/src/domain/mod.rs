//! Domain layer for the static `AuthN` plugin.

pub mod factory;
pub mod service;

pub use factory::StaticClientFactory;
pub use service::StaticStrategy;
