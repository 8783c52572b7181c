//! Domain layer for the token strategies.

mod decoder;
pub mod jwt;
pub mod keycloak;

pub use jwt::{JwtClientFactory, JwtStrategy};
pub use keycloak::{KeycloakClientFactory, KeycloakStrategy};
