//! Client factory trait.
//!
//! Each authentication mechanism delivers client data in its own shape (JWT
//! claims, Keycloak claims, static config). A factory owns the field mapping
//! from that shape to a [`Client`].

use authkit_security::{AppGroups, Client};

use crate::error::StrategyError;
use crate::models::ClientData;

/// Builds a [`Client`] from raw client data.
///
/// Implementations must omit attributes whose raw value is absent (missing
/// key or JSON `null`) instead of inventing placeholders.
pub trait ClientFactory: Send + Sync {
    /// Build a client bound to the application's groups.
    ///
    /// # Errors
    ///
    /// - `InvalidClientData` if a required attribute is missing or has the wrong type
    fn create(&self, data: &ClientData, app_groups: &AppGroups) -> Result<Client, StrategyError>;
}
