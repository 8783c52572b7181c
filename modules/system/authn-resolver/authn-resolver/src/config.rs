//! Configuration for the `AuthN` resolver.

use authkit_security::Group;
use serde::Deserialize;

/// Configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthNResolverConfig {
    /// Groups known to the application.
    ///
    /// Handed to every strategy so that clients can derive their permissions
    /// from the groups they claim.
    pub app_groups: Vec<Group>,
}
