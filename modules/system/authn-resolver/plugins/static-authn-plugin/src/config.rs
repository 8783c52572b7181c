//! Configuration for the static `AuthN` plugin.

use authkit_security::UserId;
use serde::Deserialize;

/// Plugin configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticAuthNPluginConfig {
    /// Authentication mode.
    pub mode: AuthNMode,

    /// Identity returned in `accept_all` mode.
    pub default_identity: IdentityConfig,

    /// Static token-to-identity mappings for `static_tokens` mode.
    pub tokens: Vec<TokenMapping>,
}

/// Authentication mode.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuthNMode {
    /// Return the default identity for every request.
    #[default]
    AcceptAll,
    /// Map specific bearer tokens to specific identities.
    StaticTokens,
}

/// Identity handed out by the plugin.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdentityConfig {
    pub user_id: UserId,
    pub login: String,
    pub name: String,
    pub email: Option<String>,
    /// Group names the identity claims.
    pub groups: Vec<String>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            user_id: UserId::Int(1),
            login: "dummy".to_owned(),
            name: "Dummy User".to_owned(),
            email: None,
            groups: Vec::new(),
        }
    }
}

/// Maps a static token to a specific identity.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenMapping {
    /// The bearer token value to match.
    pub token: String,
    /// The identity to return when this token is presented.
    pub identity: IdentityConfig,
}
