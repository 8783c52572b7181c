//! Strategy implementation for the static `AuthN` plugin.

use std::collections::HashMap;
use std::sync::Arc;

use authkit_security::UserId;
use authn_resolver_sdk::{AuthStrategy, ClientData, ClientFactory, StrategyError, bearer_token};
use http::request::Parts;
use serde_json::Value;
use tracing::debug;

use crate::config::{AuthNMode, IdentityConfig, StaticAuthNPluginConfig};
use crate::domain::factory::StaticClientFactory;

/// Static authentication strategy.
///
/// Provides identities based on configuration mode:
/// - `accept_all`: Every request maps to the default identity
/// - `static_tokens`: Specific bearer tokens map to specific identities
pub struct StaticStrategy {
    mode: AuthNMode,
    default_identity: IdentityConfig,
    token_map: HashMap<String, IdentityConfig>,
    client_factory: Arc<dyn ClientFactory>,
}

impl StaticStrategy {
    /// Create a strategy from plugin configuration, using [`StaticClientFactory`].
    #[must_use]
    pub fn from_config(cfg: &StaticAuthNPluginConfig) -> Self {
        let token_map: HashMap<String, IdentityConfig> = cfg
            .tokens
            .iter()
            .map(|m| (m.token.clone(), m.identity.clone()))
            .collect();

        Self {
            mode: cfg.mode.clone(),
            default_identity: cfg.default_identity.clone(),
            token_map,
            client_factory: Arc::new(StaticClientFactory),
        }
    }

    /// Replace the default client factory.
    #[must_use]
    pub fn with_client_factory(mut self, client_factory: Arc<dyn ClientFactory>) -> Self {
        self.client_factory = client_factory;
        self
    }

    fn identity_for(&self, request: &Parts) -> Result<&IdentityConfig, StrategyError> {
        match self.mode {
            AuthNMode::AcceptAll => Ok(&self.default_identity),
            AuthNMode::StaticTokens => {
                let token = bearer_token(&request.headers).ok_or_else(|| {
                    StrategyError::Unauthenticated("missing bearer token".to_owned())
                })?;
                self.token_map.get(token).ok_or_else(|| {
                    debug!("Static token not found in token map");
                    StrategyError::Unauthenticated("unknown token".to_owned())
                })
            }
        }
    }
}

impl AuthStrategy for StaticStrategy {
    fn name(&self) -> &str {
        "static"
    }

    fn client_data(&self, request: &Parts) -> Result<ClientData, StrategyError> {
        self.identity_for(request).map(identity_data)
    }

    fn client_factory(&self) -> &dyn ClientFactory {
        self.client_factory.as_ref()
    }
}

fn identity_data(identity: &IdentityConfig) -> ClientData {
    let mut data = ClientData::new();
    data.insert("user_id".to_owned(), user_id_value(&identity.user_id));
    data.insert("login".to_owned(), Value::from(identity.login.as_str()));
    data.insert("name".to_owned(), Value::from(identity.name.as_str()));
    if let Some(email) = &identity.email {
        data.insert("email".to_owned(), Value::from(email.as_str()));
    }
    data.insert(
        "groups".to_owned(),
        Value::from(identity.groups.iter().map(String::as_str).collect::<Vec<_>>()),
    );
    data
}

fn user_id_value(user_id: &UserId) -> Value {
    match user_id {
        UserId::Int(id) => Value::from(*id),
        UserId::Uuid(id) => Value::from(id.to_string()),
        UserId::Str(id) => Value::from(id.as_str()),
    }
}
