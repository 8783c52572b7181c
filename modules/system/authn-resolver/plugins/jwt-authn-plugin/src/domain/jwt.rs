//! Shared-secret JWT strategy.

use std::sync::Arc;

use authkit_security::{AppGroups, Client};
use authn_resolver_sdk::{
    AuthStrategy, ClientData, ClientFactory, StrategyError, claim_groups, claim_string,
    claim_user_id,
};
use http::request::Parts;
use jsonwebtoken::DecodingKey;
use secrecy::ExposeSecret;

use super::decoder::{KeyKind, TokenDecoder, parse_algorithms};
use crate::config::JwtAuthNPluginConfig;
use crate::error::JwtConfigError;

/// Maps `sub`, `login`, `name`, `email` and `groups` claims.
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtClientFactory;

impl ClientFactory for JwtClientFactory {
    fn create(&self, data: &ClientData, app_groups: &AppGroups) -> Result<Client, StrategyError> {
        let mut builder = Client::builder()
            .groups(claim_groups(data, "groups")?)
            .app_groups(Arc::clone(app_groups));

        if let Some(user_id) = claim_user_id(data, "sub")? {
            builder = builder.user_id(user_id);
        }
        if let Some(login) = claim_string(data, "login")? {
            builder = builder.login(login);
        }
        if let Some(name) = claim_string(data, "name")? {
            builder = builder.name(name);
        }
        if let Some(email) = claim_string(data, "email")? {
            builder = builder.email(email);
        }

        Ok(builder.build()?)
    }
}

/// Authenticates requests carrying a JWT signed with a shared secret.
pub struct JwtStrategy {
    decoder: TokenDecoder,
    client_factory: Arc<dyn ClientFactory>,
}

impl JwtStrategy {
    /// Build the strategy with [`JwtClientFactory`].
    ///
    /// # Errors
    ///
    /// - `EmptySecret` if signatures are verified but no secret is configured
    /// - `NoAlgorithms`, `UnknownAlgorithm` or `IncompatibleAlgorithm` for a
    ///   bad algorithm list
    pub fn from_config(cfg: &JwtAuthNPluginConfig) -> Result<Self, JwtConfigError> {
        let secret = cfg.secret.expose_secret();
        if secret.is_empty() && cfg.options.verify_signature {
            return Err(JwtConfigError::EmptySecret);
        }
        let algorithms = parse_algorithms(&cfg.algorithms, KeyKind::Hmac)?;

        Ok(Self {
            decoder: TokenDecoder::new(
                DecodingKey::from_secret(secret.as_bytes()),
                algorithms,
                &cfg.options,
                true,
            ),
            client_factory: Arc::new(JwtClientFactory),
        })
    }

    #[must_use]
    pub fn with_client_factory(mut self, client_factory: Arc<dyn ClientFactory>) -> Self {
        self.client_factory = client_factory;
        self
    }
}

impl AuthStrategy for JwtStrategy {
    fn name(&self) -> &str {
        "jwt"
    }

    fn client_data(&self, request: &Parts) -> Result<ClientData, StrategyError> {
        self.decoder.decode_request(request)
    }

    fn client_factory(&self) -> &dyn ClientFactory {
        self.client_factory.as_ref()
    }
}
