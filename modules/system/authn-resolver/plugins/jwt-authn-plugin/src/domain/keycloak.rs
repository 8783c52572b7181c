//! Keycloak OpenID strategy.

use std::borrow::Cow;
use std::sync::Arc;

use authkit_security::{AppGroups, Client};
use authn_resolver_sdk::{
    AuthStrategy, ClientData, ClientFactory, StrategyError, claim_groups, claim_string,
    claim_user_id,
};
use http::request::Parts;
use jsonwebtoken::DecodingKey;

use super::decoder::{KeyKind, TokenDecoder, parse_algorithms};
use crate::config::KeycloakAuthNPluginConfig;
use crate::error::JwtConfigError;

/// Maps Keycloak access-token claims.
///
/// | claim | client field |
/// |---|---|
/// | `sub` | `user_id` |
/// | `preferred_username` | `login` |
/// | `given_name` + `family_name` | `name` |
/// | `email` | `email` |
/// | `groups` | `groups` |
///
/// When neither `given_name` nor `family_name` is present, the `name` claim is used.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeycloakClientFactory;

impl ClientFactory for KeycloakClientFactory {
    fn create(&self, data: &ClientData, app_groups: &AppGroups) -> Result<Client, StrategyError> {
        let mut builder = Client::builder()
            .groups(claim_groups(data, "groups")?)
            .app_groups(Arc::clone(app_groups));

        if let Some(user_id) = claim_user_id(data, "sub")? {
            builder = builder.user_id(user_id);
        }
        if let Some(login) = claim_string(data, "preferred_username")? {
            builder = builder.login(login);
        }
        if let Some(name) = display_name(data)? {
            builder = builder.name(name);
        }
        if let Some(email) = claim_string(data, "email")? {
            builder = builder.email(email);
        }

        Ok(builder.build()?)
    }
}

fn display_name(data: &ClientData) -> Result<Option<String>, StrategyError> {
    let parts: Vec<String> = claim_string(data, "given_name")?
        .into_iter()
        .chain(claim_string(data, "family_name")?)
        .collect();

    if parts.is_empty() {
        claim_string(data, "name")
    } else {
        Ok(Some(parts.join(" ")))
    }
}

/// Authenticates requests carrying a token issued by a Keycloak realm.
pub struct KeycloakStrategy {
    decoder: TokenDecoder,
    client_factory: Arc<dyn ClientFactory>,
}

impl KeycloakStrategy {
    /// Build the strategy with [`KeycloakClientFactory`].
    ///
    /// # Errors
    ///
    /// - `InvalidKey` if the public key is not a usable RSA key
    /// - `NoAlgorithms`, `UnknownAlgorithm` or `IncompatibleAlgorithm` for a
    ///   bad algorithm list
    pub fn from_config(cfg: &KeycloakAuthNPluginConfig) -> Result<Self, JwtConfigError> {
        let algorithms = parse_algorithms(&cfg.algorithms, KeyKind::Rsa)?;
        let key = DecodingKey::from_rsa_pem(public_key_pem(cfg).as_bytes())
            .map_err(JwtConfigError::InvalidKey)?;

        Ok(Self {
            decoder: TokenDecoder::new(key, algorithms, &cfg.options, false),
            client_factory: Arc::new(KeycloakClientFactory),
        })
    }

    #[must_use]
    pub fn with_client_factory(mut self, client_factory: Arc<dyn ClientFactory>) -> Self {
        self.client_factory = client_factory;
        self
    }
}

fn public_key_pem(cfg: &KeycloakAuthNPluginConfig) -> Cow<'_, str> {
    if cfg.is_wrap_key {
        Cow::Owned(format!(
            "-----BEGIN PUBLIC KEY-----\n{}\n-----END PUBLIC KEY-----",
            cfg.public_key.trim()
        ))
    } else {
        Cow::Borrowed(&cfg.public_key)
    }
}

impl AuthStrategy for KeycloakStrategy {
    fn name(&self) -> &str {
        "keycloak"
    }

    fn client_data(&self, request: &Parts) -> Result<ClientData, StrategyError> {
        self.decoder.decode_request(request)
    }

    fn client_factory(&self) -> &dyn ClientFactory {
        self.client_factory.as_ref()
    }
}
