//! Server configuration: YAML file merged with `AUTHKIT__` environment overrides.

use std::path::Path;

use anyhow::{Context, bail};
use api_gateway::{ApiGatewayConfig, RoutePolicyConfig};
use authn_resolver::AuthNResolverConfig;
use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use jwt_authn_plugin::{JwtAuthNPluginConfig, KeycloakAuthNPluginConfig};
use serde::Deserialize;
use static_authn_plugin::StaticAuthNPluginConfig;

/// Prefix of environment overrides; `__` separates nesting levels,
/// e.g. `AUTHKIT__SERVER__BIND_ADDR`.
pub const ENV_PREFIX: &str = "AUTHKIT__";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ApiGatewayConfig,
    pub logging: LoggingConfig,
    /// Application groups shared by every strategy.
    pub authn: AuthNResolverConfig,
    pub keycloak_authn: Option<KeycloakAuthNPluginConfig>,
    pub jwt_authn: Option<JwtAuthNPluginConfig>,
    pub static_authn: Option<StaticAuthNPluginConfig>,
    pub policies: Vec<RoutePolicyConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Filter directives used when `RUST_LOG` is not set.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from `path` (if given) and the environment.
    ///
    /// # Errors
    ///
    /// Fails if the file does not exist or the merged configuration is invalid.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            if !path.exists() {
                bail!("config file {} not found", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        Self::from_figment(&figment)
    }

    /// # Errors
    ///
    /// Fails if the merged configuration does not match [`AppConfig`].
    pub fn from_figment(figment: &Figment) -> anyhow::Result<Self> {
        figment.extract().context("invalid configuration")
    }
}
