//! Ordered strategy resolution.

use std::sync::Arc;

use authkit_security::{AppGroups, Client};
use authn_resolver_sdk::{AuthNResolverError, AuthStrategy, StrategyError};
use http::request::Parts;
use tracing::{debug, warn};

use crate::config::AuthNResolverConfig;

/// Resolves the client of a request through an ordered chain of strategies.
///
/// Strategies are asked in the order they were added; the first one that
/// produces a client wins and the rest are not consulted. A strategy that
/// rejects the credential (`StrategyError::Unauthenticated`) is logged and
/// skipped. Any other strategy error aborts resolution.
///
/// Built once at startup and shared (`Arc`) by every request.
pub struct Authenticator {
    strategies: Vec<Arc<dyn AuthStrategy>>,
    app_groups: AppGroups,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("strategies", &self.strategy_names().collect::<Vec<_>>())
            .field("app_groups", &self.app_groups)
            .finish()
    }
}

impl Authenticator {
    /// Create an authenticator with no strategies.
    #[must_use]
    pub fn new(app_groups: impl Into<AppGroups>) -> Self {
        Self {
            strategies: Vec::new(),
            app_groups: app_groups.into(),
        }
    }

    #[must_use]
    pub fn from_config(cfg: &AuthNResolverConfig) -> Self {
        Self::new(cfg.app_groups.clone())
    }

    /// Append a strategy with the lowest priority so far.
    #[must_use]
    pub fn with_strategy(self, strategy: impl AuthStrategy + 'static) -> Self {
        self.with_shared_strategy(Arc::new(strategy))
    }

    #[must_use]
    pub fn with_shared_strategy(mut self, strategy: Arc<dyn AuthStrategy>) -> Self {
        self.strategies.push(strategy);
        self
    }

    /// Append several strategies, keeping their order.
    #[must_use]
    pub fn with_strategies(
        mut self,
        strategies: impl IntoIterator<Item = Arc<dyn AuthStrategy>>,
    ) -> Self {
        self.strategies.extend(strategies);
        self
    }

    /// Strategy names in priority order.
    pub fn strategy_names(&self) -> impl Iterator<Item = &str> {
        self.strategies.iter().map(|s| s.name())
    }

    #[must_use]
    pub fn app_groups(&self) -> &AppGroups {
        &self.app_groups
    }

    /// Resolve the client of `request`.
    ///
    /// `resource_name` names the protected operation and only shows up in the
    /// error when nobody could authenticate the request.
    ///
    /// # Errors
    ///
    /// - `AuthenticationIsNotAvailable` if no strategy produced a client
    /// - `Strategy` if a strategy failed with anything but an authentication failure
    pub fn authenticate(
        &self,
        request: &Parts,
        resource_name: &str,
    ) -> Result<Client, AuthNResolverError> {
        for strategy in &self.strategies {
            if let Some(client) = self.try_to_get_client(request, strategy.as_ref())? {
                return Ok(client);
            }
        }

        Err(AuthNResolverError::AuthenticationIsNotAvailable {
            resource_name: resource_name.to_owned(),
        })
    }

    /// Resolve the client and attach it to the request extensions.
    ///
    /// # Errors
    ///
    /// Same as [`Self::authenticate`]; nothing is attached on error.
    pub fn auth(&self, request: &mut Parts, resource_name: &str) -> Result<(), AuthNResolverError> {
        let client = self.authenticate(request, resource_name)?;
        request.extensions.insert(client);
        Ok(())
    }

    fn try_to_get_client(
        &self,
        request: &Parts,
        strategy: &dyn AuthStrategy,
    ) -> Result<Option<Client>, AuthNResolverError> {
        let strategy_name = strategy.name();

        match strategy.get_client(request, &self.app_groups) {
            Ok(client) => {
                debug!(strategy = strategy_name, login = client.login(), "Client received");
                Ok(Some(client))
            }
            Err(err @ StrategyError::Unauthenticated(_)) => {
                warn!(
                    "Error occurred on receive client info via strategy [{strategy_name}]: {err}"
                );
                debug!("No client received by strategy [{strategy_name}]");
                Ok(None)
            }
            Err(err) => Err(AuthNResolverError::Strategy {
                strategy: strategy_name.to_owned(),
                source: err,
            }),
        }
    }
}
