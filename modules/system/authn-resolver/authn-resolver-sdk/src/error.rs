//! Error types for the `AuthN` resolver module.

use authkit_security::ClientBuildError;
use thiserror::Error;

/// Failure of a single strategy attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrategyError {
    /// The credential is absent, malformed, expired or otherwise invalid.
    ///
    /// The authenticator recovers from this one and tries the next strategy.
    #[error("authentication failed: {0}")]
    Unauthenticated(String),

    /// The credential was accepted but its data cannot describe a client.
    #[error("invalid client data: {0}")]
    InvalidClientData(String),

    /// The strategy itself is broken (misconfiguration, bug).
    #[error("internal error: {0}")]
    Internal(String),
}

impl StrategyError {
    /// Whether this is a plain authentication failure the authenticator may skip over.
    #[must_use]
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, Self::Unauthenticated(_))
    }
}

impl From<ClientBuildError> for StrategyError {
    fn from(e: ClientBuildError) -> Self {
        Self::InvalidClientData(e.to_string())
    }
}

/// Errors surfaced by the authenticator to its caller.
#[derive(Debug, Error)]
pub enum AuthNResolverError {
    /// No strategy produced a client.
    #[error("Authentication is not available, resource is [{resource_name}]")]
    AuthenticationIsNotAvailable { resource_name: String },

    /// A strategy failed with something other than an authentication failure.
    #[error("authentication strategy `{strategy}` failed: {source}")]
    Strategy {
        strategy: String,
        #[source]
        source: StrategyError,
    },
}

impl AuthNResolverError {
    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::AuthenticationIsNotAvailable { .. } => "auth.authentication_is_not_available",
            Self::Strategy { .. } => "auth.strategy_failure",
        }
    }
}
