//! Error types for the `AuthZ` resolver module.

use thiserror::Error;

/// Errors raised when guarding an operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthZResolverError {
    /// The client does not satisfy the policy of the resource.
    #[error("Permission denied, resource is [{resource_name}]")]
    PermissionDenied { resource_name: String },

    /// The request reached an authorization check without an authenticated
    /// client. Authentication must run first.
    #[error("no authenticated client attached to the request, resource is [{resource_name}]")]
    ClientNotAttached { resource_name: String },
}

impl AuthZResolverError {
    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::PermissionDenied { .. } => "auth.permission_denied",
            Self::ClientNotAttached { .. } => "auth.client_not_attached",
        }
    }

    #[must_use]
    pub fn resource_name(&self) -> &str {
        match self {
            Self::PermissionDenied { resource_name }
            | Self::ClientNotAttached { resource_name } => resource_name,
        }
    }
}
