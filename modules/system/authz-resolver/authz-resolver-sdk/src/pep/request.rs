//! Authorization against the client attached to a request.

use authkit_security::{Client, Policy};
use http::request::Parts;

use crate::error::AuthZResolverError;
use crate::pep::gate::authorize;

/// Check `spec` against the client stored in the request extensions.
///
/// The authenticator attaches the client; this only reads it.
///
/// # Errors
///
/// - `ClientNotAttached` if no client was attached to the request
/// - `PermissionDenied` if the attached client does not satisfy `spec`
pub fn authorize_request<'a>(
    request: &'a Parts,
    spec: &Policy,
    resource_name: &str,
) -> Result<&'a Client, AuthZResolverError> {
    let client = request.extensions.get::<Client>().ok_or_else(|| {
        AuthZResolverError::ClientNotAttached {
            resource_name: resource_name.to_owned(),
        }
    })?;

    authorize(spec, client, resource_name, || client)
}
