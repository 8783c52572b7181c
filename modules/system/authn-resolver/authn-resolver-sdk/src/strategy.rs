//! Authentication strategy trait.

use authkit_security::{AppGroups, Client};
use http::request::Parts;

use crate::error::StrategyError;
use crate::factory::ClientFactory;
use crate::models::ClientData;

/// One way of authenticating a request.
///
/// The authenticator holds an ordered list of strategies and asks each one in
/// turn via [`AuthStrategy::get_client`]. A strategy is constructed with its
/// client factory; mechanisms provide a default one.
pub trait AuthStrategy: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    /// Extract raw client data from the request.
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` if the credential is missing or invalid
    /// - `Internal` for unexpected errors
    fn client_data(&self, request: &Parts) -> Result<ClientData, StrategyError>;

    /// Factory used to turn [`Self::client_data`] output into a client.
    fn client_factory(&self) -> &dyn ClientFactory;

    /// Authenticate the request and build the client.
    ///
    /// # Errors
    ///
    /// Whatever [`Self::client_data`] or the factory return.
    fn get_client(&self, request: &Parts, app_groups: &AppGroups) -> Result<Client, StrategyError> {
        let data = self.client_data(request)?;
        self.client_factory().create(&data, app_groups)
    }
}
