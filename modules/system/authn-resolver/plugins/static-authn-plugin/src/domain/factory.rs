//! Client factory for statically configured identities.

use std::sync::Arc;

use authkit_security::{AppGroups, Client};
use authn_resolver_sdk::{
    ClientData, ClientFactory, StrategyError, claim_groups, claim_string, claim_user_id,
};

/// Maps `user_id`, `login`, `name`, `email` and `groups` one-to-one.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticClientFactory;

impl ClientFactory for StaticClientFactory {
    fn create(&self, data: &ClientData, app_groups: &AppGroups) -> Result<Client, StrategyError> {
        let mut builder = Client::builder()
            .groups(claim_groups(data, "groups")?)
            .app_groups(Arc::clone(app_groups));

        if let Some(user_id) = claim_user_id(data, "user_id")? {
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
