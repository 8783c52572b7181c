use std::collections::BTreeSet;
use std::fmt;
use std::sync::{Arc, OnceLock};

use thiserror::Error;

use crate::AppGroups;
use crate::group::Group;
use crate::user_id::UserId;

/// `Client` is the identity an authentication strategy attached to a request.
///
/// Built once per authenticated request by a client factory and dropped with
/// the request. Policies ([`crate::Policy`]) are evaluated against it.
#[derive(Clone)]
pub struct Client {
    user_id: UserId,
    login: String,
    name: String,
    email: Option<String>,
    /// Group names the identity claims membership in.
    groups: BTreeSet<String>,
    /// Groups known to the application. Shared, not per request.
    app_groups: AppGroups,
    /// Derived from `groups` and `app_groups` on first access.
    permissions: OnceLock<BTreeSet<String>>,
}

impl Client {
    /// Create a new `Client` builder
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub fn login(&self) -> &str {
        &self.login
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[must_use]
    pub fn groups(&self) -> &BTreeSet<String> {
        &self.groups
    }

    #[must_use]
    pub fn app_groups(&self) -> &[Group] {
        &self.app_groups
    }

    /// Permission names granted by every application group the client belongs to.
    ///
    /// Computed on first call and cached for the lifetime of this instance.
    #[must_use]
    pub fn permissions(&self) -> &BTreeSet<String> {
        self.permissions
            .get_or_init(|| derive_permissions(&self.groups, &self.app_groups))
    }

    #[must_use]
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions().contains(permission)
    }

    #[must_use]
    pub fn in_group(&self, group: &str) -> bool {
        self.groups.contains(group)
    }
}

fn derive_permissions(groups: &BTreeSet<String>, app_groups: &[Group]) -> BTreeSet<String> {
    app_groups
        .iter()
        .filter(|group| groups.contains(group.name()))
        .flat_map(|group| group.permissions().iter().map(|p| p.name().to_owned()))
        .collect()
}

impl PartialEq for Client {
    fn eq(&self, other: &Self) -> bool {
        self.user_id == other.user_id
            && self.login == other.login
            && self.name == other.name
            && self.email == other.email
            && self.groups == other.groups
            && self.app_groups == other.app_groups
    }
}

impl Eq for Client {}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("user_id", &self.user_id)
            .field("login", &self.login)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("groups", &self.groups)
            .finish_non_exhaustive()
    }
}

/// Raised when a client is built without one of its identifying fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientBuildError {
    #[error("client field `{0}` is required")]
    MissingField(&'static str),
}

#[derive(Default)]
pub struct ClientBuilder {
    user_id: Option<UserId>,
    login: Option<String>,
    name: Option<String>,
    email: Option<String>,
    groups: BTreeSet<String>,
    app_groups: Option<AppGroups>,
}

impl ClientBuilder {
    #[must_use]
    pub fn user_id(mut self, user_id: impl Into<UserId>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    #[must_use]
    pub fn login(mut self, login: impl Into<String>) -> Self {
        self.login = Some(login.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Add group names. Duplicates collapse into one membership.
    #[must_use]
    pub fn groups<I>(mut self, groups: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.groups.extend(groups.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn app_groups(mut self, app_groups: AppGroups) -> Self {
        self.app_groups = Some(app_groups);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError::MissingField`] if `user_id`, `login` or
    /// `name` was never set.
    pub fn build(self) -> Result<Client, ClientBuildError> {
        Ok(Client {
            user_id: self
                .user_id
                .ok_or(ClientBuildError::MissingField("user_id"))?,
            login: self.login.ok_or(ClientBuildError::MissingField("login"))?,
            name: self.name.ok_or(ClientBuildError::MissingField("name"))?,
            email: self.email,
            groups: self.groups,
            app_groups: self.app_groups.unwrap_or_else(|| Arc::from(Vec::new())),
            permissions: OnceLock::new(),
        })
    }
}
