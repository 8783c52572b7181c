//! Application-defined groups and permissions.
//!
//! Both are policy leaves: a [`Group`] checks the groups a client claims, a
//! [`Permission`] checks the permissions derived from them.

use std::fmt;
use std::hash::{Hash, Hasher};

use authkit_spec::{Predicate, Specification};
use serde::{Deserialize, Serialize};

use crate::client::Client;

/// A named permission. Satisfied by a client whose derived permissions contain it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission {
    name: String,
}

impl Permission {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Predicate<Client> for Permission {
    fn is_satisfied_by(&self, candidate: &Client) -> bool {
        candidate.permissions().contains(self.name.as_str())
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "perm:{}", self.name)
    }
}

impl From<Permission> for Specification<Client> {
    fn from(permission: Permission) -> Self {
        Specification::leaf(permission)
    }
}

/// A named group of permissions.
///
/// Identity is the name alone: two groups with the same name are equal and
/// hash the same regardless of their permission lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Group {
    name: String,
    #[serde(default)]
    permissions: Vec<Permission>,
}

impl Group {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            permissions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_permissions(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.permissions.extend(permissions);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }
}

impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Group {}

impl Hash for Group {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl Predicate<Client> for Group {
    fn is_satisfied_by(&self, candidate: &Client) -> bool {
        candidate.groups().contains(self.name.as_str())
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group:{}", self.name)
    }
}

impl From<Group> for Specification<Client> {
    fn from(group: Group) -> Self {
        Specification::leaf(group)
    }
}
