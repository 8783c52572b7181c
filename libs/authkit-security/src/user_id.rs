use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of an authenticated subject.
///
/// Deserialization tries an integer first, then a UUID, and falls back to a
/// plain string, so `"550e8400-..."` becomes [`UserId::Uuid`] while
/// `"alice"` stays [`UserId::Str`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Int(i64),
    Uuid(Uuid),
    Str(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Uuid(id) => write!(f, "{id}"),
            Self::Str(id) => f.write_str(id),
        }
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<i32> for UserId {
    fn from(id: i32) -> Self {
        Self::Int(i64::from(id))
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self::Uuid(id)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self::Str(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::Str(id.to_owned())
    }
}
