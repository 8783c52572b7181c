//! Raw client data and helpers shared by client factories.

use authkit_security::UserId;
use http::HeaderMap;
use serde_json::Value;

use crate::error::StrategyError;

/// Raw named attributes produced by a strategy (`sub`, `login`, `groups`, ...).
pub type ClientData = serde_json::Map<String, Value>;

/// Token carried by the `Authorization` header.
///
/// The header value is split on spaces and the last part is taken, so both
/// `Bearer <token>` and a bare `<token>` work. The scheme is not checked.
#[must_use]
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.rsplit(' ').next())
        .filter(|token| !token.is_empty())
}

fn present<'a>(data: &'a ClientData, key: &str) -> Option<&'a Value> {
    data.get(key).filter(|v| !v.is_null())
}

/// String attribute, `None` when absent or `null`.
///
/// # Errors
///
/// `InvalidClientData` when the value is present but not a string.
pub fn claim_string(data: &ClientData, key: &str) -> Result<Option<String>, StrategyError> {
    match present(data, key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(StrategyError::InvalidClientData(format!(
            "`{key}` must be a string, got {other}"
        ))),
    }
}

/// User id attribute: an integer, a UUID string or any other string.
///
/// # Errors
///
/// `InvalidClientData` when the value is present but is neither a number nor a string.
pub fn claim_user_id(data: &ClientData, key: &str) -> Result<Option<UserId>, StrategyError> {
    present(data, key)
        .map(|v| {
            serde_json::from_value(v.clone()).map_err(|e| {
                StrategyError::InvalidClientData(format!("`{key}` is not a valid user id: {e}"))
            })
        })
        .transpose()
}

/// Group names from a comma-joined string or an array of strings.
///
/// Names are trimmed and empty names dropped; an absent attribute means no groups.
///
/// # Errors
///
/// `InvalidClientData` for any other JSON shape.
pub fn claim_groups(data: &ClientData, key: &str) -> Result<Vec<String>, StrategyError> {
    let invalid = || StrategyError::InvalidClientData(format!("`{key}` must be a string or a list of strings"));

    let names: Vec<&str> = match present(data, key) {
        None => return Ok(Vec::new()),
        Some(Value::String(joined)) => joined.split(',').collect(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().ok_or_else(invalid))
            .collect::<Result<_, _>>()?,
        Some(_) => return Err(invalid()),
    };

    Ok(names
        .into_iter()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect())
}
