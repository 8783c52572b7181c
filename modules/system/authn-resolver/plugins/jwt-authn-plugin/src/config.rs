//! Configuration for the token strategies.

use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

/// Token validation switches.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
#[allow(clippy::struct_excessive_bools)]
pub struct DecodingOptions {
    pub verify_signature: bool,
    /// Check `aud` against [`Self::audience`]. A token carrying `aud` is
    /// rejected when no audience is configured.
    ///
    /// Unset means the strategy default: on for `jwt_authn`, off for
    /// `keycloak_authn`.
    pub verify_aud: Option<bool>,
    /// Reject tokens whose `exp` is in the past. Tokens without `exp` pass.
    pub verify_exp: bool,
    /// Reject tokens whose `nbf` is in the future.
    pub verify_nbf: bool,
    /// Clock skew tolerance in seconds.
    pub leeway: u64,
    pub audience: Vec<String>,
}

impl Default for DecodingOptions {
    fn default() -> Self {
        Self {
            verify_signature: true,
            verify_aud: None,
            verify_exp: true,
            verify_nbf: false,
            leeway: 0,
            audience: Vec::new(),
        }
    }
}

/// Shared-secret JWT strategy configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JwtAuthNPluginConfig {
    /// HMAC secret. Redacted in `Debug` output.
    #[serde(deserialize_with = "secret_string")]
    pub secret: SecretString,
    pub algorithms: Vec<String>,
    pub options: DecodingOptions,
}

impl Default for JwtAuthNPluginConfig {
    fn default() -> Self {
        Self {
            secret: SecretString::from(String::new()),
            algorithms: vec!["HS256".to_owned()],
            options: DecodingOptions::default(),
        }
    }
}

/// Keycloak OpenID strategy configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeycloakAuthNPluginConfig {
    /// Realm RSA public key, as shown by the Keycloak admin console.
    pub public_key: String,
    /// Wrap [`Self::public_key`] in `BEGIN/END PUBLIC KEY` armour before parsing.
    ///
    /// Disable when the configured key already is a full PEM document.
    pub is_wrap_key: bool,
    pub algorithms: Vec<String>,
    pub options: DecodingOptions,
}

impl Default for KeycloakAuthNPluginConfig {
    fn default() -> Self {
        Self {
            public_key: String::new(),
            is_wrap_key: true,
            algorithms: vec!["RS256".to_owned()],
            options: DecodingOptions::default(),
        }
    }
}

fn secret_string<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use secrecy::ExposeSecret;
    use serde_json::json;

    use super::*;

    #[test]
    fn jwt_defaults() {
        let cfg = JwtAuthNPluginConfig::default();
        assert_eq!(cfg.algorithms, ["HS256"]);
        assert!(cfg.options.verify_signature);
        assert!(cfg.options.verify_exp);
        assert_eq!(cfg.options.verify_aud, None);
    }

    #[test]
    fn keycloak_defaults() {
        let cfg: KeycloakAuthNPluginConfig =
            serde_json::from_value(json!({ "public_key": "abc" })).unwrap();
        assert!(cfg.is_wrap_key);
        assert_eq!(cfg.algorithms, ["RS256"]);
        assert_eq!(cfg.options, DecodingOptions::default());
    }

    #[test]
    fn verify_aud_can_be_set_explicitly() {
        let cfg: JwtAuthNPluginConfig = serde_json::from_value(
            json!({ "secret": "s", "options": { "verify_aud": false } }),
        )
        .unwrap();
        assert_eq!(cfg.options.verify_aud, Some(false));
    }

    #[test]
    fn secret_is_redacted_in_debug() {
        let cfg: JwtAuthNPluginConfig =
            serde_json::from_value(json!({ "secret": "top-secret", "options": { "leeway": 5 } }))
                .unwrap();

        assert_eq!(cfg.secret.expose_secret(), "top-secret");
        assert_eq!(cfg.options.leeway, 5);
        assert!(!format!("{cfg:?}").contains("top-secret"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let res: Result<JwtAuthNPluginConfig, _> =
            serde_json::from_value(json!({ "secret": "s", "algo": "HS256" }));
        assert!(res.is_err());
    }
}
