use serde::{Deserialize, Serialize};

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_owned()
}

fn default_method() -> String {
    "GET".to_owned()
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct ApiGatewayConfig {
    pub bind_addr: String,
}

impl Default for ApiGatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// Access rule for one route.
///
/// A client passes when it holds every listed permission and belongs to every
/// listed group.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutePolicyConfig {
    #[serde(default = "default_method")]
    pub method: String,
    /// Route pattern in axum syntax, e.g. `/orders/{id}`.
    pub path: String,
    /// Name reported in denials. Defaults to `"<METHOD> <path>"`.
    #[serde(default)]
    pub resource_name: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub groups: Vec<String>,
}

impl RoutePolicyConfig {
    #[must_use]
    pub fn resource_name(&self) -> String {
        self.resource_name
            .clone()
            .unwrap_or_else(|| format!("{} {}", self.method.to_ascii_uppercase(), self.path))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn route_policy_defaults() {
        let cfg: RoutePolicyConfig =
            serde_json::from_value(serde_json::json!({ "path": "/orders", "permissions": ["read"] }))
                .unwrap();

        assert_eq!(cfg.method, "GET");
        assert_eq!(cfg.resource_name(), "GET /orders");
        assert!(cfg.groups.is_empty());
    }

    #[test]
    fn gateway_defaults() {
        let cfg: ApiGatewayConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(cfg.bind_addr, "127.0.0.1:8080");
    }
}
