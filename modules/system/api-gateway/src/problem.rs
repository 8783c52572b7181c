//! RFC 9457 problem details.

use authn_resolver_sdk::AuthNResolverError;
use authz_resolver_sdk::AuthZResolverError;
use axum::Json;
use axum::response::{IntoResponse, Response};
use http::{HeaderValue, StatusCode, header};
use serde::Serialize;

/// Problem details body returned for every rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    #[serde(rename = "type")]
    pub type_url: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
}

impl Problem {
    #[must_use]
    pub fn new(status: StatusCode, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            type_url: "about:blank".to_owned(),
            title: title.into(),
            status: status.as_u16(),
            detail: detail.into(),
            code: None,
            resource_name: None,
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_resource_name(mut self, resource_name: impl Into<String>) -> Self {
        self.resource_name = Some(resource_name.into());
        self
    }

    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut response = (status, Json(self)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );
        response
    }
}

impl From<&AuthNResolverError> for Problem {
    fn from(err: &AuthNResolverError) -> Self {
        let problem = match err {
            AuthNResolverError::AuthenticationIsNotAvailable { resource_name } => Self::new(
                StatusCode::UNAUTHORIZED,
                "Unauthorized",
                err.to_string(),
            )
            .with_resource_name(resource_name),
            // Strategy internals stay in the logs.
            AuthNResolverError::Strategy { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                "Internal authentication error",
            ),
        };
        problem.with_code(err.code())
    }
}

impl From<&AuthZResolverError> for Problem {
    fn from(err: &AuthZResolverError) -> Self {
        let problem = match err {
            AuthZResolverError::PermissionDenied { .. } => {
                Self::new(StatusCode::FORBIDDEN, "Forbidden", err.to_string())
            }
            AuthZResolverError::ClientNotAttached { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                "Auth middleware not configured",
            ),
        };
        problem
            .with_code(err.code())
            .with_resource_name(err.resource_name())
    }
}
