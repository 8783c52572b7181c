//! Token verification shared by both strategies.

use std::str::FromStr;

use authn_resolver_sdk::{ClientData, StrategyError, bearer_token};
use http::request::Parts;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use tracing::debug;

use crate::config::DecodingOptions;
use crate::error::JwtConfigError;

#[derive(Debug, Clone, Copy)]
pub enum KeyKind {
    Hmac,
    Rsa,
}

impl KeyKind {
    fn accepts(self, algorithm: Algorithm) -> bool {
        match self {
            Self::Hmac => matches!(
                algorithm,
                Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
            ),
            Self::Rsa => matches!(
                algorithm,
                Algorithm::RS256
                    | Algorithm::RS384
                    | Algorithm::RS512
                    | Algorithm::PS256
                    | Algorithm::PS384
                    | Algorithm::PS512
            ),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Hmac => "shared-secret",
            Self::Rsa => "RSA",
        }
    }
}

/// Parse configured algorithm names, all of which must fit `kind`.
pub fn parse_algorithms(names: &[String], kind: KeyKind) -> Result<Vec<Algorithm>, JwtConfigError> {
    if names.is_empty() {
        return Err(JwtConfigError::NoAlgorithms);
    }

    names
        .iter()
        .map(|name| {
            let algorithm = Algorithm::from_str(name)
                .map_err(|_| JwtConfigError::UnknownAlgorithm(name.clone()))?;
            if kind.accepts(algorithm) {
                Ok(algorithm)
            } else {
                Err(JwtConfigError::IncompatibleAlgorithm {
                    algorithm: name.clone(),
                    key_kind: kind.label(),
                })
            }
        })
        .collect()
}

/// Verification key plus validation rules, built once per strategy.
pub struct TokenDecoder {
    key: DecodingKey,
    validation: Validation,
}

impl TokenDecoder {
    /// `algorithms` must be non-empty; see [`parse_algorithms`].
    /// `verify_aud` applies when the options leave it unset.
    pub fn new(
        key: DecodingKey,
        algorithms: Vec<Algorithm>,
        options: &DecodingOptions,
        verify_aud: bool,
    ) -> Self {
        let mut validation = Validation::default();
        validation.algorithms = algorithms;
        validation.validate_exp = options.verify_exp;
        validation.validate_nbf = options.verify_nbf;
        validation.validate_aud = options.verify_aud.unwrap_or(verify_aud);
        validation.leeway = options.leeway;
        // Registered claims are checked when present, never demanded.
        validation.required_spec_claims.clear();
        if !options.audience.is_empty() {
            validation.set_audience(&options.audience);
        }
        if !options.verify_signature {
            validation.insecure_disable_signature_validation();
        }

        Self { key, validation }
    }

    /// Verify the bearer token of `request` and return its claims.
    pub fn decode_request(&self, request: &Parts) -> Result<ClientData, StrategyError> {
        let token = bearer_token(&request.headers)
            .ok_or_else(|| StrategyError::Unauthenticated("missing bearer token".to_owned()))?;
        self.decode(token)
    }

    pub fn decode(&self, token: &str) -> Result<ClientData, StrategyError> {
        jsonwebtoken::decode::<ClientData>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| token_error(&err))
    }
}

fn token_error(err: &jsonwebtoken::errors::Error) -> StrategyError {
    debug!(error = %err, "Token rejected");
    match err.kind() {
        ErrorKind::InvalidToken
        | ErrorKind::InvalidSignature
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => StrategyError::Unauthenticated("Token decoding error".to_owned()),
        _ => StrategyError::Unauthenticated(format!("Unexpected token error [{err}]")),
    }
}
