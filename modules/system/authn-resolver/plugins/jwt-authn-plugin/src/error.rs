use thiserror::Error;

/// Misconfiguration detected while building a token strategy.
#[derive(Debug, Error)]
pub enum JwtConfigError {
    #[error("at least one signing algorithm must be configured")]
    NoAlgorithms,

    #[error("unknown signing algorithm `{0}`")]
    UnknownAlgorithm(String),

    /// The algorithm exists but does not fit the key type of the strategy.
    #[error("algorithm `{algorithm}` cannot be used with {key_kind} keys")]
    IncompatibleAlgorithm {
        algorithm: String,
        key_kind: &'static str,
    },

    #[error("shared secret must not be empty")]
    EmptySecret,

    #[error("invalid verification key: {0}")]
    InvalidKey(#[source] jsonwebtoken::errors::Error),
}
