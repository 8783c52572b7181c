//! Errors raised while building specifications.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// A variadic `and`/`or` was given no specifications.
    #[error("cannot build an empty `{op}` specification")]
    EmptyComposite { op: &'static str },
}
