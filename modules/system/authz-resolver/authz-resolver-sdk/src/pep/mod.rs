//! PEP (Policy Enforcement Point) helpers.
//!
//! - [`authorize`] - evaluate a policy and run the guarded operation
//! - [`Gate`] - policy + resource name, built once when routes are defined
//! - [`authorize_request`] - same check, reading the client from request extensions

pub mod gate;
pub mod request;

pub use gate::{Gate, authorize};
pub use request::authorize_request;
