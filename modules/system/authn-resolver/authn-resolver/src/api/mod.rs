pub mod error;
pub mod middleware;
pub mod rest;

pub use error::{ErrorBody, authn_error_to_response, error_response};
