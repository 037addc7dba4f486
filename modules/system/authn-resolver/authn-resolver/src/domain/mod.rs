//! Domain layer for the `AuthN` resolver.

pub mod error;
pub mod issuer;
pub mod local_client;
pub mod service;

#[cfg(test)]
mod test_support;

pub use error::DomainError;
pub use issuer::{IssuedToken, TokenIssuer};
pub use local_client::AuthNResolverLocalClient;
pub use service::Service;
