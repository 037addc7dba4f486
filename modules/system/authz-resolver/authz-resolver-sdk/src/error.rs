//! Error types for the `AuthZ` resolver module.

use authn_resolver_sdk::DirectoryError;
use thiserror::Error;

/// Failure to evaluate the policy itself.
///
/// Access denial is expressed via [`crate::Decision`], not as an error variant.
#[derive(Debug, Error)]
pub enum AuthZResolverError {
    #[error("internal error: {0}")]
    Internal(String),
}

/// Failure of an owner lookup.
#[derive(Debug, Clone, Error)]
#[error("owner lookup failed: {0}")]
pub struct LookupError(pub String);

impl From<DirectoryError> for LookupError {
    fn from(e: DirectoryError) -> Self {
        Self(e.to_string())
    }
}

/// Failure of a [`crate::ResourceStore`].
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("resource not found")]
    NotFound,

    /// The id is already taken.
    #[error("resource already exists")]
    Conflict,

    #[error("storage failure: {0}")]
    Backend(String),
}

/// Result of the enforcement flow, ready to be mapped at the transport boundary.
#[derive(Debug, Error)]
pub enum AuthZError {
    /// 403; the message is safe for clients.
    #[error("{0}")]
    Forbidden(String),

    /// 404
    #[error("resource not found")]
    NotFound,

    /// 500
    #[error("lookup failed: {0}")]
    LookupFailed(String),
}

impl From<LookupError> for AuthZError {
    fn from(e: LookupError) -> Self {
        Self::LookupFailed(e.0)
    }
}

impl From<DirectoryError> for AuthZError {
    fn from(e: DirectoryError) -> Self {
        Self::LookupFailed(e.to_string())
    }
}

impl From<AuthZResolverError> for AuthZError {
    fn from(e: AuthZResolverError) -> Self {
        Self::LookupFailed(e.to_string())
    }
}
