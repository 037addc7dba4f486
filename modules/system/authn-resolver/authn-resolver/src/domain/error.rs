//! Domain errors for token issuance.

use authn_resolver_sdk::DirectoryError;
use tollgate_token::IssueError;

#[derive(thiserror::Error, Debug)]
pub enum DomainError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("demo login is disabled")]
    DemoDisabled,

    #[error("Access denied. User is not an administrator")]
    NotAdministrator,

    #[error("authentication required")]
    Unauthenticated,

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("principal '{0}' not found")]
    PrincipalNotFound(String),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error("token issuance failed: {0}")]
    Issue(#[from] IssueError),
}

impl DomainError {
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }
}
