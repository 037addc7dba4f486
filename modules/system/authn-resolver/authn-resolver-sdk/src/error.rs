//! Error types for the `AuthN` resolver module.

use thiserror::Error;
use tollgate_token::TokenError;

/// Why a request could not be authenticated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthNError {
    #[error("token expired")]
    Expired,

    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("invalid token signature")]
    BadSignature,

    /// The token is valid but names no usable account.
    #[error("no principal for subject '{0}'")]
    InvalidPrincipal(String),

    #[error("principal directory unavailable: {0}")]
    DirectoryUnavailable(String),
}

impl AuthNError {
    /// Message returned to the client in the `error` field.
    #[must_use]
    pub const fn client_message(&self) -> &'static str {
        match self {
            Self::Expired => "Token expired",
            Self::Malformed(_) => "Malformed JWT",
            Self::BadSignature => "Invalid JWT signature",
            Self::InvalidPrincipal(_) => "Invalid token",
            Self::DirectoryUnavailable(_) => "Authentication service unavailable",
        }
    }

    /// Whether the failure is the caller's credentials rather than our infrastructure.
    #[must_use]
    pub const fn is_credential_failure(&self) -> bool {
        !matches!(self, Self::DirectoryUnavailable(_))
    }
}

impl From<TokenError> for AuthNError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Expired => Self::Expired,
            TokenError::Malformed(detail) => Self::Malformed(detail),
            TokenError::BadSignature => Self::BadSignature,
        }
    }
}

/// Failure of the account store itself.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

impl From<DirectoryError> for AuthNError {
    fn from(e: DirectoryError) -> Self {
        match e {
            DirectoryError::Unavailable(msg) => Self::DirectoryUnavailable(msg),
        }
    }
}
