use thiserror::Error;

/// Why a presented token was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The expiry has elapsed. Reported before the signature is checked.
    #[error("token expired")]
    Expired,

    /// Not a structurally valid token, or the claims break an invariant.
    #[error("malformed token: {0}")]
    Malformed(String),

    /// Well formed, but not signed by our key.
    #[error("invalid token signature")]
    BadSignature,
}

impl TokenError {
    pub(crate) fn malformed(detail: impl Into<String>) -> Self {
        Self::Malformed(detail.into())
    }
}

/// Why a token could not be issued.
#[derive(Debug, Error)]
pub enum IssueError {
    #[error("subject must not be empty")]
    EmptySubject,

    #[error("at least one role is required")]
    NoRoles,

    #[error("token lifetime must be at least one second")]
    InvalidTtl,

    #[error("custom claim `{0}` collides with a registered claim")]
    ReservedClaim(String),

    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}
