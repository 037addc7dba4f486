//! Domain models for the `AuthN` resolver module.

use tollgate_security::{Authority, PersistedPrincipal, Principal, PrincipalId, Role};

/// A persisted account as returned by a [`crate::PrincipalDirectory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalRecord {
    pub id: PrincipalId,
    pub subject: String,
    pub role: Role,
    pub authorities: Vec<Authority>,
}

impl PrincipalRecord {
    /// Record whose authorities are the ones derived from `role`.
    #[must_use]
    pub fn new(id: PrincipalId, subject: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            subject: subject.into(),
            role,
            authorities: role.authorities(),
        }
    }

    #[must_use]
    pub fn to_principal(&self) -> PersistedPrincipal {
        PersistedPrincipal::new(
            self.id,
            self.subject.clone(),
            self.role,
            self.authorities.clone(),
        )
    }
}

/// Result of a successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// The principal to install into the request's `SecurityContext`.
    pub principal: Principal,
}
