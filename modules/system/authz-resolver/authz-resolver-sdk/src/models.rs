//! Domain models for the `AuthZ` resolver module.

use std::fmt;

use serde::{Deserialize, Serialize};
use tollgate_security::{Principal, PrincipalId, Role};

/// Owner of a protected resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceOwner {
    pub id: PrincipalId,
    pub subject: String,
    pub role: Role,
}

impl ResourceOwner {
    #[must_use]
    pub fn new(id: PrincipalId, subject: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            subject: subject.into(),
            role,
        }
    }
}

/// Input of a policy evaluation.
///
/// `owner: None` means the resource does not exist.
#[derive(Debug, Clone, Default)]
pub struct EvaluationRequest {
    pub principal: Option<Principal>,
    pub owner: Option<ResourceOwner>,
}

impl EvaluationRequest {
    #[must_use]
    pub fn new(principal: Option<&Principal>, owner: Option<&ResourceOwner>) -> Self {
        Self {
            principal: principal.cloned(),
            owner: owner.cloned(),
        }
    }
}

/// Outcome of a policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Forbidden(DenyReason),
    NotFound,
}

impl Decision {
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Why access was refused. The `Display` text is safe to return to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// No principal on the request.
    Unauthenticated,
    /// Demo sessions never reach persisted storage.
    DemoSession,
    /// A user acting on someone else's resource.
    NotOwner,
    /// An administrator acting on another administrator's resource.
    PrivilegedOwner,
    /// Acting on behalf of another user without an administrative role.
    NotAdministrator,
}

impl DenyReason {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Unauthenticated => "User is not authenticated",
            Self::DemoSession => "Demo sessions cannot access stored resources",
            Self::NotOwner => "You do not have permission to access this resource",
            Self::PrivilegedOwner => {
                "Administrators cannot access resources owned by other administrators"
            }
            Self::NotAdministrator => "You do not have permission to act on behalf of other users",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
