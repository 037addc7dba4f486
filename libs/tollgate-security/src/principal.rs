//! The resolved identity of a request.
//!
//! A [`Principal`] is built fresh by the resolver for every request and is
//! never persisted. The variants capture how much the identity can be trusted
//! and whether it has persisted backing.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{DEMO_PRINCIPAL_ID, ROLE_DEMO};
use crate::role::{Authority, Role};

/// Numeric account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(i64);

impl PrincipalId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for PrincipalId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Administrative level of a claim-only principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminLevel {
    Admin,
    SuperAdmin,
}

impl AdminLevel {
    #[must_use]
    pub const fn role(self) -> Role {
        match self {
            Self::Admin => Role::Admin,
            Self::SuperAdmin => Role::SuperAdmin,
        }
    }
}

/// Principal backed by a persisted account record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedPrincipal {
    id: PrincipalId,
    subject: String,
    role: Role,
    authorities: Vec<Authority>,
    impersonated_by: Option<PrincipalId>,
}

impl PersistedPrincipal {
    #[must_use]
    pub fn new(
        id: PrincipalId,
        subject: impl Into<String>,
        role: Role,
        authorities: Vec<Authority>,
    ) -> Self {
        Self {
            id,
            subject: subject.into(),
            role,
            authorities,
            impersonated_by: None,
        }
    }

    /// Mark this principal as being driven by an administrator.
    #[must_use]
    pub fn impersonated_by(mut self, admin_id: PrincipalId) -> Self {
        self.impersonated_by = Some(admin_id);
        self
    }

    #[must_use]
    pub fn id(&self) -> PrincipalId {
        self.id
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn authorities(&self) -> &[Authority] {
        &self.authorities
    }

    /// The administrator acting under this identity, if any.
    #[must_use]
    pub fn impersonator(&self) -> Option<PrincipalId> {
        self.impersonated_by
    }
}

/// Ephemeral identity without persisted backing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoPrincipal {
    subject: String,
}

impl DemoPrincipal {
    #[must_use]
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }
}

/// Administrative identity resolved from token claims alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivilegedPrincipal {
    id: Option<PrincipalId>,
    subject: String,
    level: AdminLevel,
}

impl PrivilegedPrincipal {
    #[must_use]
    pub fn from_claims(subject: impl Into<String>, level: AdminLevel) -> Self {
        Self {
            id: None,
            subject: subject.into(),
            level,
        }
    }

    /// Attach the id of the directory record the claims were checked against.
    #[must_use]
    pub fn with_id(mut self, id: PrincipalId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn id(&self) -> Option<PrincipalId> {
        self.id
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn level(&self) -> AdminLevel {
        self.level
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    Persisted(PersistedPrincipal),
    Demo(DemoPrincipal),
    Privileged(PrivilegedPrincipal),
}

impl Principal {
    /// Account id. Demo principals report the synthetic id; claim-only
    /// administrators have none unless verified against the directory.
    #[must_use]
    pub fn id(&self) -> Option<PrincipalId> {
        match self {
            Self::Persisted(p) => Some(p.id),
            Self::Demo(_) => Some(DEMO_PRINCIPAL_ID),
            Self::Privileged(p) => p.id,
        }
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        match self {
            Self::Persisted(p) => &p.subject,
            Self::Demo(p) => &p.subject,
            Self::Privileged(p) => &p.subject,
        }
    }

    #[must_use]
    pub fn role(&self) -> Role {
        match self {
            Self::Persisted(p) => p.role,
            Self::Demo(_) => Role::Demo,
            Self::Privileged(p) => p.level.role(),
        }
    }

    #[must_use]
    pub fn authorities(&self) -> Cow<'_, [Authority]> {
        match self {
            Self::Persisted(p) => Cow::Borrowed(&p.authorities),
            Self::Demo(_) => Cow::Owned(vec![Authority::new(ROLE_DEMO)]),
            Self::Privileged(p) => Cow::Owned(p.level.role().authorities()),
        }
    }

    #[must_use]
    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities().iter().any(|a| a.as_str() == authority)
    }

    #[must_use]
    pub fn is_ephemeral(&self) -> bool {
        matches!(self, Self::Demo(_))
    }

    #[must_use]
    pub fn is_administrative(&self) -> bool {
        self.role().is_administrative()
    }

    /// Whether this principal is the account identified by `id` / `subject`.
    ///
    /// Ids are compared when the principal has one, subjects otherwise.
    #[must_use]
    pub fn refers_to(&self, id: PrincipalId, subject: &str) -> bool {
        if self.is_ephemeral() {
            return false;
        }
        self.id()
            .map_or_else(|| self.subject() == subject, |own| own == id)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn demo_principal_has_synthetic_identity() {
        let p = Principal::Demo(DemoPrincipal::new("TEST"));

        assert_eq!(p.id(), Some(PrincipalId::new(0)));
        assert_eq!(p.role(), Role::Demo);
        assert_eq!(p.authorities().as_ref(), [Authority::new("ROLE_DEMO")]);
        assert!(p.is_ephemeral());
        assert!(!p.is_administrative());
    }

    #[test]
    fn privileged_principal_derives_authorities_from_level() {
        let p = Principal::Privileged(PrivilegedPrincipal::from_claims(
            "root",
            AdminLevel::SuperAdmin,
        ));

        assert_eq!(p.id(), None);
        assert_eq!(p.role(), Role::SuperAdmin);
        assert!(p.has_authority("ROLE_SUPER_ADMIN"));
        assert!(p.has_authority("admin:delete"));
        assert!(p.is_administrative());
    }

    #[test]
    fn persisted_principal_keeps_record_authorities() {
        let p = Principal::Persisted(
            PersistedPrincipal::new(
                PrincipalId::new(7),
                "alice@example.com",
                Role::User,
                Role::User.authorities(),
            )
            .impersonated_by(PrincipalId::new(1)),
        );

        assert_eq!(p.id(), Some(PrincipalId::new(7)));
        assert!(p.has_authority("ROLE_USER"));
        assert!(!p.has_authority("ROLE_ADMIN"));
        let Principal::Persisted(inner) = &p else {
            panic!("expected persisted principal");
        };
        assert_eq!(inner.impersonator(), Some(PrincipalId::new(1)));
    }

    #[test]
    fn refers_to_compares_ids_when_present() {
        let p = Principal::Persisted(PersistedPrincipal::new(
            PrincipalId::new(7),
            "alice",
            Role::User,
            Vec::new(),
        ));

        assert!(p.refers_to(PrincipalId::new(7), "someone-else"));
        assert!(!p.refers_to(PrincipalId::new(8), "alice"));
    }

    #[test]
    fn refers_to_falls_back_to_subject_without_id() {
        let p = Principal::Privileged(PrivilegedPrincipal::from_claims("ops1", AdminLevel::Admin));

        assert!(p.refers_to(PrincipalId::new(42), "ops1"));
        assert!(!p.refers_to(PrincipalId::new(42), "ops2"));
    }

    #[test]
    fn demo_never_refers_to_an_account() {
        let p = Principal::Demo(DemoPrincipal::new("TEST"));
        assert!(!p.refers_to(DEMO_PRINCIPAL_ID, "TEST"));
    }
}
