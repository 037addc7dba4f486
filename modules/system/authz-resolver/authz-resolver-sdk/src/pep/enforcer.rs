//! Policy Enforcement Point (`PEP`) object.
//!
//! [`PolicyEnforcer`] encapsulates the full PEP flow:
//! resolve the owner, call the policy, turn the decision into [`Access`].
//!
//! Constructed once during service initialisation. The owner lookup is
//! supplied per call, so a single enforcer can serve every resource type.

use std::sync::Arc;

use authn_resolver_sdk::PrincipalDirectory;
use tollgate_security::{Principal, PrincipalId, SecurityContext};
use uuid::Uuid;

use crate::api::{AuthZResolverClient, ResourceOwnerLookup};
use crate::error::AuthZError;
use crate::models::{Decision, DenyReason, EvaluationRequest, ResourceOwner};
use crate::pep::Access;

/// Policy Enforcement Point.
///
/// Cloneable and cheap to pass around (`Arc` inside).
///
/// ```ignore
/// let enforcer = PolicyEnforcer::new(authz.clone(), directory.clone());
///
/// let access = enforcer.access(&ctx, owners.as_ref(), id).await?;
/// let access = enforcer.on_behalf_of(&ctx, target_user_id).await?;
/// let access = enforcer.own(&ctx).await?;
/// ```
#[derive(Clone)]
pub struct PolicyEnforcer {
    authz: Arc<dyn AuthZResolverClient>,
    directory: Arc<dyn PrincipalDirectory>,
}

impl PolicyEnforcer {
    #[must_use]
    pub fn new(
        authz: Arc<dyn AuthZResolverClient>,
        directory: Arc<dyn PrincipalDirectory>,
    ) -> Self {
        Self { authz, directory }
    }

    /// Authorize the current principal against an existing resource.
    ///
    /// Demo principals get [`Access::Ephemeral`] without an owner lookup.
    ///
    /// # Errors
    ///
    /// - [`AuthZError::NotFound`] if the resource does not exist
    /// - [`AuthZError::Forbidden`] if the policy denies access
    /// - [`AuthZError::LookupFailed`] if the owner lookup failed
    #[tracing::instrument(skip_all, fields(resource_id = %resource_id))]
    pub async fn access(
        &self,
        ctx: &SecurityContext,
        owners: &dyn ResourceOwnerLookup,
        resource_id: Uuid,
    ) -> Result<Access, AuthZError> {
        if ctx.principal().is_some_and(Principal::is_ephemeral) {
            tracing::debug!("demo principal routed to ephemeral storage");
            return Ok(Access::Ephemeral);
        }

        let owner = owners.find_resource_owner(resource_id).await.map_err(|e| {
            tracing::error!(error = %e, "resource owner lookup failed");
            AuthZError::from(e)
        })?;

        self.enforce(ctx.principal(), owner).await
    }

    /// Authorize acting on behalf of another account, e.g. creating a
    /// resource owned by `target`.
    ///
    /// Demo principals get [`Access::Ephemeral`] whatever the target. Otherwise
    /// only administrators may delegate; the check runs before the lookup.
    ///
    /// # Errors
    ///
    /// - [`AuthZError::Forbidden`] for non-administrators or a denied target
    /// - [`AuthZError::NotFound`] if `target` has no account
    /// - [`AuthZError::LookupFailed`] if the directory failed
    #[tracing::instrument(skip_all, fields(target_id = %target))]
    pub async fn on_behalf_of(
        &self,
        ctx: &SecurityContext,
        target: PrincipalId,
    ) -> Result<Access, AuthZError> {
        let principal = ctx.principal();
        if principal.is_some_and(Principal::is_ephemeral) {
            tracing::debug!("demo delegation routed to ephemeral storage");
            return Ok(Access::Ephemeral);
        }
        if !principal.is_some_and(Principal::is_administrative) {
            tracing::debug!("delegation refused for non-administrator");
            return Err(forbidden(DenyReason::NotAdministrator));
        }

        let owner = self
            .directory
            .find_principal_by_id(target)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "delegation target lookup failed");
                AuthZError::from(e)
            })?
            .map(|record| ResourceOwner::new(record.id, record.subject, record.role));

        self.enforce(principal, owner).await
    }

    /// Access to the current principal's own resources.
    ///
    /// A claim-only administrator is mapped to its account by subject.
    ///
    /// # Errors
    ///
    /// - [`AuthZError::Forbidden`] without a principal or a backing account
    /// - [`AuthZError::LookupFailed`] if the directory failed
    pub async fn own(&self, ctx: &SecurityContext) -> Result<Access, AuthZError> {
        let Some(principal) = ctx.principal() else {
            return Err(forbidden(DenyReason::Unauthenticated));
        };
        if principal.is_ephemeral() {
            return Ok(Access::Ephemeral);
        }
        if let Some(id) = principal.id() {
            return Ok(Access::Granted(ResourceOwner::new(
                id,
                principal.subject(),
                principal.role(),
            )));
        }

        let record = self
            .directory
            .find_principal_by_subject(principal.subject())
            .await?;
        match record {
            Some(record) => Ok(Access::Granted(ResourceOwner::new(
                record.id,
                record.subject,
                record.role,
            ))),
            None => {
                tracing::warn!(
                    subject = principal.subject(),
                    "administrator token without a stored account"
                );
                Err(AuthZError::Forbidden(
                    "No stored account for the current user".to_owned(),
                ))
            }
        }
    }

    async fn enforce(
        &self,
        principal: Option<&Principal>,
        owner: Option<ResourceOwner>,
    ) -> Result<Access, AuthZError> {
        let decision = self
            .authz
            .evaluate(EvaluationRequest::new(principal, owner.as_ref()))
            .await?;

        match decision {
            Decision::Allow => owner.map(Access::Granted).ok_or(AuthZError::NotFound),
            Decision::NotFound => Err(AuthZError::NotFound),
            Decision::Forbidden(reason) => {
                tracing::debug!(
                    subject = principal.map(Principal::subject),
                    ?reason,
                    "access denied"
                );
                Err(forbidden(reason))
            }
        }
    }
}

fn forbidden(reason: DenyReason) -> AuthZError {
    AuthZError::Forbidden(reason.to_string())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use authn_resolver_sdk::{DirectoryError, PrincipalRecord};
    use tollgate_security::{
        AdminLevel, DemoPrincipal, PersistedPrincipal, PrivilegedPrincipal, Role,
    };

    use super::*;
    use crate::error::{AuthZResolverError, LookupError};

    /// Owner-or-admin-over-user rule, enough to exercise the enforcer flow.
    struct OwnerRule;

    #[async_trait]
    impl AuthZResolverClient for OwnerRule {
        async fn evaluate(
            &self,
            request: EvaluationRequest,
        ) -> Result<Decision, AuthZResolverError> {
            let Some(owner) = request.owner else {
                return Ok(Decision::NotFound);
            };
            let Some(principal) = request.principal else {
                return Ok(Decision::Forbidden(DenyReason::Unauthenticated));
            };
            if principal.refers_to(owner.id, &owner.subject)
                || (principal.is_administrative() && owner.role == Role::User)
            {
                Ok(Decision::Allow)
            } else {
                Ok(Decision::Forbidden(DenyReason::NotOwner))
            }
        }
    }

    #[derive(Default)]
    struct Owners {
        owners: HashMap<Uuid, ResourceOwner>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ResourceOwnerLookup for Owners {
        async fn find_resource_owner(
            &self,
            resource_id: Uuid,
        ) -> Result<Option<ResourceOwner>, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.owners.get(&resource_id).cloned())
        }
    }

    struct FailingOwners;

    #[async_trait]
    impl ResourceOwnerLookup for FailingOwners {
        async fn find_resource_owner(
            &self,
            _resource_id: Uuid,
        ) -> Result<Option<ResourceOwner>, LookupError> {
            Err(LookupError("connection reset".to_owned()))
        }
    }

    #[derive(Default)]
    struct Directory {
        records: Vec<PrincipalRecord>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PrincipalDirectory for Directory {
        async fn find_principal_by_subject(
            &self,
            subject: &str,
        ) -> Result<Option<PrincipalRecord>, DirectoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.records.iter().find(|r| r.subject == subject).cloned())
        }

        async fn find_principal_by_id(
            &self,
            id: PrincipalId,
        ) -> Result<Option<PrincipalRecord>, DirectoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.records.iter().find(|r| r.id == id).cloned())
        }
    }

    fn ctx(principal: Principal) -> SecurityContext {
        SecurityContext::builder().principal(principal).build()
    }

    fn user(id: i64, subject: &str) -> Principal {
        Principal::Persisted(PersistedPrincipal::new(
            PrincipalId::new(id),
            subject,
            Role::User,
            Role::User.authorities(),
        ))
    }

    fn admin(subject: &str) -> Principal {
        Principal::Privileged(PrivilegedPrincipal::from_claims(subject, AdminLevel::Admin))
    }

    fn directory() -> Arc<Directory> {
        Arc::new(Directory {
            records: vec![
                PrincipalRecord::new(PrincipalId::new(1), "ops1", Role::Admin),
                PrincipalRecord::new(PrincipalId::new(7), "alice", Role::User),
            ],
            calls: AtomicUsize::new(0),
        })
    }

    fn enforcer(directory: Arc<Directory>) -> PolicyEnforcer {
        PolicyEnforcer::new(Arc::new(OwnerRule), directory)
    }

    #[tokio::test]
    async fn demo_is_ephemeral_without_lookup() {
        let owners = Owners::default();
        let ctx = ctx(Principal::Demo(DemoPrincipal::new("TEST")));

        let access = enforcer(directory())
            .access(&ctx, &owners, Uuid::new_v4())
            .await
            .unwrap();

        assert_eq!(access, Access::Ephemeral);
        assert_eq!(owners.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_resource_is_not_found() {
        let owners = Owners::default();

        let err = enforcer(directory())
            .access(&ctx(user(7, "alice")), &owners, Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(matches!(err, AuthZError::NotFound));
    }

    #[tokio::test]
    async fn owner_is_granted() {
        let id = Uuid::new_v4();
        let owner = ResourceOwner::new(PrincipalId::new(7), "alice", Role::User);
        let owners = Owners {
            owners: HashMap::from([(id, owner.clone())]),
            calls: AtomicUsize::new(0),
        };

        let access = enforcer(directory())
            .access(&ctx(user(7, "alice")), &owners, id)
            .await
            .unwrap();

        assert_eq!(access, Access::Granted(owner));
    }

    #[tokio::test]
    async fn lookup_failure_is_surfaced() {
        let err = enforcer(directory())
            .access(&ctx(user(7, "alice")), &FailingOwners, Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(matches!(err, AuthZError::LookupFailed(_)));
    }

    #[tokio::test]
    async fn delegation_requires_administrator_before_lookup() {
        let dir = directory();

        let err = enforcer(dir.clone())
            .on_behalf_of(&ctx(user(7, "alice")), PrincipalId::new(1))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthZError::Forbidden(_)));
        assert_eq!(dir.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn demo_delegation_is_ephemeral_without_lookup() {
        let dir = directory();

        let access = enforcer(dir.clone())
            .on_behalf_of(
                &ctx(Principal::Demo(DemoPrincipal::new("TEST"))),
                PrincipalId::new(7),
            )
            .await
            .unwrap();

        assert_eq!(access, Access::Ephemeral);
        assert_eq!(dir.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn delegation_to_unknown_target_is_not_found() {
        let err = enforcer(directory())
            .on_behalf_of(&ctx(admin("ops1")), PrincipalId::new(99))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthZError::NotFound));
    }

    #[tokio::test]
    async fn delegation_applies_policy_to_target() {
        let access = enforcer(directory())
            .on_behalf_of(&ctx(admin("ops1")), PrincipalId::new(7))
            .await
            .unwrap();

        assert_eq!(access.owner().map(|o| o.subject.as_str()), Some("alice"));
    }

    #[tokio::test]
    async fn own_without_principal_is_forbidden() {
        let err = enforcer(directory())
            .own(&SecurityContext::anonymous())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), DenyReason::Unauthenticated.message());
    }

    #[tokio::test]
    async fn own_maps_claim_only_admin_by_subject() {
        let access = enforcer(directory()).own(&ctx(admin("ops1"))).await.unwrap();

        assert_eq!(access.owner().map(|o| o.id), Some(PrincipalId::new(1)));
    }

    #[tokio::test]
    async fn own_for_demo_is_ephemeral() {
        let access = enforcer(directory())
            .own(&ctx(Principal::Demo(DemoPrincipal::new("TEST"))))
            .await
            .unwrap();

        assert!(access.is_ephemeral());
    }
}
