//! Token issuance.
//!
//! Credential verification for persisted accounts happens elsewhere; the
//! issuer signs tokens for accounts that are already known to be genuine.

use std::sync::Arc;

use authn_resolver_sdk::{DirectoryError, PrincipalDirectory, PrincipalRecord};
use authz_resolver_sdk::{Access, AuthZError, PolicyEnforcer};
use secrecy::ExposeSecret;
use tollgate_security::constants::{DEMO_SUBJECT, ROLE_DEMO};
use tollgate_security::{Authority, PrincipalId, Role, SecurityContext};
use tollgate_token::{Impersonation, TokenCodec};

use super::DomainError;
use crate::config::DemoLoginConfig;

/// A signed token together with what it grants.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub subject: String,
    pub roles: Vec<String>,
}

impl IssuedToken {
    fn new(token: String, subject: impl Into<String>, authorities: &[Authority]) -> Self {
        Self {
            token,
            subject: subject.into(),
            roles: authorities.iter().map(|a| a.as_str().to_owned()).collect(),
        }
    }
}

pub struct TokenIssuer {
    codec: Arc<TokenCodec>,
    directory: Arc<dyn PrincipalDirectory>,
    enforcer: PolicyEnforcer,
    demo: DemoLoginConfig,
}

impl TokenIssuer {
    #[must_use]
    pub fn new(
        codec: Arc<TokenCodec>,
        directory: Arc<dyn PrincipalDirectory>,
        enforcer: PolicyEnforcer,
        demo: DemoLoginConfig,
    ) -> Self {
        Self {
            codec,
            directory,
            enforcer,
            demo,
        }
    }

    /// Standard token for an authenticated account.
    ///
    /// # Errors
    ///
    /// [`DomainError::Issue`] if signing fails.
    pub fn issue_for(&self, record: &PrincipalRecord) -> Result<IssuedToken, DomainError> {
        let token = self
            .codec
            .issue_standard(&record.subject, &record.authorities)?;
        tracing::info!(subject = %record.subject, role = %record.role, "token issued");
        Ok(IssuedToken::new(token, &record.subject, &record.authorities))
    }

    /// Like [`Self::issue_for`] but only for administrative accounts.
    ///
    /// # Errors
    ///
    /// [`DomainError::NotAdministrator`] for USER and DEMO accounts.
    pub fn issue_admin(&self, record: &PrincipalRecord) -> Result<IssuedToken, DomainError> {
        if !record.role.is_administrative() {
            tracing::warn!(subject = %record.subject, "admin login refused");
            return Err(DomainError::NotAdministrator);
        }
        self.issue_for(record)
    }

    /// Standard token for the account named `subject`.
    ///
    /// # Errors
    ///
    /// [`DomainError::PrincipalNotFound`] if no account has that subject.
    #[tracing::instrument(skip(self))]
    pub async fn issue_for_subject(&self, subject: &str) -> Result<IssuedToken, DomainError> {
        let record = self
            .directory
            .find_principal_by_subject(subject)
            .await?
            .ok_or_else(|| DomainError::PrincipalNotFound(subject.to_owned()))?;
        self.issue_for(&record)
    }

    /// Token for the shared demo identity.
    ///
    /// # Errors
    ///
    /// [`DomainError::DemoDisabled`] when demo sessions are switched off,
    /// [`DomainError::InvalidCredentials`] for anything but the configured pair.
    pub fn demo_login(&self, username: &str, password: &str) -> Result<IssuedToken, DomainError> {
        if !self.demo.enabled {
            return Err(DomainError::DemoDisabled);
        }
        if username != self.demo.username || password != self.demo.password.expose_secret() {
            tracing::debug!("demo login with wrong credentials");
            return Err(DomainError::InvalidCredentials);
        }

        let token = self.codec.issue_demo()?;
        tracing::info!("demo session started");
        Ok(IssuedToken::new(
            token,
            DEMO_SUBJECT,
            &[Authority::new(ROLE_DEMO)],
        ))
    }

    /// Token that lets the current administrator act as `target`.
    ///
    /// The ownership policy applies to the target: an admin may impersonate
    /// users only, a super admin anyone but a demo account.
    ///
    /// # Errors
    ///
    /// - [`DomainError::Unauthenticated`] without a principal
    /// - [`DomainError::Forbidden`] when the policy refuses
    /// - [`DomainError::PrincipalNotFound`] for an unknown target
    #[tracing::instrument(skip(self, ctx), fields(target_id = %target))]
    pub async fn impersonate(
        &self,
        ctx: &SecurityContext,
        target: PrincipalId,
    ) -> Result<IssuedToken, DomainError> {
        let Some(actor) = ctx.principal() else {
            return Err(DomainError::Unauthenticated);
        };

        let owner = match self.enforcer.on_behalf_of(ctx, target).await {
            Ok(Access::Granted(owner)) => owner,
            Ok(Access::Ephemeral) => {
                return Err(DomainError::forbidden("Demo sessions cannot impersonate"));
            }
            Err(AuthZError::Forbidden(reason)) => return Err(DomainError::Forbidden(reason)),
            Err(AuthZError::NotFound) => {
                return Err(DomainError::PrincipalNotFound(target.to_string()));
            }
            Err(AuthZError::LookupFailed(msg)) => {
                return Err(DirectoryError::Unavailable(msg).into());
            }
        };
        if owner.role == Role::Demo {
            return Err(DomainError::forbidden("Demo accounts cannot be impersonated"));
        }

        let admin_id = match actor.id() {
            Some(id) => id,
            None => self
                .directory
                .find_principal_by_subject(actor.subject())
                .await?
                .map(|record| record.id)
                .ok_or_else(|| {
                    DomainError::forbidden("Administrator has no stored account")
                })?,
        };

        let authorities = owner.role.authorities();
        let token = self.codec.issue_impersonation(
            &owner.subject,
            &authorities,
            Impersonation {
                impersonated_id: owner.id,
                admin_id,
            },
        )?;
        tracing::info!(
            admin = actor.subject(),
            %admin_id,
            subject = %owner.subject,
            "impersonation token issued"
        );
        Ok(IssuedToken::new(token, owner.subject, &authorities))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use authz_resolver::AuthZResolverLocalClient;
    use secrecy::SecretString;
    use tollgate_security::{AdminLevel, DemoPrincipal, Principal, PrivilegedPrincipal};
    use tollgate_token::SigningKey;

    use super::*;
    use crate::domain::test_support::MemoryDirectory;

    const SECRET_B64: &str = "MDEyMzQ1Njc4OWFiY2RlZjAxMjM0NTY3ODlhYmNkZWY=";

    fn records() -> Vec<PrincipalRecord> {
        vec![
            PrincipalRecord::new(PrincipalId::new(1), "root", Role::SuperAdmin),
            PrincipalRecord::new(PrincipalId::new(2), "ops1", Role::Admin),
            PrincipalRecord::new(PrincipalId::new(3), "ops2", Role::Admin),
            PrincipalRecord::new(PrincipalId::new(7), "alice", Role::User),
        ]
    }

    fn codec() -> Arc<TokenCodec> {
        Arc::new(TokenCodec::new(SigningKey::from_base64(SECRET_B64).unwrap()))
    }

    fn issuer_with(demo: DemoLoginConfig) -> TokenIssuer {
        let directory: Arc<dyn PrincipalDirectory> = Arc::new(MemoryDirectory::with(records()));
        let enforcer = PolicyEnforcer::new(Arc::new(AuthZResolverLocalClient::new()), directory.clone());
        TokenIssuer::new(codec(), directory, enforcer, demo)
    }

    fn issuer() -> TokenIssuer {
        issuer_with(DemoLoginConfig::default())
    }

    fn ctx(principal: Principal) -> SecurityContext {
        SecurityContext::builder().principal(principal).build()
    }

    fn persisted(record: &PrincipalRecord) -> Principal {
        Principal::Persisted(record.to_principal())
    }

    #[test]
    fn standard_token_carries_record_authorities() {
        let alice = &records()[3];

        let issued = issuer().issue_for(alice).unwrap();

        assert_eq!(issued.roles, vec!["ROLE_USER".to_owned()]);
        let claims = codec().verify(&issued.token).unwrap();
        assert_eq!(claims.subject(), "alice");
        assert!(claims.impersonation().is_none());
    }

    #[test]
    fn admin_issuance_refuses_users() {
        let err = issuer().issue_admin(&records()[3]).unwrap_err();

        assert_eq!(err.to_string(), "Access denied. User is not an administrator");
    }

    #[test]
    fn admin_issuance_accepts_super_admin() {
        let issued = issuer().issue_admin(&records()[0]).unwrap();

        assert!(issued.roles.iter().any(|r| r == "ROLE_SUPER_ADMIN"));
    }

    #[test]
    fn demo_login_requires_fixed_credentials() {
        assert!(matches!(
            issuer().demo_login("TEST", "nope").unwrap_err(),
            DomainError::InvalidCredentials
        ));

        let issued = issuer().demo_login("TEST", "TEST").unwrap();

        assert_eq!(issued.subject, "TEST");
        assert_eq!(issued.roles, vec!["ROLE_DEMO".to_owned()]);
        assert!(codec().is_demo_token(&issued.token).unwrap());
    }

    #[test]
    fn demo_login_can_be_disabled() {
        let issuer = issuer_with(DemoLoginConfig {
            enabled: false,
            username: "TEST".to_owned(),
            password: SecretString::from("TEST".to_owned()),
        });

        assert!(matches!(
            issuer.demo_login("TEST", "TEST").unwrap_err(),
            DomainError::DemoDisabled
        ));
    }

    #[tokio::test]
    async fn issue_for_unknown_subject_fails() {
        let err = issuer().issue_for_subject("ghost").await.unwrap_err();

        assert!(matches!(err, DomainError::PrincipalNotFound(s) if s == "ghost"));
    }

    #[tokio::test]
    async fn admin_impersonates_user() {
        let ops1 = &records()[1];

        let issued = issuer()
            .impersonate(&ctx(persisted(ops1)), PrincipalId::new(7))
            .await
            .unwrap();

        assert_eq!(issued.subject, "alice");
        assert_eq!(
            codec().extract_impersonated_id(&issued.token).unwrap(),
            Some(PrincipalId::new(7))
        );
        let claims = codec().verify(&issued.token).unwrap();
        assert_eq!(
            claims.impersonation().map(|i| i.admin_id),
            Some(PrincipalId::new(2))
        );
    }

    #[tokio::test]
    async fn admin_cannot_impersonate_other_admin() {
        let ops1 = &records()[1];

        let err = issuer()
            .impersonate(&ctx(persisted(ops1)), PrincipalId::new(3))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn super_admin_impersonates_admin() {
        let root = &records()[0];

        let issued = issuer()
            .impersonate(&ctx(persisted(root)), PrincipalId::new(3))
            .await
            .unwrap();

        assert_eq!(issued.subject, "ops2");
    }

    #[tokio::test]
    async fn user_cannot_impersonate() {
        let alice = &records()[3];

        let err = issuer()
            .impersonate(&ctx(persisted(alice)), PrincipalId::new(7))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn demo_cannot_impersonate() {
        let err = issuer()
            .impersonate(
                &ctx(Principal::Demo(DemoPrincipal::new("TEST"))),
                PrincipalId::new(7),
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DomainError::Forbidden(ref reason) if reason == "Demo sessions cannot impersonate"
        ));
    }

    #[tokio::test]
    async fn claim_only_admin_resolves_admin_id_by_subject() {
        let ops1 = Principal::Privileged(PrivilegedPrincipal::from_claims("ops1", AdminLevel::Admin));

        let issued = issuer()
            .impersonate(&ctx(ops1), PrincipalId::new(7))
            .await
            .unwrap();

        let claims = codec().verify(&issued.token).unwrap();
        assert_eq!(
            claims.impersonation().map(|i| i.admin_id),
            Some(PrincipalId::new(2))
        );
    }

    #[tokio::test]
    async fn claim_only_admin_without_account_is_forbidden() {
        let ghost = Principal::Privileged(PrivilegedPrincipal::from_claims("ghost", AdminLevel::Admin));

        let err = issuer()
            .impersonate(&ctx(ghost), PrincipalId::new(7))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn unknown_target_is_not_found() {
        let root = &records()[0];

        let err = issuer()
            .impersonate(&ctx(persisted(root)), PrincipalId::new(99))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::PrincipalNotFound(_)));
    }

    #[tokio::test]
    async fn anonymous_cannot_impersonate() {
        let err = issuer()
            .impersonate(&SecurityContext::anonymous(), PrincipalId::new(7))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Unauthenticated));
    }
}
