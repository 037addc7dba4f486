//! Principal resolution.
//!
//! A verified token is turned into one of three principal shapes:
//!
//! 1. `ROLE_DEMO` in the role set: a demo principal, no lookup
//! 2. `ROLE_ADMIN` / `ROLE_SUPER_ADMIN`: a claim-only privileged principal,
//!    checked against the directory only when configured
//! 3. anything else: the persisted account named by the subject

use std::sync::Arc;

use authn_resolver_sdk::{AuthNError, PrincipalDirectory, PrincipalRecord};
use tollgate_security::constants::{ROLE_ADMIN, ROLE_SUPER_ADMIN};
use tollgate_security::{AdminLevel, DemoPrincipal, Principal, PrivilegedPrincipal, Role};
use tollgate_token::{Claims, TokenCodec};

use crate::config::AuthNResolverConfig;

pub struct Service {
    codec: Arc<TokenCodec>,
    directory: Arc<dyn PrincipalDirectory>,
    verify_privileged: bool,
}

impl Service {
    #[must_use]
    pub fn new(
        codec: Arc<TokenCodec>,
        directory: Arc<dyn PrincipalDirectory>,
        config: &AuthNResolverConfig,
    ) -> Self {
        Self {
            codec,
            directory,
            verify_privileged: config.verify_privileged_against_directory,
        }
    }

    /// Verify `bearer_token` and resolve the principal it names.
    ///
    /// # Errors
    ///
    /// Token verification failures, `InvalidPrincipal` when no usable account
    /// backs the subject, `DirectoryUnavailable` when the lookup itself failed.
    #[tracing::instrument(skip_all)]
    pub async fn authenticate(&self, bearer_token: &str) -> Result<Principal, AuthNError> {
        let claims = self.codec.verify(bearer_token)?;

        if claims.is_demo() {
            tracing::debug!(subject = claims.subject(), "resolved demo principal");
            return Ok(Principal::Demo(DemoPrincipal::new(claims.subject())));
        }

        if let Some(level) = admin_level(&claims) {
            return self.privileged(&claims, level).await;
        }

        self.persisted(&claims).await
    }

    async fn privileged(&self, claims: &Claims, level: AdminLevel) -> Result<Principal, AuthNError> {
        if !self.verify_privileged {
            tracing::debug!(subject = claims.subject(), ?level, "resolved claim-only administrator");
            return Ok(Principal::Privileged(PrivilegedPrincipal::from_claims(
                claims.subject(),
                level,
            )));
        }

        let record = self.lookup(claims.subject()).await?;
        let current = match record.role {
            Role::SuperAdmin => AdminLevel::SuperAdmin,
            Role::Admin => AdminLevel::Admin,
            Role::User | Role::Demo => {
                tracing::warn!(
                    subject = claims.subject(),
                    role = %record.role,
                    "administrative token for an account that is no longer an administrator"
                );
                return Err(AuthNError::InvalidPrincipal(claims.subject().to_owned()));
            }
        };

        Ok(Principal::Privileged(
            PrivilegedPrincipal::from_claims(claims.subject(), current).with_id(record.id),
        ))
    }

    async fn persisted(&self, claims: &Claims) -> Result<Principal, AuthNError> {
        let record = self.lookup(claims.subject()).await?;
        let mut principal = record.to_principal();

        if let Some(impersonation) = claims.impersonation() {
            if impersonation.impersonated_id != record.id {
                tracing::warn!(
                    subject = claims.subject(),
                    "impersonation marker does not match the subject's account"
                );
                return Err(AuthNError::InvalidPrincipal(claims.subject().to_owned()));
            }
            tracing::info!(
                subject = claims.subject(),
                admin_id = %impersonation.admin_id,
                "request runs under impersonation"
            );
            principal = principal.impersonated_by(impersonation.admin_id);
        }

        Ok(Principal::Persisted(principal))
    }

    async fn lookup(&self, subject: &str) -> Result<PrincipalRecord, AuthNError> {
        match self.directory.find_principal_by_subject(subject).await {
            Ok(Some(record)) => Ok(record),
            Ok(None) => {
                tracing::debug!(subject, "token subject has no account");
                Err(AuthNError::InvalidPrincipal(subject.to_owned()))
            }
            Err(e) => {
                tracing::error!(error = %e, subject, "principal lookup failed");
                Err(e.into())
            }
        }
    }
}

fn admin_level(claims: &Claims) -> Option<AdminLevel> {
    if claims.has_role(ROLE_SUPER_ADMIN) {
        Some(AdminLevel::SuperAdmin)
    } else if claims.has_role(ROLE_ADMIN) {
        Some(AdminLevel::Admin)
    } else {
        None
    }
}
