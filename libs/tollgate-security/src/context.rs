use std::sync::{Arc, OnceLock};

use secrecy::SecretString;

use crate::principal::Principal;

/// `SecurityContext` holds the principal resolved for the current request.
///
/// It is request scoped and single assignment: the resolver installs a
/// principal at most once and later installs are rejected. Clones share the
/// same slot, so a context placed in request extensions before resolution
/// observes the principal installed afterwards.
#[derive(Debug, Clone, Default)]
pub struct SecurityContext {
    slot: Arc<OnceLock<Installed>>,
}

#[derive(Debug)]
struct Installed {
    principal: Principal,
    /// Original bearer token. Wrapped in `SecretString` so `Debug` redacts it.
    bearer_token: Option<SecretString>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    #[error("security context already holds a principal")]
    AlreadyPopulated,
}

impl SecurityContext {
    #[must_use]
    pub fn builder() -> SecurityContextBuilder {
        SecurityContextBuilder::default()
    }

    /// An empty context. Authorization treats it as "no principal".
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Install the resolved principal.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::AlreadyPopulated`] if a principal was installed
    /// earlier; the existing principal is left untouched.
    pub fn install(
        &self,
        principal: Principal,
        bearer_token: Option<SecretString>,
    ) -> Result<(), ContextError> {
        self.slot
            .set(Installed {
                principal,
                bearer_token,
            })
            .map_err(|_| ContextError::AlreadyPopulated)
    }

    /// The current principal, if one was installed.
    #[must_use]
    pub fn principal(&self) -> Option<&Principal> {
        self.slot.get().map(|installed| &installed.principal)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.slot.get().is_some()
    }

    #[must_use]
    pub fn bearer_token(&self) -> Option<&SecretString> {
        self.slot
            .get()
            .and_then(|installed| installed.bearer_token.as_ref())
    }
}

#[derive(Default)]
pub struct SecurityContextBuilder {
    principal: Option<Principal>,
    bearer_token: Option<SecretString>,
}

impl SecurityContextBuilder {
    #[must_use]
    pub fn principal(mut self, principal: Principal) -> Self {
        self.principal = Some(principal);
        self
    }

    #[must_use]
    pub fn bearer_token(mut self, token: impl Into<SecretString>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn build(self) -> SecurityContext {
        let slot = match self.principal {
            Some(principal) => OnceLock::from(Installed {
                principal,
                bearer_token: self.bearer_token,
            }),
            None => OnceLock::new(),
        };
        SecurityContext {
            slot: Arc::new(slot),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;
    use crate::principal::{DemoPrincipal, PersistedPrincipal, PrincipalId};
    use crate::role::Role;

    fn alice() -> Principal {
        Principal::Persisted(PersistedPrincipal::new(
            PrincipalId::new(7),
            "alice",
            Role::User,
            Role::User.authorities(),
        ))
    }

    #[test]
    fn anonymous_context_is_empty() {
        let ctx = SecurityContext::anonymous();

        assert!(ctx.principal().is_none());
        assert!(!ctx.is_authenticated());
        assert!(ctx.bearer_token().is_none());
    }

    #[test]
    fn builder_installs_principal_and_token() {
        let ctx = SecurityContext::builder()
            .principal(alice())
            .bearer_token("test-token-123".to_owned())
            .build();

        assert_eq!(ctx.principal().map(Principal::subject), Some("alice"));
        assert_eq!(
            ctx.bearer_token().map(ExposeSecret::expose_secret),
            Some("test-token-123"),
        );
    }

    #[test]
    fn second_install_is_rejected_and_first_kept() {
        let ctx = SecurityContext::anonymous();
        ctx.install(alice(), None).unwrap();

        let err = ctx
            .install(Principal::Demo(DemoPrincipal::new("TEST")), None)
            .unwrap_err();

        assert_eq!(err, ContextError::AlreadyPopulated);
        assert_eq!(ctx.principal().map(Principal::subject), Some("alice"));
    }

    #[test]
    fn clones_share_the_slot() {
        let ctx = SecurityContext::anonymous();
        let observer = ctx.clone();

        ctx.install(alice(), None).unwrap();

        assert!(observer.is_authenticated());
    }

    #[test]
    fn debug_redacts_bearer_token() {
        let ctx = SecurityContext::builder()
            .principal(alice())
            .bearer_token("super-secret-token-value".to_owned())
            .build();

        let debug_output = format!("{ctx:?}");

        assert!(!debug_output.contains("super-secret-token-value"));
        assert!(debug_output.contains("alice"));
    }
}
