//! Local (in-process) client for the `AuthZ` resolver.

use async_trait::async_trait;
use authz_resolver_sdk::{AuthZResolverClient, AuthZResolverError, Decision, EvaluationRequest};
use tollgate_security::Principal;

use super::policy::authorize;

/// Evaluates the ownership policy in process.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthZResolverLocalClient;

impl AuthZResolverLocalClient {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuthZResolverClient for AuthZResolverLocalClient {
    async fn evaluate(&self, request: EvaluationRequest) -> Result<Decision, AuthZResolverError> {
        let decision = authorize(request.principal.as_ref(), request.owner.as_ref());
        tracing::trace!(
            subject = request.principal.as_ref().map(Principal::subject),
            owner = request.owner.as_ref().map(|o| o.subject.as_str()),
            ?decision,
            "policy evaluated"
        );
        Ok(decision)
    }
}
