//! Local (in-process) client for the `AuthN` resolver.

use std::sync::Arc;

use async_trait::async_trait;
use authn_resolver_sdk::{AuthNError, AuthNResolverClient, AuthenticationResult};

use super::Service;

/// Local client wrapping the service.
pub struct AuthNResolverLocalClient {
    svc: Arc<Service>,
}

impl AuthNResolverLocalClient {
    #[must_use]
    pub fn new(svc: Arc<Service>) -> Self {
        Self { svc }
    }
}

fn log_rejection(op: &str, e: AuthNError) -> AuthNError {
    if e.is_credential_failure() {
        tracing::debug!(operation = op, error = %e, "bearer token rejected");
    } else {
        tracing::error!(operation = op, error = %e, "authn_resolver call failed");
    }
    e
}

#[async_trait]
impl AuthNResolverClient for AuthNResolverLocalClient {
    async fn authenticate(&self, bearer_token: &str) -> Result<AuthenticationResult, AuthNError> {
        self.svc
            .authenticate(bearer_token)
            .await
            .map(|principal| AuthenticationResult { principal })
            .map_err(|e| log_rejection("authenticate", e))
    }
}
