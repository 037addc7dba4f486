//! Public API traits for the `AuthN` resolver.

use async_trait::async_trait;
use tollgate_security::PrincipalId;

use crate::error::{AuthNError, DirectoryError};
use crate::models::{AuthenticationResult, PrincipalRecord};

/// Resolves bearer tokens into principals.
///
/// Consumed by the HTTP layer:
///
/// ```ignore
/// let result = authn.authenticate(token).await?;
/// ```
#[async_trait]
pub trait AuthNResolverClient: Send + Sync {
    /// Authenticate a bearer token and return the resolved principal.
    ///
    /// # Arguments
    ///
    /// * `bearer_token` - The raw token (without the "Bearer " prefix)
    ///
    /// # Errors
    ///
    /// - `Expired`, `Malformed`, `BadSignature` from token verification
    /// - `InvalidPrincipal` if the subject has no persisted account
    /// - `DirectoryUnavailable` if the account lookup failed
    async fn authenticate(&self, bearer_token: &str) -> Result<AuthenticationResult, AuthNError>;
}

/// Point lookups against the store of persisted accounts.
///
/// A missing account is `Ok(None)`; errors are reserved for infrastructure
/// failures.
#[async_trait]
pub trait PrincipalDirectory: Send + Sync {
    /// # Errors
    ///
    /// [`DirectoryError`] when the backing store cannot be queried.
    async fn find_principal_by_subject(
        &self,
        subject: &str,
    ) -> Result<Option<PrincipalRecord>, DirectoryError>;

    /// # Errors
    ///
    /// [`DirectoryError`] when the backing store cannot be queried.
    async fn find_principal_by_id(
        &self,
        id: PrincipalId,
    ) -> Result<Option<PrincipalRecord>, DirectoryError>;
}
