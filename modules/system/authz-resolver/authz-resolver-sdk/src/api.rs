//! Public API traits for the `AuthZ` resolver.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{AuthZResolverError, LookupError};
use crate::models::{Decision, EvaluationRequest, ResourceOwner};

/// Ownership policy evaluation.
///
/// Consumed through [`crate::PolicyEnforcer`]; direct use:
///
/// ```ignore
/// let decision = authz.evaluate(EvaluationRequest::new(ctx.principal(), Some(&owner))).await?;
/// ```
#[async_trait]
pub trait AuthZResolverClient: Send + Sync {
    /// Evaluate a principal against a resource owner.
    ///
    /// Denial is a [`Decision`], not an error.
    ///
    /// # Errors
    ///
    /// `Internal` if the policy could not be evaluated at all.
    async fn evaluate(&self, request: EvaluationRequest) -> Result<Decision, AuthZResolverError>;
}

/// Resolves the owner of a resource. Implemented by each resource module.
#[async_trait]
pub trait ResourceOwnerLookup: Send + Sync {
    /// `Ok(None)` when the resource does not exist.
    ///
    /// # Errors
    ///
    /// [`LookupError`] when the backing store cannot be queried.
    async fn find_resource_owner(
        &self,
        resource_id: Uuid,
    ) -> Result<Option<ResourceOwner>, LookupError>;
}
