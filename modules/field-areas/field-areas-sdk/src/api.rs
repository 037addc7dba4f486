use async_trait::async_trait;
use tollgate_security::{PrincipalId, SecurityContext};
use uuid::Uuid;

use crate::errors::FieldAreaError;
use crate::models::{FieldArea, FieldAreaUpdate, NewFieldArea};

/// Owner-scoped field area operations.
///
/// Every call is authorized against the principal in `ctx`. Demo sessions
/// see the writes they make echoed back but never persisted.
#[async_trait]
pub trait FieldAreasApi: Send + Sync {
    /// Create an area owned by the caller, or by `on_behalf_of` when an
    /// administrator acts for another account.
    ///
    /// # Errors
    ///
    /// `Validation` for bad input, `Forbidden` when the caller may not own
    /// or delegate, `OwnerNotFound` for an unknown target.
    async fn create(
        &self,
        ctx: &SecurityContext,
        area: NewFieldArea,
        on_behalf_of: Option<PrincipalId>,
    ) -> Result<FieldArea, FieldAreaError>;

    /// Areas owned by the caller, or by `owner` when given.
    ///
    /// # Errors
    ///
    /// `Forbidden` when the caller may not read `owner`'s areas,
    /// `OwnerNotFound` for an unknown owner.
    async fn list(
        &self,
        ctx: &SecurityContext,
        owner: Option<PrincipalId>,
    ) -> Result<Vec<FieldArea>, FieldAreaError>;

    /// # Errors
    ///
    /// `NotFound` or `Forbidden`.
    async fn get(&self, ctx: &SecurityContext, id: Uuid) -> Result<FieldArea, FieldAreaError>;

    /// # Errors
    ///
    /// `Validation`, `NotFound` or `Forbidden`.
    async fn update(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
        update: FieldAreaUpdate,
    ) -> Result<FieldArea, FieldAreaError>;

    /// # Errors
    ///
    /// `NotFound` or `Forbidden`.
    async fn delete(&self, ctx: &SecurityContext, id: Uuid) -> Result<(), FieldAreaError>;

    /// Remove every area the caller owns; returns how many were removed.
    ///
    /// # Errors
    ///
    /// `Forbidden` without an authenticated caller.
    async fn clear_own(&self, ctx: &SecurityContext) -> Result<u64, FieldAreaError>;
}
