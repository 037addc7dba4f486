//! Storage contract for owner-scoped resources.

use async_trait::async_trait;
use tollgate_security::PrincipalId;
use uuid::Uuid;

use crate::error::StoreError;

/// CRUD over resources of type `R` keyed by id and partitioned by owner.
#[async_trait]
pub trait ResourceStore<R>: Send + Sync
where
    R: Send + Sync + 'static,
{
    /// Store a new resource and return what was stored.
    ///
    /// # Errors
    ///
    /// [`StoreError::Conflict`] if the id is taken, [`StoreError::Backend`]
    /// on storage failures.
    async fn insert(&self, resource: R) -> Result<R, StoreError>;

    /// Replace an existing resource.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if the resource is absent.
    async fn update(&self, resource: R) -> Result<R, StoreError>;

    /// Returns whether a resource was removed.
    ///
    /// # Errors
    ///
    /// [`StoreError::Backend`] on storage failures.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;

    /// # Errors
    ///
    /// [`StoreError::Backend`] on storage failures.
    async fn get(&self, id: Uuid) -> Result<Option<R>, StoreError>;

    /// # Errors
    ///
    /// [`StoreError::Backend`] on storage failures.
    async fn list_by_owner(&self, owner: PrincipalId) -> Result<Vec<R>, StoreError>;

    /// Returns the number of removed resources.
    ///
    /// # Errors
    ///
    /// [`StoreError::Backend`] on storage failures.
    async fn delete_by_owner(&self, owner: PrincipalId) -> Result<u64, StoreError>;
}
