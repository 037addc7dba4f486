//! No-op store for demo sessions.

use std::marker::PhantomData;

use async_trait::async_trait;
use authz_resolver_sdk::{ResourceStore, StoreError};
use tollgate_security::PrincipalId;
use uuid::Uuid;

/// Accepts every write and remembers nothing.
///
/// Inserts and updates echo their input, deletes report success, reads are
/// empty. A demo write followed by a read never observes the write.
pub struct DemoDiscardStore<R> {
    _resource: PhantomData<fn() -> R>,
}

impl<R> DemoDiscardStore<R> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _resource: PhantomData,
        }
    }
}

impl<R> Default for DemoDiscardStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R> ResourceStore<R> for DemoDiscardStore<R>
where
    R: Send + Sync + 'static,
{
    async fn insert(&self, resource: R) -> Result<R, StoreError> {
        tracing::info!("demo session write discarded");
        Ok(resource)
    }

    async fn update(&self, resource: R) -> Result<R, StoreError> {
        tracing::info!("demo session update discarded");
        Ok(resource)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        tracing::info!(resource_id = %id, "demo session delete discarded");
        Ok(true)
    }

    async fn get(&self, _id: Uuid) -> Result<Option<R>, StoreError> {
        Ok(None)
    }

    async fn list_by_owner(&self, _owner: PrincipalId) -> Result<Vec<R>, StoreError> {
        Ok(Vec::new())
    }

    async fn delete_by_owner(&self, _owner: PrincipalId) -> Result<u64, StoreError> {
        tracing::info!("demo session bulk delete discarded");
        Ok(0)
    }
}
