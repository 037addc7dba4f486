//! In-process [`FieldAreasApi`] for other modules.

use std::sync::Arc;

use async_trait::async_trait;
use field_areas_sdk::{FieldArea, FieldAreaError, FieldAreaUpdate, FieldAreasApi, NewFieldArea};
use tollgate_security::{PrincipalId, SecurityContext};
use uuid::Uuid;

use super::Service;

pub struct FieldAreasLocalClient {
    svc: Arc<Service>,
}

impl FieldAreasLocalClient {
    #[must_use]
    pub fn new(svc: Arc<Service>) -> Self {
        Self { svc }
    }
}

#[async_trait]
impl FieldAreasApi for FieldAreasLocalClient {
    async fn create(
        &self,
        ctx: &SecurityContext,
        area: NewFieldArea,
        on_behalf_of: Option<PrincipalId>,
    ) -> Result<FieldArea, FieldAreaError> {
        Ok(self.svc.create(ctx, area, on_behalf_of).await?)
    }

    async fn list(
        &self,
        ctx: &SecurityContext,
        owner: Option<PrincipalId>,
    ) -> Result<Vec<FieldArea>, FieldAreaError> {
        Ok(self.svc.list(ctx, owner).await?)
    }

    async fn get(&self, ctx: &SecurityContext, id: Uuid) -> Result<FieldArea, FieldAreaError> {
        Ok(self.svc.get(ctx, id).await?)
    }

    async fn update(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
        update: FieldAreaUpdate,
    ) -> Result<FieldArea, FieldAreaError> {
        Ok(self.svc.update(ctx, id, update).await?)
    }

    async fn delete(&self, ctx: &SecurityContext, id: Uuid) -> Result<(), FieldAreaError> {
        Ok(self.svc.delete(ctx, id).await?)
    }

    async fn clear_own(&self, ctx: &SecurityContext) -> Result<u64, FieldAreaError> {
        Ok(self.svc.clear_own(ctx).await?)
    }
}
