use std::sync::Arc;

use async_trait::async_trait;
use authn_resolver_sdk::PrincipalDirectory;
use authz_resolver_sdk::{LookupError, ResourceOwner, ResourceOwnerLookup, ResourceStore};
use field_areas_sdk::FieldArea;
use uuid::Uuid;

/// Resolves an area's owner from the persisted store and the directory.
///
/// An area whose owner account no longer exists is reported as absent.
pub struct DirectoryOwnerLookup {
    areas: Arc<dyn ResourceStore<FieldArea>>,
    directory: Arc<dyn PrincipalDirectory>,
}

impl DirectoryOwnerLookup {
    #[must_use]
    pub fn new(
        areas: Arc<dyn ResourceStore<FieldArea>>,
        directory: Arc<dyn PrincipalDirectory>,
    ) -> Self {
        Self { areas, directory }
    }
}

#[async_trait]
impl ResourceOwnerLookup for DirectoryOwnerLookup {
    async fn find_resource_owner(
        &self,
        resource_id: Uuid,
    ) -> Result<Option<ResourceOwner>, LookupError> {
        let Some(area) = self
            .areas
            .get(resource_id)
            .await
            .map_err(|e| LookupError(e.to_string()))?
        else {
            return Ok(None);
        };

        let record = self.directory.find_principal_by_id(area.owner_id).await?;
        if record.is_none() {
            tracing::warn!(
                area_id = %resource_id,
                owner_id = %area.owner_id,
                "field area owner has no account"
            );
        }
        Ok(record.map(|r| ResourceOwner::new(r.id, r.subject, r.role)))
    }
}
