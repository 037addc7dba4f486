use std::collections::HashMap;

use async_trait::async_trait;
use authz_resolver_sdk::{ResourceStore, StoreError};
use field_areas_sdk::FieldArea;
use parking_lot::RwLock;
use tollgate_security::PrincipalId;
use uuid::Uuid;

/// Process-local field area storage.
#[derive(Default)]
pub struct InMemoryFieldAreaRepository {
    areas: RwLock<HashMap<Uuid, FieldArea>>,
}

impl InMemoryFieldAreaRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.areas.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.areas.read().is_empty()
    }
}

#[async_trait]
impl ResourceStore<FieldArea> for InMemoryFieldAreaRepository {
    async fn insert(&self, area: FieldArea) -> Result<FieldArea, StoreError> {
        let mut areas = self.areas.write();
        if areas.contains_key(&area.id) {
            return Err(StoreError::Conflict);
        }
        areas.insert(area.id, area.clone());
        Ok(area)
    }

    async fn update(&self, area: FieldArea) -> Result<FieldArea, StoreError> {
        let mut areas = self.areas.write();
        let Some(slot) = areas.get_mut(&area.id) else {
            return Err(StoreError::NotFound);
        };
        *slot = area.clone();
        Ok(area)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.areas.write().remove(&id).is_some())
    }

    async fn get(&self, id: Uuid) -> Result<Option<FieldArea>, StoreError> {
        Ok(self.areas.read().get(&id).cloned())
    }

    async fn list_by_owner(&self, owner: PrincipalId) -> Result<Vec<FieldArea>, StoreError> {
        let mut owned: Vec<FieldArea> = self
            .areas
            .read()
            .values()
            .filter(|area| area.owner_id == owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(owned)
    }

    async fn delete_by_owner(&self, owner: PrincipalId) -> Result<u64, StoreError> {
        let mut areas = self.areas.write();
        let before = areas.len();
        areas.retain(|_, area| area.owner_id != owner);
        Ok(u64::try_from(before - areas.len()).unwrap_or(u64::MAX))
    }
}
