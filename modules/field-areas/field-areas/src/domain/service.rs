use std::sync::Arc;

use authz_resolver::TierRoutedStore;
use authz_resolver_sdk::{Access, PolicyEnforcer, ResourceOwnerLookup, ResourceStore};
use field_areas_sdk::{FieldArea, FieldAreaUpdate, NewFieldArea};
use tollgate_security::constants::DEMO_PRINCIPAL_ID;
use tollgate_security::{Principal, PrincipalId, SecurityContext};
use uuid::Uuid;

use super::error::DomainError;
use crate::config::FieldAreasConfig;

mod fields {
    pub const NAME: &str = "name";
    pub const COMMENT: &str = "comment";
    pub const COLOR: &str = "color";
    pub const CROP: &str = "crop";
}

/// Field area operations behind the ownership policy.
///
/// Every operation first obtains an [`Access`] from the enforcer and then
/// talks to the store that access selects, so demo sessions only ever reach
/// the discard store.
pub struct Service {
    store: TierRoutedStore<FieldArea>,
    owners: Arc<dyn ResourceOwnerLookup>,
    policy_enforcer: PolicyEnforcer,
    config: FieldAreasConfig,
}

impl Service {
    #[must_use]
    pub fn new(
        persisted: Arc<dyn ResourceStore<FieldArea>>,
        owners: Arc<dyn ResourceOwnerLookup>,
        policy_enforcer: PolicyEnforcer,
        config: FieldAreasConfig,
    ) -> Self {
        Self {
            store: TierRoutedStore::new(persisted),
            owners,
            policy_enforcer,
            config,
        }
    }

    /// # Errors
    ///
    /// `Validation`, `Forbidden`, `OwnerNotFound` for an unknown target,
    /// `Conflict` for a client id already in use.
    #[tracing::instrument(skip_all, fields(on_behalf_of = ?on_behalf_of))]
    pub async fn create(
        &self,
        ctx: &SecurityContext,
        new: NewFieldArea,
        on_behalf_of: Option<PrincipalId>,
    ) -> Result<FieldArea, DomainError> {
        self.validate_text(fields::NAME, Some(&new.name))?;
        self.validate_text(fields::COMMENT, new.comment.as_deref())?;
        self.validate_text(fields::COLOR, new.color.as_deref())?;
        self.validate_text(fields::CROP, new.crop.as_deref())?;

        let access = self.owner_access(ctx, on_behalf_of).await?;
        let area = FieldArea::create(new, owner_id(&access));
        let created = self.store.select(&access).insert(area).await?;

        tracing::info!(area_id = %created.id, owner_id = %created.owner_id, "field area created");
        Ok(created)
    }

    /// # Errors
    ///
    /// `Forbidden` or `OwnerNotFound`.
    #[tracing::instrument(skip_all, fields(owner = ?owner))]
    pub async fn list(
        &self,
        ctx: &SecurityContext,
        owner: Option<PrincipalId>,
    ) -> Result<Vec<FieldArea>, DomainError> {
        let access = self.owner_access(ctx, owner).await?;
        let areas = self
            .store
            .select(&access)
            .list_by_owner(owner_id(&access))
            .await?;

        tracing::debug!(count = areas.len(), "field areas listed");
        Ok(areas)
    }

    /// # Errors
    ///
    /// `NotFound` or `Forbidden`.
    #[tracing::instrument(skip_all, fields(area_id = %id))]
    pub async fn get(&self, ctx: &SecurityContext, id: Uuid) -> Result<FieldArea, DomainError> {
        let access = self
            .policy_enforcer
            .access(ctx, self.owners.as_ref(), id)
            .await?;

        self.store
            .select(&access)
            .get(id)
            .await?
            .ok_or(DomainError::NotFound)
    }

    /// Replace the editable fields of an area.
    ///
    /// # Errors
    ///
    /// `Validation`, `NotFound` or `Forbidden`.
    #[tracing::instrument(skip_all, fields(area_id = %id))]
    pub async fn update(
        &self,
        ctx: &SecurityContext,
        id: Uuid,
        update: FieldAreaUpdate,
    ) -> Result<FieldArea, DomainError> {
        self.validate_text(fields::NAME, Some(&update.name))?;
        self.validate_text(fields::COMMENT, update.comment.as_deref())?;
        self.validate_text(fields::COLOR, update.color.as_deref())?;
        self.validate_text(fields::CROP, update.crop.as_deref())?;

        let access = self
            .policy_enforcer
            .access(ctx, self.owners.as_ref(), id)
            .await?;

        let current = match &access {
            Access::Ephemeral => ephemeral_area(id),
            Access::Granted(_) => self
                .store
                .persisted()
                .get(id)
                .await?
                .ok_or(DomainError::NotFound)?,
        };

        let updated = self.store.select(&access).update(current.apply(update)).await?;
        tracing::info!(ephemeral = access.is_ephemeral(), "field area updated");
        Ok(updated)
    }

    /// # Errors
    ///
    /// `NotFound` or `Forbidden`.
    #[tracing::instrument(skip_all, fields(area_id = %id))]
    pub async fn delete(&self, ctx: &SecurityContext, id: Uuid) -> Result<(), DomainError> {
        let access = self
            .policy_enforcer
            .access(ctx, self.owners.as_ref(), id)
            .await?;

        if !self.store.select(&access).delete(id).await? {
            return Err(DomainError::NotFound);
        }

        tracing::info!(ephemeral = access.is_ephemeral(), "field area deleted");
        Ok(())
    }

    /// Remove all of the caller's areas.
    ///
    /// # Errors
    ///
    /// `Forbidden` without a usable caller.
    #[tracing::instrument(skip_all)]
    pub async fn clear_own(&self, ctx: &SecurityContext) -> Result<u64, DomainError> {
        let access = self.policy_enforcer.own(ctx).await?;
        let owner = owner_id(&access);
        let removed = self.store.select(&access).delete_by_owner(owner).await?;

        tracing::info!(owner_id = %owner, removed, "field areas cleared");
        Ok(removed)
    }

    /// Access to the caller's areas, or to `target`'s when it names another
    /// account.
    async fn owner_access(
        &self,
        ctx: &SecurityContext,
        target: Option<PrincipalId>,
    ) -> Result<Access, DomainError> {
        let caller_id = ctx.principal().and_then(Principal::id);
        match target {
            Some(target) if caller_id != Some(target) => self
                .policy_enforcer
                .on_behalf_of(ctx, target)
                .await
                .map_err(DomainError::from_target),
            _ => Ok(self.policy_enforcer.own(ctx).await?),
        }
    }

    fn validate_text(&self, field: &str, value: Option<&str>) -> Result<(), DomainError> {
        let Some(value) = value else {
            return Ok(());
        };
        if field == fields::NAME && value.trim().is_empty() {
            return Err(DomainError::validation(field, "must not be empty"));
        }
        if value.chars().count() > self.config.max_field_length {
            return Err(DomainError::validation(
                field,
                format!("exceeds maximum length of {}", self.config.max_field_length),
            ));
        }
        Ok(())
    }
}

fn owner_id(access: &Access) -> PrincipalId {
    access.owner().map_or(DEMO_PRINCIPAL_ID, |owner| owner.id)
}

/// Base of a demo update's echo; nothing is read from storage.
fn ephemeral_area(id: Uuid) -> FieldArea {
    FieldArea::create(
        NewFieldArea {
            id: Some(id),
            name: String::new(),
            comment: None,
            color: None,
            crop: None,
            geo_json: serde_json::Value::Null,
        },
        DEMO_PRINCIPAL_ID,
    )
}

