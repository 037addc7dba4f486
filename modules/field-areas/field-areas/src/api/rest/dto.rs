use field_areas_sdk::{FieldArea, FieldAreaUpdate, NewFieldArea};
use serde::{Deserialize, Serialize};
use tollgate_security::PrincipalId;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldAreaDto {
    pub id: Uuid,
    pub owner_id: PrincipalId,
    pub name: String,
    pub comment: Option<String>,
    pub color: Option<String>,
    pub crop: Option<String>,
    pub geo_json: serde_json::Value,
}

impl From<FieldArea> for FieldAreaDto {
    fn from(area: FieldArea) -> Self {
        Self {
            id: area.id,
            owner_id: area.owner_id,
            name: area.name,
            comment: area.comment,
            color: area.color,
            crop: area.crop,
            geo_json: area.geo_json,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFieldAreaRequest {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub crop: Option<String>,
    pub geo_json: serde_json::Value,
}

impl From<CreateFieldAreaRequest> for NewFieldArea {
    fn from(req: CreateFieldAreaRequest) -> Self {
        Self {
            id: req.id,
            name: req.name,
            comment: req.comment,
            color: req.color,
            crop: req.crop,
            geo_json: req.geo_json,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFieldAreaRequest {
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub crop: Option<String>,
    pub geo_json: serde_json::Value,
}

impl From<UpdateFieldAreaRequest> for FieldAreaUpdate {
    fn from(req: UpdateFieldAreaRequest) -> Self {
        Self {
            name: req.name,
            comment: req.comment,
            color: req.color,
            crop: req.crop,
            geo_json: req.geo_json,
        }
    }
}

/// `?targetUserId=` selecting whose areas an administrator works with.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetQuery {
    pub target_user_id: Option<PrincipalId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearedResponse {
    pub removed: u64,
}
