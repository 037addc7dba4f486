use serde::{Deserialize, Serialize};
use tollgate_security::PrincipalId;
use uuid::Uuid;

/// A named geographic area owned by one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldArea {
    pub id: Uuid,
    pub owner_id: PrincipalId,
    pub name: String,
    pub comment: Option<String>,
    pub color: Option<String>,
    pub crop: Option<String>,
    /// `GeoJSON` geometry, stored as given.
    pub geo_json: serde_json::Value,
}

/// Data for creating a field area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFieldArea {
    /// Client-chosen id; a random one is assigned when absent.
    pub id: Option<Uuid>,
    pub name: String,
    pub comment: Option<String>,
    pub color: Option<String>,
    pub crop: Option<String>,
    pub geo_json: serde_json::Value,
}

/// Full replacement of a field area's editable fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldAreaUpdate {
    pub name: String,
    pub comment: Option<String>,
    pub color: Option<String>,
    pub crop: Option<String>,
    pub geo_json: serde_json::Value,
}

impl FieldArea {
    /// Build the stored form of `new` owned by `owner_id`.
    #[must_use]
    pub fn create(new: NewFieldArea, owner_id: PrincipalId) -> Self {
        Self {
            id: new.id.unwrap_or_else(Uuid::new_v4),
            owner_id,
            name: new.name,
            comment: new.comment,
            color: new.color,
            crop: new.crop,
            geo_json: new.geo_json,
        }
    }

    /// Apply `update`, keeping id and owner.
    #[must_use]
    pub fn apply(self, update: FieldAreaUpdate) -> Self {
        Self {
            name: update.name,
            comment: update.comment,
            color: update.color,
            crop: update.crop,
            geo_json: update.geo_json,
            ..self
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use serde_json::json;

    use super::*;

    fn new_area(id: Option<Uuid>) -> NewFieldArea {
        NewFieldArea {
            id,
            name: "North field".to_owned(),
            comment: None,
            color: Some("#00ff00".to_owned()),
            crop: Some("wheat".to_owned()),
            geo_json: json!({"type": "Polygon", "coordinates": []}),
        }
    }

    #[test]
    fn create_keeps_client_id() {
        let id = Uuid::new_v4();
        let area = FieldArea::create(new_area(Some(id)), PrincipalId::new(7));
        assert_eq!(area.id, id);
        assert_eq!(area.owner_id, PrincipalId::new(7));
    }

    #[test]
    fn create_assigns_id_when_absent() {
        let a = FieldArea::create(new_area(None), PrincipalId::new(7));
        let b = FieldArea::create(new_area(None), PrincipalId::new(7));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn apply_preserves_identity() {
        let area = FieldArea::create(new_area(None), PrincipalId::new(7));
        let id = area.id;

        let updated = area.apply(FieldAreaUpdate {
            name: "South field".to_owned(),
            comment: Some("fallow".to_owned()),
            color: None,
            crop: None,
            geo_json: json!(null),
        });

        assert_eq!(updated.id, id);
        assert_eq!(updated.owner_id, PrincipalId::new(7));
        assert_eq!(updated.name, "South field");
        assert_eq!(updated.crop, None);
    }
}
