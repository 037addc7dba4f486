use std::sync::Arc;

use authn_resolver::Authz;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::{Extension, Json};
use uuid::Uuid;

use super::dto::{
    ClearedResponse, CreateFieldAreaRequest, FieldAreaDto, TargetQuery, UpdateFieldAreaRequest,
};
use crate::domain::{DomainError, Service};

pub async fn create_area(
    Extension(svc): Extension<Arc<Service>>,
    Authz(ctx): Authz,
    Query(target): Query<TargetQuery>,
    Json(req): Json<CreateFieldAreaRequest>,
) -> Result<(StatusCode, Json<FieldAreaDto>), DomainError> {
    let area = svc
        .create(&ctx, req.into(), target.target_user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(area.into())))
}

pub async fn list_areas(
    Extension(svc): Extension<Arc<Service>>,
    Authz(ctx): Authz,
    Query(target): Query<TargetQuery>,
) -> Result<Json<Vec<FieldAreaDto>>, DomainError> {
    let areas = svc.list(&ctx, target.target_user_id).await?;
    Ok(Json(areas.into_iter().map(FieldAreaDto::from).collect()))
}

pub async fn get_area(
    Extension(svc): Extension<Arc<Service>>,
    Authz(ctx): Authz,
    Path(id): Path<Uuid>,
) -> Result<Json<FieldAreaDto>, DomainError> {
    Ok(Json(svc.get(&ctx, id).await?.into()))
}

pub async fn update_area(
    Extension(svc): Extension<Arc<Service>>,
    Authz(ctx): Authz,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateFieldAreaRequest>,
) -> Result<Json<FieldAreaDto>, DomainError> {
    Ok(Json(svc.update(&ctx, id, req.into()).await?.into()))
}

pub async fn delete_area(
    Extension(svc): Extension<Arc<Service>>,
    Authz(ctx): Authz,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, DomainError> {
    svc.delete(&ctx, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete every area owned by the caller.
pub async fn clear_areas(
    Extension(svc): Extension<Arc<Service>>,
    Authz(ctx): Authz,
) -> Result<Json<ClearedResponse>, DomainError> {
    let removed = svc.clear_own(&ctx).await?;
    Ok(Json(ClearedResponse { removed }))
}
