use std::sync::Arc;

use axum::extract::Path;
use axum::{Extension, Json};
use secrecy::ExposeSecret;
use tollgate_security::PrincipalId;

use super::dto::{DemoLoginRequest, MeResponse, TokenResponse};
use crate::api::middleware::{Authz, CurrentPrincipal};
use crate::domain::{DomainError, TokenIssuer};

/// Start a demo session with the fixed demo credentials.
#[tracing::instrument(skip_all, fields(username = %req.username))]
pub async fn demo_login(
    Extension(issuer): Extension<Arc<TokenIssuer>>,
    Json(req): Json<DemoLoginRequest>,
) -> Result<Json<TokenResponse>, DomainError> {
    let issued = issuer.demo_login(&req.username, req.password.expose_secret())?;
    Ok(Json(TokenResponse::new("Demo access granted", issued)))
}

/// Issue a token that acts as `user_id` on behalf of the calling administrator.
#[tracing::instrument(skip(issuer, ctx))]
pub async fn impersonate(
    Extension(issuer): Extension<Arc<TokenIssuer>>,
    Authz(ctx): Authz,
    Path(user_id): Path<PrincipalId>,
) -> Result<Json<TokenResponse>, DomainError> {
    let issued = issuer.impersonate(&ctx, user_id).await?;
    let message = format!("Now acting as {}", issued.subject);
    Ok(Json(TokenResponse::new(message, issued)))
}

pub async fn me(CurrentPrincipal(principal): CurrentPrincipal) -> Json<MeResponse> {
    Json(MeResponse::from(&principal))
}
