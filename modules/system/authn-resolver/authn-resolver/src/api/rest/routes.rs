use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Router};

use super::handlers;
use crate::domain::TokenIssuer;

pub const DEMO_LOGIN_PATH: &str = "/auth/v1/demo-login";
pub const IMPERSONATE_PATH: &str = "/auth/v1/impersonate/{user_id}";
pub const ME_PATH: &str = "/auth/v1/me";

/// Token endpoints. The caller is expected to wrap the result with
/// [`crate::with_authn`].
#[must_use]
pub fn router(issuer: Arc<TokenIssuer>) -> Router {
    Router::new()
        .route(DEMO_LOGIN_PATH, post(handlers::demo_login))
        .route(IMPERSONATE_PATH, post(handlers::impersonate))
        .route(ME_PATH, get(handlers::me))
        .layer(Extension(issuer))
}
