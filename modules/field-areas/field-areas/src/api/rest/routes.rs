use std::sync::Arc;

use axum::routing::get;
use axum::{Extension, Router};

use super::handlers;
use crate::domain::Service;

pub const AREAS_PATH: &str = "/field-areas/v1/areas";
pub const AREA_PATH: &str = "/field-areas/v1/areas/{id}";

/// Field area endpoints. Requests must pass through
/// [`authn_resolver::with_authn`] first.
#[must_use]
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route(
            AREAS_PATH,
            get(handlers::list_areas)
                .post(handlers::create_area)
                .delete(handlers::clear_areas),
        )
        .route(
            AREA_PATH,
            get(handlers::get_area)
                .put(handlers::update_area)
                .delete(handlers::delete_area),
        )
        .layer(Extension(service))
}
