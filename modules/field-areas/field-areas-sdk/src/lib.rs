#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Field Areas SDK
//!
//! Public surface of the `field_areas` module:
//!
//! - [`FieldAreasApi`] - owner-scoped CRUD over field areas
//! - [`FieldArea`], [`NewFieldArea`], [`FieldAreaUpdate`] - models
//! - [`FieldAreaError`] - errors safe to return to callers

pub mod api;
pub mod errors;
pub mod models;

pub use api::FieldAreasApi;
pub use errors::FieldAreaError;
pub use models::{FieldArea, FieldAreaUpdate, NewFieldArea};
