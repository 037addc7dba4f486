#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Field areas module.
//!
//! Owner-scoped CRUD over field areas. Every operation is authorized by the
//! ownership policy and routed to the store the resulting access selects:
//! persisted accounts reach [`InMemoryFieldAreaRepository`] (or any other
//! [`authz_resolver_sdk::ResourceStore`]), demo sessions reach a store that
//! discards writes.
//!
//! ```yaml
//! field_areas:
//!   max_field_length: 100
//! ```

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;

pub use api::rest::router;
pub use config::FieldAreasConfig;
pub use domain::{DomainError, FieldAreasLocalClient, Service};
pub use infra::{DirectoryOwnerLookup, InMemoryFieldAreaRepository};
