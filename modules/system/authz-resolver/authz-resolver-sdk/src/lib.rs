#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! `AuthZ` Resolver SDK
//!
//! This crate provides the public API for the `authz_resolver` module:
//!
//! - [`AuthZResolverClient`] - ownership policy evaluation
//! - [`ResourceOwnerLookup`] - owner lookup implemented by resource modules
//! - [`ResourceStore`] - storage contract for owned resources
//! - [`pep`] - PEP helpers ([`PolicyEnforcer`], [`Access`])
//!
//! ## Usage
//!
//! ```ignore
//! use authz_resolver_sdk::{Access, PolicyEnforcer};
//!
//! // Once, during init; serves every resource type
//! let enforcer = PolicyEnforcer::new(authz, directory);
//!
//! match enforcer.access(&ctx, owners.as_ref(), area_id).await? {
//!     Access::Ephemeral => { /* demo session: route to the discard store */ }
//!     Access::Granted(owner) => { /* act on the persisted resource */ }
//! }
//! ```

pub mod api;
pub mod error;
pub mod models;
pub mod pep;
pub mod store;

pub use api::{AuthZResolverClient, ResourceOwnerLookup};
pub use error::{AuthZError, AuthZResolverError, LookupError, StoreError};
pub use models::{Decision, DenyReason, EvaluationRequest, ResourceOwner};
pub use pep::{Access, PolicyEnforcer};
pub use store::ResourceStore;
