//! `AuthN` Resolver SDK
//!
//! This crate provides the public API for the `authn_resolver` module:
//!
//! - [`AuthNResolverClient`] - Resolve a bearer token into a [`Principal`](tollgate_security::Principal)
//! - [`PrincipalDirectory`] - Lookup contract for persisted accounts
//! - [`PrincipalRecord`], [`AuthenticationResult`] - Models
//! - [`AuthNError`], [`DirectoryError`] - Error types
//!
//! ## Usage
//!
//! ```ignore
//! use authn_resolver_sdk::AuthNResolverClient;
//!
//! let result = authn.authenticate(token).await?;
//! ctx.install(result.principal, Some(token.into()))?;
//! ```

pub mod api;
pub mod error;
pub mod models;

// Re-export main types at crate root
pub use api::{AuthNResolverClient, PrincipalDirectory};
pub use error::{AuthNError, DirectoryError};
pub use models::{AuthenticationResult, PrincipalRecord};
