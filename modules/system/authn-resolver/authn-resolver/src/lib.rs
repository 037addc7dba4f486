//! `AuthN` Resolver Module
//!
//! Verifies bearer tokens, resolves them into principals and installs the
//! principal into the request's `SecurityContext`. Also issues tokens: demo
//! sessions, standard tokens for known accounts and impersonation tokens.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod config;
pub mod domain;

pub use api::middleware::{AuthNState, Authz, CurrentPrincipal, authn_middleware, with_authn};
pub use config::{AuthNResolverConfig, DemoLoginConfig};
pub use domain::{AuthNResolverLocalClient, DomainError, IssuedToken, Service, TokenIssuer};
