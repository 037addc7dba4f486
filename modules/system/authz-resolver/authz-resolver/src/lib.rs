//! `AuthZ` Resolver Module
//!
//! Ownership policy for protected resources and the storage adapters that
//! keep demo sessions away from persisted data.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod domain;
pub mod storage;

pub use domain::{AuthZResolverLocalClient, authorize};
pub use storage::{DemoDiscardStore, TierRoutedStore};
