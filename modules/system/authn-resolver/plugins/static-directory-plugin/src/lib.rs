#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static principal directory
//!
//! Serves a fixed set of accounts from configuration. Backs the server in
//! development and the integration tests.
//!
//! ## Configuration
//!
//! ```yaml
//! directory:
//!   accounts:
//!     - { id: 1, subject: "root@example.com", role: SUPER_ADMIN }
//!     - { id: 2, subject: "ops1", role: ADMIN }
//!     - { id: 7, subject: "alice@example.com", role: USER }
//! ```

pub mod config;
pub mod domain;

pub use config::{AccountConfig, StaticDirectoryConfig};
pub use domain::{ConfigError, Service};
