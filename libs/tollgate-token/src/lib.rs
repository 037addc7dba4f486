#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Session token codec.
//!
//! - [`TokenCodec`] - issue, verify and project claims out of HS256 tokens
//! - [`Claims`] / [`ClaimSet`] - verified payload and issuing input
//! - [`SigningKey`] - key material resolved once from [`TokenConfig`]
//! - [`TokenError`] - `Expired`, `Malformed` or `BadSignature`
//!
//! ## Usage
//!
//! ```ignore
//! use tollgate_token::{TokenCodec, TokenConfig};
//!
//! let codec = TokenCodec::from_config(&cfg.token)?;
//! let token = codec.issue_standard("alice@example.com", record.authorities())?;
//! let claims = codec.verify(&token)?;
//! ```

pub mod claims;
pub mod codec;
pub mod config;
pub mod error;
pub mod key;

pub use claims::{ClaimSet, Claims, Impersonation, RESERVED_CLAIMS};
pub use codec::TokenCodec;
pub use config::TokenConfig;
pub use error::{IssueError, TokenError};
pub use key::{KeyError, KeyOrigin, MIN_SECRET_BYTES, SigningKey};
