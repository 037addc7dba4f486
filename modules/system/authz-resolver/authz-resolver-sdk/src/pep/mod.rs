//! PEP (Policy Enforcement Point) helpers.
//!
//! - [`PolicyEnforcer`]: resolve the owner, evaluate the policy, yield [`Access`]
//! - [`Access`]: which storage tier a permitted operation should use

use crate::models::ResourceOwner;

pub mod enforcer;

pub use enforcer::PolicyEnforcer;

/// Outcome of a successful enforcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Demo session. Writes must be discarded and reads must see nothing.
    Ephemeral,
    /// Access to persisted storage on behalf of `owner`.
    Granted(ResourceOwner),
}

impl Access {
    #[must_use]
    pub const fn is_ephemeral(&self) -> bool {
        matches!(self, Self::Ephemeral)
    }

    /// Owner of the resource, absent for ephemeral access.
    #[must_use]
    pub const fn owner(&self) -> Option<&ResourceOwner> {
        match self {
            Self::Ephemeral => None,
            Self::Granted(owner) => Some(owner),
        }
    }
}
