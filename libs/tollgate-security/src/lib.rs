#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
pub mod constants;
pub mod context;
pub mod principal;
pub mod role;

pub use context::{ContextError, SecurityContext, SecurityContextBuilder};
pub use principal::{
    AdminLevel, DemoPrincipal, PersistedPrincipal, Principal, PrincipalId, PrivilegedPrincipal,
};
pub use role::{Authority, Permission, Role, UnknownRole};
