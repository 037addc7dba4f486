//! Domain layer for the `AuthZ` resolver.

pub mod local_client;
pub mod policy;

pub use local_client::AuthZResolverLocalClient;
pub use policy::authorize;
