use crate::principal::PrincipalId;

/// Prefix shared by every role authority string.
pub const ROLE_PREFIX: &str = "ROLE_";

pub const ROLE_USER: &str = "ROLE_USER";
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";
pub const ROLE_SUPER_ADMIN: &str = "ROLE_SUPER_ADMIN";
pub const ROLE_DEMO: &str = "ROLE_DEMO";

/// Subject carried by every demo token.
pub const DEMO_SUBJECT: &str = "TEST";

/// Synthetic id assigned to demo principals. Never matches a persisted account.
pub const DEMO_PRINCIPAL_ID: PrincipalId = PrincipalId::new(0);
