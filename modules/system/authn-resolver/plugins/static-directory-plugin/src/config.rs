//! Configuration for the static principal directory.

use serde::Deserialize;
use tollgate_security::{PrincipalId, Role};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticDirectoryConfig {
    pub accounts: Vec<AccountConfig>,
}

/// One seeded account. Authorities are derived from the role.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountConfig {
    pub id: PrincipalId,
    pub subject: String,
    pub role: Role,
}
