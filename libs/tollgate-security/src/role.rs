//! Role hierarchy and the authority strings each role grants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::ROLE_PREFIX;

/// Account role.
///
/// `User < Admin < SuperAdmin` form the administrative hierarchy. `Demo` is an
/// orthogonal tier for ephemeral sessions and has no rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Admin,
    SuperAdmin,
    Demo,
}

/// Fine-grained permission carried alongside the `ROLE_*` authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    AdminRead,
    AdminUpdate,
    AdminDelete,
    AdminCreate,
    SuperAdminRead,
    SuperAdminUpdate,
    SuperAdminDelete,
    SuperAdminCreate,
    DemoRead,
}

impl Permission {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AdminRead => "admin:read",
            Self::AdminUpdate => "admin:update",
            Self::AdminDelete => "admin:delete",
            Self::AdminCreate => "admin:create",
            Self::SuperAdminRead => "super_admin:read",
            Self::SuperAdminUpdate => "super_admin:update",
            Self::SuperAdminDelete => "super_admin:delete",
            Self::SuperAdminCreate => "super_admin:create",
            Self::DemoRead => "demo:read",
        }
    }
}

const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::AdminRead,
    Permission::AdminUpdate,
    Permission::AdminDelete,
    Permission::AdminCreate,
];

const SUPER_ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::SuperAdminRead,
    Permission::SuperAdminUpdate,
    Permission::SuperAdminDelete,
    Permission::SuperAdminCreate,
    Permission::AdminRead,
    Permission::AdminUpdate,
    Permission::AdminDelete,
    Permission::AdminCreate,
];

/// A single granted authority string, e.g. `ROLE_ADMIN` or `admin:read`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Authority(String);

impl Authority {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The `ROLE_<NAME>` authority for a role.
    #[must_use]
    pub fn for_role(role: Role) -> Self {
        Self(format!("{ROLE_PREFIX}{}", role.name()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<Permission> for Authority {
    fn from(permission: Permission) -> Self {
        Self(permission.as_str().to_owned())
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Role {
    pub const ALL: [Self; 4] = [Self::User, Self::Admin, Self::SuperAdmin, Self::Demo];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
            Self::SuperAdmin => "SUPER_ADMIN",
            Self::Demo => "DEMO",
        }
    }

    #[must_use]
    pub const fn permissions(self) -> &'static [Permission] {
        match self {
            Self::User => &[],
            Self::Admin => ADMIN_PERMISSIONS,
            Self::SuperAdmin => SUPER_ADMIN_PERMISSIONS,
            Self::Demo => &[Permission::DemoRead],
        }
    }

    /// Permissions followed by the role authority.
    #[must_use]
    pub fn authorities(self) -> Vec<Authority> {
        self.permissions()
            .iter()
            .copied()
            .map(Authority::from)
            .chain(std::iter::once(Authority::for_role(self)))
            .collect()
    }

    /// Position in the administrative hierarchy; `None` for `Demo`.
    #[must_use]
    pub const fn rank(self) -> Option<u8> {
        match self {
            Self::User => Some(0),
            Self::Admin => Some(1),
            Self::SuperAdmin => Some(2),
            Self::Demo => None,
        }
    }

    #[must_use]
    pub const fn is_administrative(self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }

    /// Parse a `ROLE_<NAME>` authority string back into a role.
    #[must_use]
    pub fn from_authority(authority: &str) -> Option<Self> {
        authority
            .strip_prefix(ROLE_PREFIX)
            .and_then(|name| name.parse().ok())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.name() == s)
            .ok_or_else(|| UnknownRole(s.to_owned()))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn strings(authorities: &[Authority]) -> Vec<&str> {
        authorities.iter().map(Authority::as_str).collect()
    }

    #[test]
    fn user_has_only_role_authority() {
        assert_eq!(strings(&Role::User.authorities()), ["ROLE_USER"]);
    }

    #[test]
    fn admin_authorities() {
        assert_eq!(
            strings(&Role::Admin.authorities()),
            [
                "admin:read",
                "admin:update",
                "admin:delete",
                "admin:create",
                "ROLE_ADMIN"
            ]
        );
    }

    #[test]
    fn super_admin_includes_admin_permissions() {
        let authorities = Role::SuperAdmin.authorities();
        let names = strings(&authorities);
        assert_eq!(names.len(), 9);
        assert!(names.contains(&"super_admin:delete"));
        assert!(names.contains(&"admin:create"));
        assert_eq!(names.last(), Some(&"ROLE_SUPER_ADMIN"));
    }

    #[test]
    fn demo_authorities() {
        assert_eq!(strings(&Role::Demo.authorities()), ["demo:read", "ROLE_DEMO"]);
    }

    #[test]
    fn hierarchy_ranks() {
        assert!(Role::User.rank() < Role::Admin.rank());
        assert!(Role::Admin.rank() < Role::SuperAdmin.rank());
        assert_eq!(Role::Demo.rank(), None);
    }

    #[test]
    fn parse_role_authority() {
        assert_eq!(Role::from_authority("ROLE_SUPER_ADMIN"), Some(Role::SuperAdmin));
        assert_eq!(Role::from_authority("ROLE_DEMO"), Some(Role::Demo));
        assert_eq!(Role::from_authority("admin:read"), None);
        assert_eq!(Role::from_authority("ROLE_ROOT"), None);
    }

    #[test]
    fn role_serializes_as_screaming_snake_case() {
        let json = serde_json::to_string(&Role::SuperAdmin).unwrap();
        assert_eq!(json, "\"SUPER_ADMIN\"");
        let back: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Role::SuperAdmin);
    }

    #[test]
    fn unknown_role_name_is_rejected() {
        let err = "ROOT".parse::<Role>().unwrap_err();
        assert_eq!(err.to_string(), "unknown role: ROOT");
    }
}
