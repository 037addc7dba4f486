//! Ownership policy.
//!
//! | caller \ owner | USER        | ADMIN       | SUPER_ADMIN |
//! |----------------|-------------|-------------|-------------|
//! | USER           | self only   | forbidden   | forbidden   |
//! | ADMIN          | allow       | self only   | forbidden   |
//! | SUPER_ADMIN    | allow       | allow       | allow       |
//!
//! Demo principals are always refused here; the enforcer routes them to
//! ephemeral storage before any owner lookup.

use authz_resolver_sdk::{Decision, DenyReason, ResourceOwner};
use tollgate_security::{Principal, Role};

/// Decide whether `principal` may act on a resource owned by `owner`.
///
/// An absent owner means the resource does not exist and yields
/// [`Decision::NotFound`] before any role is considered.
#[must_use]
pub fn authorize(principal: Option<&Principal>, owner: Option<&ResourceOwner>) -> Decision {
    let Some(owner) = owner else {
        return Decision::NotFound;
    };
    let Some(principal) = principal else {
        return Decision::Forbidden(DenyReason::Unauthenticated);
    };

    let is_self = principal.refers_to(owner.id, &owner.subject);
    match principal.role() {
        Role::Demo => Decision::Forbidden(DenyReason::DemoSession),
        Role::SuperAdmin => Decision::Allow,
        Role::Admin if is_self || owner.role == Role::User => Decision::Allow,
        Role::Admin => Decision::Forbidden(DenyReason::PrivilegedOwner),
        Role::User if is_self => Decision::Allow,
        Role::User => Decision::Forbidden(DenyReason::NotOwner),
    }
}
