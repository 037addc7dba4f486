//! Token payload.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tollgate_security::PrincipalId;
use tollgate_security::constants::ROLE_DEMO;

use crate::error::TokenError;

/// Claim names owned by the codec. Custom claims may not reuse them.
pub const RESERVED_CLAIMS: &[&str] = &[
    "sub",
    "roles",
    "iat",
    "exp",
    "isImpersonating",
    "impersonatedUserId",
    "adminId",
];

/// An administrator acting under another account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Impersonation {
    pub impersonated_id: PrincipalId,
    pub admin_id: PrincipalId,
}

/// Verified claims of a token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    sub: String,
    roles: Vec<String>,
    iat: i64,
    exp: i64,
    #[serde(rename = "isImpersonating", default, skip_serializing_if = "Option::is_none")]
    is_impersonating: Option<bool>,
    #[serde(rename = "impersonatedUserId", default, skip_serializing_if = "Option::is_none")]
    impersonated_user_id: Option<i64>,
    #[serde(rename = "adminId", default, skip_serializing_if = "Option::is_none")]
    admin_id: Option<i64>,
    #[serde(flatten)]
    custom: Map<String, Value>,
}

impl Claims {
    pub(crate) fn assemble(subject: &str, set: ClaimSet, iat: i64, exp: i64) -> Self {
        let (is_impersonating, impersonated_user_id, admin_id) = match set.impersonation {
            Some(imp) => (
                Some(true),
                Some(imp.impersonated_id.get()),
                Some(imp.admin_id.get()),
            ),
            None => (None, None, None),
        };
        Self {
            sub: subject.to_owned(),
            roles: set.roles,
            iat,
            exp,
            is_impersonating,
            impersonated_user_id,
            admin_id,
            custom: set.custom,
        }
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.sub
    }

    /// Authority strings granted by the token (`ROLE_*` plus permissions).
    #[must_use]
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    #[must_use]
    pub fn has_role(&self, authority: &str) -> bool {
        self.roles.iter().any(|r| r == authority)
    }

    #[must_use]
    pub fn is_demo(&self) -> bool {
        self.has_role(ROLE_DEMO)
    }

    /// Issued-at, seconds since the epoch.
    #[must_use]
    pub fn issued_at(&self) -> i64 {
        self.iat
    }

    /// Expiry, seconds since the epoch.
    #[must_use]
    pub fn expires_at(&self) -> i64 {
        self.exp
    }

    /// The impersonation marker, present only when `isImpersonating` is true.
    #[must_use]
    pub fn impersonation(&self) -> Option<Impersonation> {
        match (
            self.is_impersonating,
            self.impersonated_user_id,
            self.admin_id,
        ) {
            (Some(true), Some(target), Some(admin)) => Some(Impersonation {
                impersonated_id: PrincipalId::new(target),
                admin_id: PrincipalId::new(admin),
            }),
            _ => None,
        }
    }

    #[must_use]
    pub fn custom(&self) -> &Map<String, Value> {
        &self.custom
    }

    #[must_use]
    pub fn custom_claim(&self, name: &str) -> Option<&Value> {
        self.custom.get(name)
    }

    pub(crate) fn validate(&self) -> Result<(), TokenError> {
        if self.sub.is_empty() {
            return Err(TokenError::malformed("empty subject"));
        }
        if self.roles.is_empty() {
            return Err(TokenError::malformed("empty role set"));
        }
        if self.exp <= self.iat {
            return Err(TokenError::malformed("expiry does not follow issued-at"));
        }
        if self.is_impersonating == Some(true) && self.impersonation().is_none() {
            return Err(TokenError::malformed("incomplete impersonation marker"));
        }
        Ok(())
    }
}

/// Claims supplied by the caller of [`crate::TokenCodec::generate`].
#[derive(Debug, Clone, Default)]
pub struct ClaimSet {
    roles: Vec<String>,
    impersonation: Option<Impersonation>,
    custom: Map<String, Value>,
}

impl ClaimSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn role(mut self, authority: impl Into<String>) -> Self {
        self.roles.push(authority.into());
        self
    }

    #[must_use]
    pub fn roles<I, S>(mut self, authorities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles.extend(authorities.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn impersonation(mut self, impersonation: Impersonation) -> Self {
        self.impersonation = Some(impersonation);
        self
    }

    #[must_use]
    pub fn custom(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.custom.insert(name.into(), value.into());
        self
    }

    pub(crate) fn has_roles(&self) -> bool {
        !self.roles.is_empty()
    }

    pub(crate) fn reserved_custom_claim(&self) -> Option<&str> {
        self.custom
            .keys()
            .map(String::as_str)
            .find(|name| RESERVED_CLAIMS.contains(name))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse(value: Value) -> Claims {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn wire_names_for_impersonation() {
        let claims = Claims::assemble(
            "alice",
            ClaimSet::new().role("ROLE_USER").impersonation(Impersonation {
                impersonated_id: PrincipalId::new(7),
                admin_id: PrincipalId::new(1),
            }),
            100,
            200,
        );

        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["isImpersonating"], json!(true));
        assert_eq!(value["impersonatedUserId"], json!(7));
        assert_eq!(value["adminId"], json!(1));
    }

    #[test]
    fn plain_token_has_no_impersonation_fields() {
        let claims = Claims::assemble("alice", ClaimSet::new().role("ROLE_USER"), 100, 200);

        let value = serde_json::to_value(&claims).unwrap();
        assert!(value.get("isImpersonating").is_none());
        assert_eq!(claims.impersonation(), None);
    }

    #[test]
    fn impersonation_requires_flag_true() {
        let claims = parse(json!({
            "sub": "alice", "roles": ["ROLE_USER"], "iat": 1, "exp": 2,
            "isImpersonating": false, "impersonatedUserId": 7, "adminId": 1
        }));
        assert_eq!(claims.impersonation(), None);
        assert!(claims.validate().is_ok());
    }

    #[test]
    fn incomplete_marker_is_malformed() {
        let claims = parse(json!({
            "sub": "alice", "roles": ["ROLE_USER"], "iat": 1, "exp": 2,
            "isImpersonating": true
        }));
        assert!(matches!(claims.validate(), Err(TokenError::Malformed(_))));
    }

    #[test]
    fn custom_claims_are_collected() {
        let claims = parse(json!({
            "sub": "alice", "roles": ["ROLE_USER"], "iat": 1, "exp": 2,
            "tenant": "north", "scopes": ["a", "b"]
        }));
        assert_eq!(claims.custom_claim("tenant"), Some(&json!("north")));
        assert_eq!(claims.custom().len(), 2);
    }

    #[test]
    fn invariants_are_enforced() {
        let empty_roles = parse(json!({ "sub": "a", "roles": [], "iat": 1, "exp": 2 }));
        let empty_subject = parse(json!({ "sub": "", "roles": ["ROLE_USER"], "iat": 1, "exp": 2 }));
        let inverted = parse(json!({ "sub": "a", "roles": ["ROLE_USER"], "iat": 5, "exp": 5 }));

        assert!(empty_roles.validate().is_err());
        assert!(empty_subject.validate().is_err());
        assert!(inverted.validate().is_err());
    }

    #[test]
    fn reserved_custom_claims_are_detected() {
        let set = ClaimSet::new().role("ROLE_USER").custom("exp", 1);
        assert_eq!(set.reserved_custom_claim(), Some("exp"));
        assert_eq!(ClaimSet::new().custom("team", "x").reserved_custom_claim(), None);
    }
}
