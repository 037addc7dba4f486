use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tollgate_security::{Principal, PrincipalId, Role};

use crate::domain::IssuedToken;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DemoLoginRequest {
    pub username: String,
    pub password: SecretString,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub message: String,
    pub token: String,
    pub roles: Vec<String>,
}

impl TokenResponse {
    #[must_use]
    pub fn new(message: impl Into<String>, issued: IssuedToken) -> Self {
        Self {
            message: message.into(),
            token: issued.token,
            roles: issued.roles,
        }
    }
}

/// The caller as the server sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub id: Option<PrincipalId>,
    pub subject: String,
    pub role: Role,
    pub authorities: Vec<String>,
    pub is_demo: bool,
    pub impersonated_by: Option<PrincipalId>,
}

impl From<&Principal> for MeResponse {
    fn from(principal: &Principal) -> Self {
        let impersonated_by = match principal {
            Principal::Persisted(p) => p.impersonator(),
            Principal::Demo(_) | Principal::Privileged(_) => None,
        };
        Self {
            id: principal.id(),
            subject: principal.subject().to_owned(),
            role: principal.role(),
            authorities: principal
                .authorities()
                .iter()
                .map(|a| a.as_str().to_owned())
                .collect(),
            is_demo: principal.is_ephemeral(),
            impersonated_by,
        }
    }
}
