//! JSON error bodies and status mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use authn_resolver_sdk::AuthNError;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Body of every error response: `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[must_use]
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

/// 401 for credential failures, 503 when the directory could not be reached.
#[must_use]
pub fn authn_error_to_response(err: &AuthNError) -> Response {
    let status = if err.is_credential_failure() {
        StatusCode::UNAUTHORIZED
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    error_response(status, err.client_message())
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        match &self {
            Self::InvalidCredentials => {
                error_response(StatusCode::UNAUTHORIZED, "Invalid demo credentials")
            }
            Self::Unauthenticated => {
                error_response(StatusCode::UNAUTHORIZED, "User is not authenticated")
            }
            Self::DemoDisabled => error_response(StatusCode::FORBIDDEN, "Demo access is disabled"),
            Self::NotAdministrator => error_response(StatusCode::FORBIDDEN, self.to_string()),
            Self::Forbidden(reason) => error_response(StatusCode::FORBIDDEN, reason.clone()),
            Self::PrincipalNotFound(_) => error_response(StatusCode::NOT_FOUND, "User not found"),
            Self::Directory(e) => {
                tracing::error!(error = %e, "directory failure during token issuance");
                error_response(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Authentication service unavailable",
                )
            }
            Self::Issue(e) => {
                tracing::error!(error = %e, "token issuance failed");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Token issuance failed")
            }
        }
    }
}
