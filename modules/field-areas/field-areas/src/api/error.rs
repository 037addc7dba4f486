//! Status mapping for field area errors.

use authn_resolver::api::error_response;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::DomainError;

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => error_response(StatusCode::NOT_FOUND, "Field area not found"),
            Self::OwnerNotFound => error_response(StatusCode::NOT_FOUND, "User not found"),
            Self::Validation { field, message } => error_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Invalid '{field}': {message}"),
            ),
            Self::Conflict => error_response(StatusCode::CONFLICT, "Field area id already in use"),
            Self::Forbidden(reason) => error_response(StatusCode::FORBIDDEN, reason),
            Self::Internal(_) => {
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        let cases = [
            (DomainError::NotFound, StatusCode::NOT_FOUND),
            (DomainError::OwnerNotFound, StatusCode::NOT_FOUND),
            (
                DomainError::validation("name", "must not be empty"),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (DomainError::Conflict, StatusCode::CONFLICT),
            (
                DomainError::Forbidden("no".to_owned()),
                StatusCode::FORBIDDEN,
            ),
            (
                DomainError::Internal("boom".to_owned()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
