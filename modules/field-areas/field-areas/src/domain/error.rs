use authz_resolver_sdk::{AuthZError, StoreError};
use field_areas_sdk::FieldAreaError;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Field area not found")]
    NotFound,

    #[error("Owner account not found")]
    OwnerNotFound,

    #[error("Validation error on field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Field area id already in use")]
    Conflict,

    #[error("Access forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Map an enforcer failure on a delegation target, where `NotFound`
    /// names the account rather than the area.
    #[must_use]
    pub fn from_target(e: AuthZError) -> Self {
        match e {
            AuthZError::NotFound => Self::OwnerNotFound,
            other => other.into(),
        }
    }
}

impl From<AuthZError> for DomainError {
    fn from(e: AuthZError) -> Self {
        match e {
            AuthZError::Forbidden(reason) => Self::Forbidden(reason),
            AuthZError::NotFound => Self::NotFound,
            AuthZError::LookupFailed(detail) => {
                tracing::error!(error = %detail, "authorization lookup failed");
                Self::Internal(detail)
            }
        }
    }
}

impl From<StoreError> for DomainError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => Self::NotFound,
            StoreError::Conflict => Self::Conflict,
            StoreError::Backend(detail) => {
                tracing::error!(error = %detail, "field area storage failed");
                Self::Internal(detail)
            }
        }
    }
}

impl From<DomainError> for FieldAreaError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound => Self::NotFound,
            DomainError::OwnerNotFound => Self::OwnerNotFound,
            DomainError::Validation { field, message } => Self::validation(field, message),
            DomainError::Conflict => Self::Conflict,
            DomainError::Forbidden(reason) => Self::forbidden(reason),
            DomainError::Internal(_) => Self::Internal,
        }
    }
}
