use thiserror::Error;

/// Errors returned by [`crate::FieldAreasApi`].
///
/// Messages are safe to show to clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldAreaError {
    #[error("Field area not found")]
    NotFound,

    #[error("User not found")]
    OwnerNotFound,

    #[error("Validation error on field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Field area id already in use")]
    Conflict,

    #[error("{0}")]
    Forbidden(String),

    #[error("Internal error")]
    Internal,
}

impl FieldAreaError {
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden(reason.into())
    }
}
