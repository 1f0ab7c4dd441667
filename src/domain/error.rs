//! Domain errors

use thiserror::Error;

use super::validation::ValidationFailure;

/// Domain-level error types
#[derive(Debug, Error)]
pub enum DomainError {
    /// No record with the given id (or the id is malformed)
    #[error("No {entity} found with ID {id}")]
    NotFound { entity: &'static str, id: String },

    /// One or more fields failed validation
    #[error("{0}")]
    Validation(ValidationFailure),

    /// Storage/database error
    #[error("Database error: {0}")]
    Database(String),
}

impl DomainError {
    pub fn issue_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "issue",
            id: id.into(),
        }
    }

    pub fn user_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "user",
            id: id.into(),
        }
    }
}

impl From<ValidationFailure> for DomainError {
    fn from(failure: ValidationFailure) -> Self {
        Self::Validation(failure)
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
