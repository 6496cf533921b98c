use sea_orm::error::{DbErr, SqlErr};
use thiserror::Error;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("validation failed")]
    Validation(Vec<Violation>),

    /// Uniqueness or relational constraint rejected by the storage engine.
    #[error("{entity} constraint violation")]
    Conflict {
        entity: &'static str,
        detail: String,
    },

    /// Malformed request shape (bad bulk payload, missing query parameter).
    #[error("{0}")]
    BadRequest(String),

    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(vec![Violation::new(field, message)])
    }

    /// Classifies a storage error from a write path: constraint violations
    /// surface as [`DomainError::Conflict`], everything else stays a
    /// database fault.
    #[must_use]
    pub fn storage(entity: &'static str, err: DbErr) -> Self {
        match err.sql_err() {
            Some(
                SqlErr::UniqueConstraintViolation(detail)
                | SqlErr::ForeignKeyConstraintViolation(detail),
            ) => Self::Conflict { entity, detail },
            _ => Self::Database(err),
        }
    }
}
