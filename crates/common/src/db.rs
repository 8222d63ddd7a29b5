//! Shared database types for Showcase
//!
//! This module provides common database-related types used across domain repositories.

use crate::error::Error;
use thiserror::Error;

/// Database-specific error types
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),
}

impl RepositoryError {
    /// Classify a sqlx error, pulling constraint violations out of database errors
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepositoryError::NotFound,
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepositoryError::UniqueViolation(db_err.constraint().unwrap_or_default().to_string())
            }
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                RepositoryError::ForeignKeyViolation(
                    db_err.constraint().unwrap_or_default().to_string(),
                )
            }
            other => RepositoryError::Connection(other),
        }
    }

    /// Name of the violated constraint, if this is a constraint violation
    pub fn constraint(&self) -> Option<&str> {
        match self {
            RepositoryError::UniqueViolation(c) | RepositoryError::ForeignKeyViolation(c) => {
                Some(c.as_str())
            }
            _ => None,
        }
    }
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Error::NotFound("Record not found".to_string()),
            RepositoryError::UniqueViolation(c) => {
                Error::Conflict(format!("Unique constraint violated: {}", c))
            }
            RepositoryError::ForeignKeyViolation(c) => {
                Error::Conflict(format!("Foreign key constraint violated: {}", c))
            }
            RepositoryError::Connection(e) => Error::Database(e),
        }
    }
}
