//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: i64 },

    #[error(transparent)]
    Repository(#[from] RepoError),
}

impl DomainError {
    pub fn blog_not_found(id: i64) -> Self {
        Self::NotFound {
            entity_type: "BlogPost",
            id,
        }
    }

    pub fn reply_not_found(id: i64) -> Self {
        Self::NotFound {
            entity_type: "Reply",
            id,
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
