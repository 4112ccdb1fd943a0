//! Domain-level error types.

use thiserror::Error;

use crate::domain::FieldErrors;

/// Domain errors - business logic failures.
///
/// A caller that is not allowed to see or change a post receives `NotFound`,
/// exactly like a caller asking for a post that does not exist.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with key {key}")]
    NotFound {
        entity_type: &'static str,
        key: String,
    },

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn post_not_found(key: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "Post",
            key: key.to_string(),
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

    #[error("Referenced entity missing: {0}")]
    MissingReference(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => DomainError::NotFound {
                entity_type: "Post",
                key: "unknown".to_string(),
            },
            RepoError::Constraint(msg) => DomainError::Duplicate(msg),
            RepoError::MissingReference(msg) => DomainError::NotFound {
                entity_type: "User",
                key: msg,
            },
            RepoError::Connection(msg) | RepoError::Query(msg) => DomainError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_author_is_not_found() {
        let err: DomainError = RepoError::MissingReference("posts_user_id_fkey".to_string()).into();

        assert!(matches!(err, DomainError::NotFound { entity_type: "User", .. }));
    }

    #[test]
    fn test_constraint_is_duplicate() {
        let err: DomainError = RepoError::Constraint("posts_slug_key".to_string()).into();

        assert!(matches!(err, DomainError::Duplicate(_)));
    }
}
