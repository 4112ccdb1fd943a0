//! Error handling middleware - RFC 7807 compliant responses.

use std::collections::BTreeMap;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use quill_core::error::DomainError;
use quill_shared::ErrorResponse;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Validation errors: {errors:?}")]
    Validation {
        errors: BTreeMap<String, Vec<String>>,
        input: Option<serde_json::Value>,
    },
}

impl AppError {
    /// Attach the submitted body to a validation error so the client can
    /// redisplay it.
    pub fn with_input<T: serde::Serialize>(self, input: &T) -> Self {
        match self {
            AppError::Validation { errors, .. } => AppError::Validation {
                errors,
                input: serde_json::to_value(input).ok(),
            },
            other => other,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Conflict(detail) => ErrorResponse::conflict(detail),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
            AppError::Validation { errors, input } => {
                ErrorResponse::validation_failed(errors.clone()).with_input(input.clone())
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, key } => {
                AppError::NotFound(format!("{} `{}` not found", entity_type, key))
            }
            DomainError::Validation(errors) => AppError::Validation {
                errors: errors.into_map(),
                input: None,
            },
            DomainError::Duplicate(msg) => AppError::Conflict(msg),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::domain::FieldErrors;

    #[test]
    fn test_domain_errors_map_to_status() {
        let not_found: AppError = DomainError::post_not_found("missing").into();
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);

        let duplicate: AppError = DomainError::Duplicate("slug".to_string()).into();
        assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);

        let internal: AppError = DomainError::Internal("db down".to_string()).into();
        assert_eq!(internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_keeps_input() {
        let mut errors = FieldErrors::new();
        errors.add("title", "This field is required.");

        let err = AppError::from(DomainError::Validation(errors))
            .with_input(&serde_json::json!({ "content": "Body" }));

        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        let AppError::Validation { errors, input } = err else {
            panic!("expected validation error");
        };
        assert!(errors.contains_key("title"));
        assert_eq!(input, Some(serde_json::json!({ "content": "Body" })));
    }
}
