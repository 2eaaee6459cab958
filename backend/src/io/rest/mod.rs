//! # REST API Interface Layer
//!
//! Provides the HTTP endpoints for the driving school record manager.
//! This layer handles:
//! - Request/response serialization
//! - Error translation from domain errors to HTTP status codes
//! - Request logging
//!
//! It is a pure translation layer; every rule lives in the domain services.

pub mod instructor_apis;
pub mod lesson_apis;
pub mod schedule_apis;
pub mod student_apis;

use axum::http::StatusCode;
use serde::Deserialize;

use crate::domain::DomainError;

/// Query parameters shared by the search endpoints
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// Map a service error to the HTTP status the handlers respond with
pub(crate) fn error_status(error: &anyhow::Error) -> StatusCode {
    match error.downcast_ref::<DomainError>() {
        Some(DomainError::NotFound(_)) => StatusCode::NOT_FOUND,
        Some(DomainError::Validation(_)) => StatusCode::BAD_REQUEST,
        Some(DomainError::Duplicate(_)) | Some(DomainError::InUse(_)) => StatusCode::CONFLICT,
        None => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_error_status_mapping() {
        let not_found: anyhow::Error = DomainError::NotFound("Student 1".to_string()).into();
        assert_eq!(error_status(&not_found), StatusCode::NOT_FOUND);

        let validation: anyhow::Error = DomainError::Validation("bad".to_string()).into();
        assert_eq!(error_status(&validation), StatusCode::BAD_REQUEST);

        let duplicate: anyhow::Error = DomainError::Duplicate("dup".to_string()).into();
        assert_eq!(error_status(&duplicate), StatusCode::CONFLICT);

        let in_use: anyhow::Error = DomainError::InUse("used".to_string()).into();
        assert_eq!(error_status(&in_use), StatusCode::CONFLICT);

        let opaque = anyhow!("database exploded");
        assert_eq!(error_status(&opaque), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
