//! # REST API for Instructor Management
//!
//! Endpoints for creating, retrieving, searching and deleting instructors.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use crate::io::rest::{error_status, SearchQuery};
use crate::AppState;
use shared::CreateInstructorRequest;

/// Create a new instructor
pub async fn create_instructor(
    State(state): State<AppState>,
    Json(request): Json<CreateInstructorRequest>,
) -> impl IntoResponse {
    info!("POST /api/instructors - request: {:?}", request);

    match state.instructor_service.create_instructor(request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to create instructor: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}

/// Get an instructor by ID
pub async fn get_instructor(
    State(state): State<AppState>,
    Path(instructor_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/instructors/{}", instructor_id);

    match state.instructor_service.get_instructor(instructor_id).await {
        Ok(Some(instructor)) => (StatusCode::OK, Json(instructor)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Instructor not found").into_response(),
        Err(e) => {
            error!("Failed to get instructor: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error retrieving instructor",
            )
                .into_response()
        }
    }
}

/// List all instructors
pub async fn list_instructors(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/instructors");

    match state.instructor_service.list_instructors().await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to list instructors: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error listing instructors",
            )
                .into_response()
        }
    }
}

/// Search instructors by name or license
pub async fn search_instructors(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    info!("GET /api/instructors/search?q={}", query.q);

    match state.instructor_service.search_instructors(&query.q).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to search instructors: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error searching instructors",
            )
                .into_response()
        }
    }
}

/// Delete an instructor
pub async fn delete_instructor(
    State(state): State<AppState>,
    Path(instructor_id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/instructors/{}", instructor_id);

    match state.instructor_service.delete_instructor(instructor_id).await {
        Ok(()) => (StatusCode::NO_CONTENT, "").into_response(),
        Err(e) => {
            error!("Failed to delete instructor: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}
