//! # REST API for Student Management
//!
//! Endpoints for creating, retrieving, searching and deleting students.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use crate::io::rest::{error_status, SearchQuery};
use crate::AppState;
use shared::CreateStudentRequest;

/// Create a new student
pub async fn create_student(
    State(state): State<AppState>,
    Json(request): Json<CreateStudentRequest>,
) -> impl IntoResponse {
    info!("POST /api/students - request: {:?}", request);

    match state.student_service.create_student(request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to create student: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}

/// Get a student by ID
pub async fn get_student(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/students/{}", student_id);

    match state.student_service.get_student(student_id).await {
        Ok(Some(student)) => (StatusCode::OK, Json(student)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Student not found").into_response(),
        Err(e) => {
            error!("Failed to get student: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving student").into_response()
        }
    }
}

/// List all students
pub async fn list_students(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/students");

    match state.student_service.list_students().await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to list students: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing students").into_response()
        }
    }
}

/// Search students by name, email or phone
pub async fn search_students(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    info!("GET /api/students/search?q={}", query.q);

    match state.student_service.search_students(&query.q).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to search students: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error searching students").into_response()
        }
    }
}

/// Delete a student
pub async fn delete_student(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/students/{}", student_id);

    match state.student_service.delete_student(student_id).await {
        Ok(()) => (StatusCode::NO_CONTENT, "").into_response(),
        Err(e) => {
            error!("Failed to delete student: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}
