//! # REST API for Lesson Management
//!
//! Endpoints for booking, retrieving and deleting lessons, and for quoting
//! the fee of a prospective booking.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::{error, info};

use crate::io::rest::error_status;
use crate::AppState;
use shared::{BookLessonRequest, LessonType};

/// Query parameters for the fee quote endpoint
#[derive(Debug, Deserialize)]
pub struct FeeQuoteQuery {
    pub lesson_type: LessonType,
    pub duration: i64,
}

/// Book a new lesson
pub async fn book_lesson(
    State(state): State<AppState>,
    Json(request): Json<BookLessonRequest>,
) -> impl IntoResponse {
    info!("POST /api/lessons - request: {:?}", request);

    match state.lesson_service.book_lesson(request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to book lesson: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}

/// Get a lesson by ID
pub async fn get_lesson(
    State(state): State<AppState>,
    Path(lesson_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /api/lessons/{}", lesson_id);

    match state.lesson_service.get_lesson(lesson_id).await {
        Ok(Some(lesson)) => (StatusCode::OK, Json(lesson)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Lesson not found").into_response(),
        Err(e) => {
            error!("Failed to get lesson: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving lesson").into_response()
        }
    }
}

/// List all lessons
pub async fn list_lessons(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/lessons");

    match state.lesson_service.list_lessons().await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to list lessons: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing lessons").into_response()
        }
    }
}

/// Quote the fee for a prospective lesson
pub async fn quote_fee(
    State(state): State<AppState>,
    Query(query): Query<FeeQuoteQuery>,
) -> impl IntoResponse {
    info!(
        "GET /api/lessons/fee-quote?lesson_type={}&duration={}",
        query.lesson_type, query.duration
    );

    match state
        .lesson_service
        .quote_fee(query.lesson_type, query.duration)
    {
        Ok(quote) => (StatusCode::OK, Json(quote)).into_response(),
        Err(e) => {
            error!("Failed to quote fee: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}

/// Delete a lesson
pub async fn delete_lesson(
    State(state): State<AppState>,
    Path(lesson_id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/lessons/{}", lesson_id);

    match state.lesson_service.delete_lesson(lesson_id).await {
        Ok(()) => (StatusCode::NO_CONTENT, "").into_response(),
        Err(e) => {
            error!("Failed to delete lesson: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}
