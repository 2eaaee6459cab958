//! # REST API for the Day Schedule
//!
//! Endpoint backing the timetable view: the lessons on a selected calendar
//! date. Defaults to today when no date is given, matching the initial load
//! of the timetable.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::{error, info};

use crate::io::rest::error_status;
use crate::AppState;
use shared::ScheduleFocusDate;

/// Query parameters for the day schedule endpoint
#[derive(Debug, Deserialize)]
pub struct DayScheduleQuery {
    pub date: Option<String>,
}

/// Get the lessons scheduled on a date
pub async fn day_schedule(
    State(state): State<AppState>,
    Query(query): Query<DayScheduleQuery>,
) -> impl IntoResponse {
    let date = query
        .date
        .unwrap_or_else(|| ScheduleFocusDate::default().date);

    info!("GET /api/schedule/day?date={}", date);

    match state.schedule_service.day_schedule(&date).await {
        Ok(schedule) => (StatusCode::OK, Json(schedule)).into_response(),
        Err(e) => {
            error!("Failed to get day schedule: {}", e);
            (error_status(&e), e.to_string()).into_response()
        }
    }
}
