//! # Driving School Backend
//!
//! Contains all non-UI logic for the driving school record manager.
//!
//! This crate serves as the orchestration layer that brings together:
//! - **Domain**: Business rules for students, instructors and lessons
//! - **Storage**: SQLite persistence behind per-table repositories
//! - **IO**: The REST interface that exposes functionality to clients
//!
//! The backend is UI-agnostic: any frontend (or a CLI) can drive it through
//! the REST surface without modification.
//!
//! ## Architecture
//!
//! ```text
//! Client (UI, CLI, tests)
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (services, validation, fee derivation)
//!     ↓
//! Storage Layer (SQLite repositories)
//! ```

pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::domain::{InstructorService, LessonService, ScheduleService, StudentService};
use crate::storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub student_service: StudentService,
    pub instructor_service: InstructorService,
    pub lesson_service: LessonService,
    pub schedule_service: ScheduleService,
}

impl AppState {
    /// Build the full service set over one database connection
    pub fn new(db: DbConnection) -> Self {
        Self {
            student_service: StudentService::new(db.clone()),
            instructor_service: InstructorService::new(db.clone()),
            lesson_service: LessonService::new(db.clone()),
            schedule_service: ScheduleService::new(db),
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend() -> Result<AppState> {
    info!("Setting up database");
    let db = DbConnection::init().await?;

    info!("Setting up application state");
    Ok(AppState::new(db))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow a frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    use crate::io::rest::{instructor_apis, lesson_apis, schedule_apis, student_apis};

    // Set up our application routes
    let api_routes = Router::new()
        .route(
            "/students",
            get(student_apis::list_students).post(student_apis::create_student),
        )
        .route("/students/search", get(student_apis::search_students))
        .route(
            "/students/:id",
            get(student_apis::get_student).delete(student_apis::delete_student),
        )
        .route(
            "/instructors",
            get(instructor_apis::list_instructors).post(instructor_apis::create_instructor),
        )
        .route(
            "/instructors/search",
            get(instructor_apis::search_instructors),
        )
        .route(
            "/instructors/:id",
            get(instructor_apis::get_instructor).delete(instructor_apis::delete_instructor),
        )
        .route(
            "/lessons",
            get(lesson_apis::list_lessons).post(lesson_apis::book_lesson),
        )
        .route("/lessons/fee-quote", get(lesson_apis::quote_fee))
        .route(
            "/lessons/:id",
            get(lesson_apis::get_lesson).delete(lesson_apis::delete_lesson),
        )
        .route("/schedule/day", get(schedule_apis::day_schedule));

    // Define our main application router
    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn test_router() -> Router {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        create_router(AppState::new(db))
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        serde_json::from_slice(&bytes).expect("Body should be JSON")
    }

    #[tokio::test]
    async fn test_create_and_list_students_over_http() {
        let app = test_router().await;

        let request = json_request(
            "POST",
            "/api/students",
            serde_json::json!({
                "first_name": "Amy",
                "last_name": "Pond",
                "email": "amy@example.com",
                "phone": "07123456789"
            }),
        );
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let created = body_json(response).await;
        assert_eq!(created["student"]["first_name"], "Amy");

        let response = app
            .oneshot(Request::get("/api/students").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let listed = body_json(response).await;
        assert_eq!(listed["total"], 1);
    }

    #[tokio::test]
    async fn test_duplicate_student_email_conflicts_over_http() {
        let app = test_router().await;

        let payload = serde_json::json!({
            "first_name": "Amy",
            "last_name": "Pond",
            "email": "amy@example.com",
            "phone": "07123456789"
        });

        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/students", payload.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let mut duplicate = payload;
        duplicate["phone"] = serde_json::json!("07999999999");
        let response = app
            .oneshot(json_request("POST", "/api/students", duplicate))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_fee_quote_over_http() {
        let app = test_router().await;

        let response = app
            .oneshot(
                Request::get("/api/lessons/fee-quote?lesson_type=Pass+Plus&duration=2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let quote = body_json(response).await;
        assert_eq!(quote["hourly_rate"], 60.0);
        assert_eq!(quote["total_fee"], 120.0);
    }

    #[tokio::test]
    async fn test_missing_lesson_returns_not_found() {
        let app = test_router().await;

        let response = app
            .oneshot(Request::get("/api/lessons/42").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
