use anyhow::Result;
use chrono::NaiveDate;
use tracing::{info, warn};

use crate::domain::errors::DomainError;
use crate::storage::{DbConnection, InstructorRepository, LessonRepository, StudentRepository};
use shared::{
    BookLessonRequest, FeeQuote, Lesson, LessonDetail, LessonListResponse, LessonResponse,
    LessonStatus, LessonType,
};

/// Service for booking and managing lessons. The fee is always derived here
/// from the lesson type's hourly rate and the duration.
#[derive(Clone)]
pub struct LessonService {
    lessons: LessonRepository,
    students: StudentRepository,
    instructors: InstructorRepository,
}

impl LessonService {
    /// Create a new LessonService
    pub fn new(db: DbConnection) -> Self {
        Self {
            lessons: LessonRepository::new(db.clone()),
            students: StudentRepository::new(db.clone()),
            instructors: InstructorRepository::new(db),
        }
    }

    /// Book a lesson for a student with an instructor
    pub async fn book_lesson(&self, request: BookLessonRequest) -> Result<LessonResponse> {
        info!(
            "Booking {} lesson for student {} with instructor {} on {}",
            request.lesson_type, request.student_id, request.instructor_id, request.lesson_date
        );

        Self::validate_duration(request.duration)?;
        Self::validate_date(&request.lesson_date)?;

        // Both foreign keys must reference existing rows
        if self.students.get_student(request.student_id).await?.is_none() {
            return Err(DomainError::NotFound(format!("Student {}", request.student_id)).into());
        }
        if self
            .instructors
            .get_instructor(request.instructor_id)
            .await?
            .is_none()
        {
            return Err(
                DomainError::NotFound(format!("Instructor {}", request.instructor_id)).into(),
            );
        }

        let fee = request.lesson_type.hourly_rate() * request.duration as f64;

        let mut lesson = Lesson {
            id: 0,
            student_id: request.student_id,
            instructor_id: request.instructor_id,
            lesson_type: request.lesson_type,
            lesson_date: request.lesson_date,
            duration: request.duration,
            status: LessonStatus::Booked,
            fee,
        };
        lesson.id = self.lessons.insert_lesson(&lesson).await?;

        info!("Booked lesson {} with fee {:.2}", lesson.id, lesson.fee);

        Ok(LessonResponse {
            lesson,
            success_message: "Lesson booked successfully".to_string(),
        })
    }

    /// Get a lesson by ID, joined with display names
    pub async fn get_lesson(&self, lesson_id: i64) -> Result<Option<LessonDetail>> {
        let lesson = self.lessons.get_lesson(lesson_id).await?;

        if lesson.is_none() {
            warn!("Lesson not found: {}", lesson_id);
        }

        Ok(lesson)
    }

    /// List all lessons with the total count
    pub async fn list_lessons(&self) -> Result<LessonListResponse> {
        let lessons = self.lessons.list_lessons().await?;

        info!("Found {} lessons", lessons.len());

        let total = lessons.len();
        Ok(LessonListResponse { lessons, total })
    }

    /// Delete a lesson
    pub async fn delete_lesson(&self, lesson_id: i64) -> Result<()> {
        self.lessons
            .get_lesson(lesson_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Lesson {}", lesson_id)))?;

        self.lessons.delete_lesson(lesson_id).await?;

        info!("Deleted lesson {}", lesson_id);

        Ok(())
    }

    /// Quote the fee for a prospective lesson without booking it
    pub fn quote_fee(&self, lesson_type: LessonType, duration: i64) -> Result<FeeQuote> {
        Self::validate_duration(duration)?;

        let hourly_rate = lesson_type.hourly_rate();
        Ok(FeeQuote {
            lesson_type,
            hourly_rate,
            duration,
            total_fee: hourly_rate * duration as f64,
        })
    }

    fn validate_duration(duration: i64) -> Result<()> {
        if duration < 1 {
            return Err(DomainError::Validation(
                "Lesson duration must be at least one hour".to_string(),
            )
            .into());
        }
        Ok(())
    }

    fn validate_date(date: &str) -> Result<()> {
        NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
            DomainError::Validation("Lesson date must be in YYYY-MM-DD format".to_string())
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{InstructorService, StudentService};
    use shared::{CreateInstructorRequest, CreateStudentRequest};

    struct TestContext {
        lessons: LessonService,
        students: StudentService,
        instructors: InstructorService,
        student_id: i64,
        instructor_id: i64,
    }

    async fn setup_test() -> TestContext {
        let db = DbConnection::init_test().await.expect("Failed to create test database");

        let students = StudentService::new(db.clone());
        let instructors = InstructorService::new(db.clone());
        let lessons = LessonService::new(db);

        let student_id = students
            .create_student(CreateStudentRequest {
                first_name: "Amy".to_string(),
                last_name: "Pond".to_string(),
                email: "amy@example.com".to_string(),
                phone: "07123456789".to_string(),
            })
            .await
            .expect("Failed to create student")
            .student
            .id;

        let instructor_id = instructors
            .create_instructor(CreateInstructorRequest {
                first_name: "River".to_string(),
                last_name: "Song".to_string(),
                license: "ADI12345".to_string(),
            })
            .await
            .expect("Failed to create instructor")
            .instructor
            .id;

        TestContext {
            lessons,
            students,
            instructors,
            student_id,
            instructor_id,
        }
    }

    fn booking(ctx: &TestContext) -> BookLessonRequest {
        BookLessonRequest {
            student_id: ctx.student_id,
            instructor_id: ctx.instructor_id,
            lesson_type: LessonType::Standard,
            lesson_date: "2025-07-01".to_string(),
            duration: 2,
        }
    }

    #[tokio::test]
    async fn test_book_lesson_derives_fee_and_status() {
        let ctx = setup_test().await;

        let response = ctx
            .lessons
            .book_lesson(booking(&ctx))
            .await
            .expect("Failed to book lesson");

        let lesson = response.lesson;
        assert!(lesson.id > 0);
        assert_eq!(lesson.status, LessonStatus::Booked);
        // Standard is 45/hr, two hours
        assert_eq!(lesson.fee, 90.0);
        assert_eq!(response.success_message, "Lesson booked successfully");
    }

    #[tokio::test]
    async fn test_book_lesson_validation() {
        let ctx = setup_test().await;

        // Zero duration
        let mut request = booking(&ctx);
        request.duration = 0;
        assert!(ctx.lessons.book_lesson(request).await.is_err());

        // Malformed date
        let mut request = booking(&ctx);
        request.lesson_date = "01/07/2025".to_string();
        assert!(ctx.lessons.book_lesson(request).await.is_err());

        // Impossible date
        let mut request = booking(&ctx);
        request.lesson_date = "2025-02-30".to_string();
        assert!(ctx.lessons.book_lesson(request).await.is_err());
    }

    #[tokio::test]
    async fn test_book_lesson_requires_existing_records() {
        let ctx = setup_test().await;

        let mut request = booking(&ctx);
        request.student_id = 9999;
        let err = ctx.lessons.book_lesson(request).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::NotFound(_))
        ));

        let mut request = booking(&ctx);
        request.instructor_id = 9999;
        let err = ctx.lessons.book_lesson(request).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_lessons_includes_names() {
        let ctx = setup_test().await;

        ctx.lessons.book_lesson(booking(&ctx)).await.expect("Failed to book");

        let list = ctx.lessons.list_lessons().await.expect("Failed to list");
        assert_eq!(list.total, 1);
        assert_eq!(list.lessons[0].student_name, "Amy Pond");
        assert_eq!(list.lessons[0].instructor_name, "River Song");
    }

    #[tokio::test]
    async fn test_delete_lesson() {
        let ctx = setup_test().await;

        let id = ctx
            .lessons
            .book_lesson(booking(&ctx))
            .await
            .expect("Failed to book")
            .lesson
            .id;

        ctx.lessons.delete_lesson(id).await.expect("Failed to delete");
        assert!(ctx.lessons.get_lesson(id).await.unwrap().is_none());

        let err = ctx.lessons.delete_lesson(id).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_booked_lesson_blocks_student_and_instructor_deletion() {
        let ctx = setup_test().await;

        let lesson_id = ctx
            .lessons
            .book_lesson(booking(&ctx))
            .await
            .expect("Failed to book")
            .lesson
            .id;

        // Both deletes are refused while the lesson exists
        let err = ctx.students.delete_student(ctx.student_id).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::InUse(_))
        ));

        let err = ctx
            .instructors
            .delete_instructor(ctx.instructor_id)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::InUse(_))
        ));

        // Once the lesson is gone, both can be deleted
        ctx.lessons.delete_lesson(lesson_id).await.expect("Failed to delete lesson");
        ctx.students
            .delete_student(ctx.student_id)
            .await
            .expect("Failed to delete student");
        ctx.instructors
            .delete_instructor(ctx.instructor_id)
            .await
            .expect("Failed to delete instructor");
    }

    #[tokio::test]
    async fn test_quote_fee() {
        let ctx = setup_test().await;

        let quote = ctx
            .lessons
            .quote_fee(LessonType::DrivingTest, 2)
            .expect("Failed to quote");
        assert_eq!(quote.hourly_rate, 75.0);
        assert_eq!(quote.total_fee, 150.0);

        assert!(ctx.lessons.quote_fee(LessonType::Standard, 0).is_err());
    }
}
