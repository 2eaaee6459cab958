use anyhow::Result;
use tracing::{info, warn};

use crate::domain::errors::DomainError;
use crate::storage::{DbConnection, LessonRepository, StudentRepository};
use shared::{CreateStudentRequest, Student, StudentListResponse, StudentResponse};

/// Service for managing student records
#[derive(Clone)]
pub struct StudentService {
    students: StudentRepository,
    lessons: LessonRepository,
}

impl StudentService {
    /// Create a new StudentService
    pub fn new(db: DbConnection) -> Self {
        Self {
            students: StudentRepository::new(db.clone()),
            lessons: LessonRepository::new(db),
        }
    }

    /// Register a new student
    pub async fn create_student(&self, request: CreateStudentRequest) -> Result<StudentResponse> {
        info!(
            "Creating student: {} {}",
            request.first_name, request.last_name
        );

        let request = CreateStudentRequest {
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            email: request.email.trim().to_string(),
            phone: request.phone.trim().to_string(),
        };

        Self::validate_create_request(&request)?;

        // Uniqueness checks on email and phone
        if self.students.email_in_use(&request.email).await? {
            return Err(DomainError::Duplicate(
                "A student with this email already exists".to_string(),
            )
            .into());
        }
        if self.students.phone_in_use(&request.phone).await? {
            return Err(DomainError::Duplicate(
                "A student with this phone number already exists".to_string(),
            )
            .into());
        }

        let id = self.students.insert_student(&request).await?;

        info!("Created student {} with ID {}", request.first_name, id);

        Ok(StudentResponse {
            student: Student {
                id,
                first_name: request.first_name,
                last_name: request.last_name,
                email: request.email,
                phone: request.phone,
            },
            success_message: "Student added successfully".to_string(),
        })
    }

    /// Get a student by ID
    pub async fn get_student(&self, student_id: i64) -> Result<Option<Student>> {
        let student = self.students.get_student(student_id).await?;

        if student.is_none() {
            warn!("Student not found: {}", student_id);
        }

        Ok(student)
    }

    /// List all students with the total count
    pub async fn list_students(&self) -> Result<StudentListResponse> {
        let students = self.students.list_students().await?;

        info!("Found {} students", students.len());

        let total = students.len();
        Ok(StudentListResponse { students, total })
    }

    /// Search students by name, email or phone
    pub async fn search_students(&self, term: &str) -> Result<StudentListResponse> {
        let students = self.students.search_students(term.trim()).await?;

        info!("Search '{}' matched {} students", term, students.len());

        let total = students.len();
        Ok(StudentListResponse { students, total })
    }

    /// Delete a student. Refused while any lesson still references them.
    pub async fn delete_student(&self, student_id: i64) -> Result<()> {
        let student = self
            .students
            .get_student(student_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Student {}", student_id)))?;

        let lesson_count = self.lessons.count_for_student(student_id).await?;
        if lesson_count > 0 {
            return Err(DomainError::InUse(
                "Cannot delete student with existing lessons".to_string(),
            )
            .into());
        }

        self.students.delete_student(student_id).await?;

        info!("Deleted student {} with ID {}", student.full_name(), student_id);

        Ok(())
    }

    /// Validate a create student request
    fn validate_create_request(request: &CreateStudentRequest) -> Result<()> {
        if request.first_name.is_empty()
            || request.last_name.is_empty()
            || request.email.is_empty()
            || request.phone.is_empty()
        {
            return Err(DomainError::Validation("Please fill in all fields".to_string()).into());
        }

        if !request.phone.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::Validation(
                "Phone number must contain only digits".to_string(),
            )
            .into());
        }

        if request.phone.len() != 11 {
            return Err(DomainError::Validation(
                "Phone number must be exactly 11 digits".to_string(),
            )
            .into());
        }

        Self::validate_email(&request.email)?;

        Ok(())
    }

    /// Structural email check: one '@', non-empty local part, and a domain
    /// with a dot and a final segment of at least two letters
    fn validate_email(email: &str) -> Result<()> {
        let invalid = || -> anyhow::Error {
            DomainError::Validation("Please enter a valid email address".to_string()).into()
        };

        let mut parts = email.split('@');
        let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
            (Some(local), Some(domain), None) => (local, domain),
            _ => return Err(invalid()),
        };

        if local.is_empty() || email.chars().any(char::is_whitespace) {
            return Err(invalid());
        }

        let tld = match domain.rsplit_once('.') {
            Some((name, tld)) if !name.is_empty() => tld,
            _ => return Err(invalid()),
        };

        if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        Ok(())
    }
}
