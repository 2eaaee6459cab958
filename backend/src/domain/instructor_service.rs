use anyhow::Result;
use tracing::{info, warn};

use crate::domain::errors::DomainError;
use crate::storage::{DbConnection, InstructorRepository, LessonRepository};
use shared::{CreateInstructorRequest, Instructor, InstructorListResponse, InstructorResponse};

/// Service for managing instructor records
#[derive(Clone)]
pub struct InstructorService {
    instructors: InstructorRepository,
    lessons: LessonRepository,
}

impl InstructorService {
    /// Create a new InstructorService
    pub fn new(db: DbConnection) -> Self {
        Self {
            instructors: InstructorRepository::new(db.clone()),
            lessons: LessonRepository::new(db),
        }
    }

    /// Register a new instructor
    pub async fn create_instructor(
        &self,
        request: CreateInstructorRequest,
    ) -> Result<InstructorResponse> {
        info!(
            "Creating instructor: {} {}",
            request.first_name, request.last_name
        );

        let request = CreateInstructorRequest {
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            license: request.license.trim().to_string(),
        };

        Self::validate_create_request(&request)?;

        // License numbers are unique ignoring case; stored in original case
        if self.instructors.license_in_use(&request.license).await? {
            return Err(DomainError::Duplicate(
                "This license number is already registered".to_string(),
            )
            .into());
        }

        let id = self.instructors.insert_instructor(&request).await?;

        info!("Created instructor {} with ID {}", request.first_name, id);

        Ok(InstructorResponse {
            instructor: Instructor {
                id,
                first_name: request.first_name,
                last_name: request.last_name,
                license: request.license,
            },
            success_message: "Instructor added successfully".to_string(),
        })
    }

    /// Get an instructor by ID
    pub async fn get_instructor(&self, instructor_id: i64) -> Result<Option<Instructor>> {
        let instructor = self.instructors.get_instructor(instructor_id).await?;

        if instructor.is_none() {
            warn!("Instructor not found: {}", instructor_id);
        }

        Ok(instructor)
    }

    /// List all instructors with the total count
    pub async fn list_instructors(&self) -> Result<InstructorListResponse> {
        let instructors = self.instructors.list_instructors().await?;

        info!("Found {} instructors", instructors.len());

        let total = instructors.len();
        Ok(InstructorListResponse { instructors, total })
    }

    /// Search instructors by name or license
    pub async fn search_instructors(&self, term: &str) -> Result<InstructorListResponse> {
        let instructors = self.instructors.search_instructors(term.trim()).await?;

        info!("Search '{}' matched {} instructors", term, instructors.len());

        let total = instructors.len();
        Ok(InstructorListResponse { instructors, total })
    }

    /// Delete an instructor. Refused while any lesson still references them.
    pub async fn delete_instructor(&self, instructor_id: i64) -> Result<()> {
        let instructor = self
            .instructors
            .get_instructor(instructor_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Instructor {}", instructor_id)))?;

        let lesson_count = self.lessons.count_for_instructor(instructor_id).await?;
        if lesson_count > 0 {
            return Err(DomainError::InUse(
                "Cannot delete instructor with existing lessons".to_string(),
            )
            .into());
        }

        self.instructors.delete_instructor(instructor_id).await?;

        info!(
            "Deleted instructor {} with ID {}",
            instructor.full_name(),
            instructor_id
        );

        Ok(())
    }

    /// Validate a create instructor request
    fn validate_create_request(request: &CreateInstructorRequest) -> Result<()> {
        if request.first_name.is_empty() || request.last_name.is_empty() {
            return Err(DomainError::Validation(
                "First name and last name cannot be empty".to_string(),
            )
            .into());
        }

        if request.license.is_empty() {
            return Err(
                DomainError::Validation("License number cannot be empty".to_string()).into(),
            );
        }

        // Alphanumeric mix: only letters and digits, at least one of each
        let license = &request.license;
        let all_alphanumeric = license.chars().all(|c| c.is_ascii_alphanumeric());
        let has_letter = license.chars().any(|c| c.is_ascii_alphabetic());
        let has_digit = license.chars().any(|c| c.is_ascii_digit());

        if !all_alphanumeric || !has_letter || !has_digit {
            return Err(DomainError::Validation(
                "License number must contain both letters and numbers".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
