use anyhow::Result;
use chrono::NaiveDate;
use tracing::info;

use crate::domain::errors::DomainError;
use crate::storage::{DbConnection, LessonRepository};
use shared::DaySchedule;

/// Service for the timetable view: the lessons scheduled on a single
/// calendar date, ordered by lesson type.
#[derive(Clone)]
pub struct ScheduleService {
    lessons: LessonRepository,
}

impl ScheduleService {
    /// Create a new ScheduleService
    pub fn new(db: DbConnection) -> Self {
        Self {
            lessons: LessonRepository::new(db),
        }
    }

    /// All lessons on the given date
    pub async fn day_schedule(&self, date: &str) -> Result<DaySchedule> {
        NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
            DomainError::Validation("Schedule date must be in YYYY-MM-DD format".to_string())
        })?;

        let lessons = self.lessons.lessons_on_date(date).await?;

        info!("Found {} lessons on {}", lessons.len(), date);

        Ok(DaySchedule {
            date: date.to_string(),
            lessons,
        })
    }
}
