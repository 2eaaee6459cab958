use anyhow::Result;
use sqlx::Row;

use crate::storage::db::DbConnection;
use shared::{Lesson, LessonDetail};

/// Repository for lesson rows. Reads return the joined view with student
/// and instructor display names, matching what the lessons table and the
/// day schedule render.
#[derive(Clone)]
pub struct LessonRepository {
    db: DbConnection,
}

impl LessonRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Insert a lesson and return the generated row id.
    /// The caller has already derived the fee and status.
    pub async fn insert_lesson(&self, lesson: &Lesson) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO lessons (student_id, instructor_id, lesson_type, lesson_date, duration, status, fee)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(lesson.student_id)
        .bind(lesson.instructor_id)
        .bind(lesson.lesson_type.as_str())
        .bind(&lesson.lesson_date)
        .bind(lesson.duration)
        .bind(lesson.status.as_str())
        .bind(lesson.fee)
        .execute(self.db.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Get a lesson by ID, joined with student and instructor names
    pub async fn get_lesson(&self, lesson_id: i64) -> Result<Option<LessonDetail>> {
        let row = sqlx::query(
            r#"
            SELECT l.id, l.student_id, l.instructor_id,
                   s.first_name || ' ' || s.last_name AS student_name,
                   i.first_name || ' ' || i.last_name AS instructor_name,
                   l.lesson_type, l.lesson_date, l.duration, l.status, l.fee
            FROM lessons l
            JOIN students s ON l.student_id = s.id
            JOIN instructors i ON l.instructor_id = i.id
            WHERE l.id = ?
            "#,
        )
        .bind(lesson_id)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(Self::detail_from_row(&r)?)),
            None => Ok(None),
        }
    }

    /// List all lessons joined with student and instructor names
    pub async fn list_lessons(&self) -> Result<Vec<LessonDetail>> {
        let rows = sqlx::query(
            r#"
            SELECT l.id, l.student_id, l.instructor_id,
                   s.first_name || ' ' || s.last_name AS student_name,
                   i.first_name || ' ' || i.last_name AS instructor_name,
                   l.lesson_type, l.lesson_date, l.duration, l.status, l.fee
            FROM lessons l
            JOIN students s ON l.student_id = s.id
            JOIN instructors i ON l.instructor_id = i.id
            ORDER BY l.id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::detail_from_row).collect()
    }

    /// All lessons on a given date, ordered by lesson type
    pub async fn lessons_on_date(&self, date: &str) -> Result<Vec<LessonDetail>> {
        let rows = sqlx::query(
            r#"
            SELECT l.id, l.student_id, l.instructor_id,
                   s.first_name || ' ' || s.last_name AS student_name,
                   i.first_name || ' ' || i.last_name AS instructor_name,
                   l.lesson_type, l.lesson_date, l.duration, l.status, l.fee
            FROM lessons l
            JOIN students s ON l.student_id = s.id
            JOIN instructors i ON l.instructor_id = i.id
            WHERE l.lesson_date = ?
            ORDER BY l.lesson_type ASC
            "#,
        )
        .bind(date)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::detail_from_row).collect()
    }

    /// Delete a lesson by ID
    pub async fn delete_lesson(&self, lesson_id: i64) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM lessons WHERE id = ?
            "#,
        )
        .bind(lesson_id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Number of lessons referencing a student
    pub async fn count_for_student(&self, student_id: i64) -> Result<i64> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS lesson_count FROM lessons WHERE student_id = ?
            "#,
        )
        .bind(student_id)
        .fetch_one(self.db.pool())
        .await?;

        Ok(row.get("lesson_count"))
    }

    /// Number of lessons referencing an instructor
    pub async fn count_for_instructor(&self, instructor_id: i64) -> Result<i64> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS lesson_count FROM lessons WHERE instructor_id = ?
            "#,
        )
        .bind(instructor_id)
        .fetch_one(self.db.pool())
        .await?;

        Ok(row.get("lesson_count"))
    }

    fn detail_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<LessonDetail> {
        let lesson_type: String = row.get("lesson_type");
        let status: String = row.get("status");

        Ok(LessonDetail {
            id: row.get("id"),
            student_id: row.get("student_id"),
            instructor_id: row.get("instructor_id"),
            student_name: row.get("student_name"),
            instructor_name: row.get("instructor_name"),
            lesson_type: lesson_type.parse().map_err(anyhow::Error::msg)?,
            lesson_date: row.get("lesson_date"),
            duration: row.get("duration"),
            status: status.parse().map_err(anyhow::Error::msg)?,
            fee: row.get("fee"),
        })
    }
}
