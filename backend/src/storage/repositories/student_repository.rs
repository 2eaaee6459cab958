use anyhow::Result;
use sqlx::Row;

use crate::storage::db::DbConnection;
use shared::{CreateStudentRequest, Student};

/// Repository for student rows
#[derive(Clone)]
pub struct StudentRepository {
    db: DbConnection,
}

impl StudentRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Insert a student and return the generated row id
    pub async fn insert_student(&self, request: &CreateStudentRequest) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO students (first_name, last_name, email, phone)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.email)
        .bind(&request.phone)
        .execute(self.db.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Get a student by ID
    pub async fn get_student(&self, student_id: i64) -> Result<Option<Student>> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, email, phone
            FROM students
            WHERE id = ?
            "#,
        )
        .bind(student_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(|r| Self::student_from_row(&r)))
    }

    /// List all students ordered by name
    pub async fn list_students(&self) -> Result<Vec<Student>> {
        let rows = sqlx::query(
            r#"
            SELECT id, first_name, last_name, email, phone
            FROM students
            ORDER BY last_name ASC, first_name ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(Self::student_from_row).collect())
    }

    /// Case-insensitive substring search over names, email and phone
    pub async fn search_students(&self, term: &str) -> Result<Vec<Student>> {
        let pattern = format!("%{}%", term.to_lowercase());

        let rows = sqlx::query(
            r#"
            SELECT id, first_name, last_name, email, phone
            FROM students
            WHERE LOWER(first_name) LIKE ? OR
                  LOWER(last_name) LIKE ? OR
                  LOWER(email) LIKE ? OR
                  LOWER(phone) LIKE ?
            ORDER BY last_name ASC, first_name ASC
            "#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(Self::student_from_row).collect())
    }

    /// Delete a student by ID
    pub async fn delete_student(&self, student_id: i64) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM students WHERE id = ?
            "#,
        )
        .bind(student_id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Check whether a student already uses this email
    pub async fn email_in_use(&self, email: &str) -> Result<bool> {
        let row = sqlx::query(
            r#"
            SELECT 1 FROM students WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.is_some())
    }

    /// Check whether a student already uses this phone number
    pub async fn phone_in_use(&self, phone: &str) -> Result<bool> {
        let row = sqlx::query(
            r#"
            SELECT 1 FROM students WHERE phone = ?
            "#,
        )
        .bind(phone)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.is_some())
    }

    fn student_from_row(row: &sqlx::sqlite::SqliteRow) -> Student {
        Student {
            id: row.get("id"),
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            email: row.get("email"),
            phone: row.get("phone"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test() -> StudentRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        StudentRepository::new(db)
    }

    fn sample_request(email: &str, phone: &str) -> CreateStudentRequest {
        CreateStudentRequest {
            first_name: "Amy".to_string(),
            last_name: "Pond".to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_student() {
        let repo = setup_test().await;

        let id = repo
            .insert_student(&sample_request("amy@example.com", "07123456789"))
            .await
            .expect("Failed to insert student");

        let student = repo.get_student(id).await.expect("Failed to get student");
        assert!(student.is_some());

        let student = student.unwrap();
        assert_eq!(student.id, id);
        assert_eq!(student.first_name, "Amy");
        assert_eq!(student.email, "amy@example.com");
    }

    #[tokio::test]
    async fn test_list_students_ordered_by_name() {
        let repo = setup_test().await;

        let mut first = sample_request("rory@example.com", "07123456780");
        first.first_name = "Rory".to_string();
        first.last_name = "Williams".to_string();
        repo.insert_student(&first).await.expect("Failed to insert");

        repo.insert_student(&sample_request("amy@example.com", "07123456789"))
            .await
            .expect("Failed to insert");

        let students = repo.list_students().await.expect("Failed to list students");
        assert_eq!(students.len(), 2);
        assert_eq!(students[0].last_name, "Pond");
        assert_eq!(students[1].last_name, "Williams");
    }

    #[tokio::test]
    async fn test_search_students_case_insensitive() {
        let repo = setup_test().await;

        repo.insert_student(&sample_request("amy@example.com", "07123456789"))
            .await
            .expect("Failed to insert");

        let matches = repo.search_students("POND").await.expect("Failed to search");
        assert_eq!(matches.len(), 1);

        let matches = repo.search_students("456789").await.expect("Failed to search");
        assert_eq!(matches.len(), 1);

        let matches = repo.search_students("nobody").await.expect("Failed to search");
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn test_email_and_phone_in_use() {
        let repo = setup_test().await;

        repo.insert_student(&sample_request("amy@example.com", "07123456789"))
            .await
            .expect("Failed to insert");

        assert!(repo.email_in_use("amy@example.com").await.unwrap());
        assert!(!repo.email_in_use("other@example.com").await.unwrap());
        assert!(repo.phone_in_use("07123456789").await.unwrap());
        assert!(!repo.phone_in_use("07000000000").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_student() {
        let repo = setup_test().await;

        let id = repo
            .insert_student(&sample_request("amy@example.com", "07123456789"))
            .await
            .expect("Failed to insert");

        repo.delete_student(id).await.expect("Failed to delete");

        let student = repo.get_student(id).await.expect("Failed to query");
        assert!(student.is_none());
    }
}
