use anyhow::Result;
use sqlx::Row;

use crate::storage::db::DbConnection;
use shared::{CreateInstructorRequest, Instructor};

/// Repository for instructor rows
#[derive(Clone)]
pub struct InstructorRepository {
    db: DbConnection,
}

impl InstructorRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Insert an instructor and return the generated row id.
    /// The license is stored in its original case.
    pub async fn insert_instructor(&self, request: &CreateInstructorRequest) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO instructors (first_name, last_name, license)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.license)
        .execute(self.db.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Get an instructor by ID
    pub async fn get_instructor(&self, instructor_id: i64) -> Result<Option<Instructor>> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, license
            FROM instructors
            WHERE id = ?
            "#,
        )
        .bind(instructor_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(|r| Self::instructor_from_row(&r)))
    }

    /// List all instructors ordered by name
    pub async fn list_instructors(&self) -> Result<Vec<Instructor>> {
        let rows = sqlx::query(
            r#"
            SELECT id, first_name, last_name, license
            FROM instructors
            ORDER BY last_name ASC, first_name ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(Self::instructor_from_row).collect())
    }

    /// Case-insensitive substring search over names and license
    pub async fn search_instructors(&self, term: &str) -> Result<Vec<Instructor>> {
        let pattern = format!("%{}%", term);

        let rows = sqlx::query(
            r#"
            SELECT id, first_name, last_name, license
            FROM instructors
            WHERE UPPER(first_name) LIKE UPPER(?) OR
                  UPPER(last_name) LIKE UPPER(?) OR
                  UPPER(license) LIKE UPPER(?)
            ORDER BY last_name ASC, first_name ASC
            "#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(Self::instructor_from_row).collect())
    }

    /// Delete an instructor by ID
    pub async fn delete_instructor(&self, instructor_id: i64) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM instructors WHERE id = ?
            "#,
        )
        .bind(instructor_id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Check whether an instructor already holds this license,
    /// ignoring case
    pub async fn license_in_use(&self, license: &str) -> Result<bool> {
        let row = sqlx::query(
            r#"
            SELECT 1 FROM instructors WHERE UPPER(license) = UPPER(?)
            "#,
        )
        .bind(license)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.is_some())
    }

    fn instructor_from_row(row: &sqlx::sqlite::SqliteRow) -> Instructor {
        Instructor {
            id: row.get("id"),
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            license: row.get("license"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test() -> InstructorRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        InstructorRepository::new(db)
    }

    fn sample_request(license: &str) -> CreateInstructorRequest {
        CreateInstructorRequest {
            first_name: "River".to_string(),
            last_name: "Song".to_string(),
            license: license.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_instructor() {
        let repo = setup_test().await;

        let id = repo
            .insert_instructor(&sample_request("ADI12345"))
            .await
            .expect("Failed to insert instructor");

        let instructor = repo.get_instructor(id).await.expect("Failed to get instructor");
        assert!(instructor.is_some());

        let instructor = instructor.unwrap();
        assert_eq!(instructor.id, id);
        // License keeps its original case
        assert_eq!(instructor.license, "ADI12345");
    }

    #[tokio::test]
    async fn test_license_in_use_is_case_insensitive() {
        let repo = setup_test().await;

        repo.insert_instructor(&sample_request("ADI12345"))
            .await
            .expect("Failed to insert");

        assert!(repo.license_in_use("ADI12345").await.unwrap());
        assert!(repo.license_in_use("adi12345").await.unwrap());
        assert!(!repo.license_in_use("ADI99999").await.unwrap());
    }

    #[tokio::test]
    async fn test_search_instructors_by_license() {
        let repo = setup_test().await;

        repo.insert_instructor(&sample_request("ADI12345"))
            .await
            .expect("Failed to insert");

        let matches = repo.search_instructors("adi123").await.expect("Failed to search");
        assert_eq!(matches.len(), 1);

        let matches = repo.search_instructors("song").await.expect("Failed to search");
        assert_eq!(matches.len(), 1);

        let matches = repo.search_instructors("xyz").await.expect("Failed to search");
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn test_delete_instructor() {
        let repo = setup_test().await;

        let id = repo
            .insert_instructor(&sample_request("ADI12345"))
            .await
            .expect("Failed to insert");

        repo.delete_instructor(id).await.expect("Failed to delete");

        let instructor = repo.get_instructor(id).await.expect("Failed to query");
        assert!(instructor.is_none());
    }
}
