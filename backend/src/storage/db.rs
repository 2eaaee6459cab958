use anyhow::Result;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::sync::Arc;

// The database URL for the production database
const DATABASE_URL: &str = "sqlite:driving_school.db";

/// DbConnection manages the SQLite pool and schema setup
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        // Connect to the database
        let pool = SqlitePool::connect(url).await?;

        // Setup database schema
        Self::setup_schema(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Initialize the standard database
    pub async fn init() -> Result<Self> {
        Self::new(DATABASE_URL).await
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        // Generate a unique database name for tests
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Access the underlying pool for queries
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        // Students table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS students (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                phone TEXT NOT NULL UNIQUE
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Instructors table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS instructors (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                license TEXT NOT NULL COLLATE NOCASE UNIQUE
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Lessons table, referencing students and instructors
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS lessons (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                student_id INTEGER NOT NULL REFERENCES students (id),
                instructor_id INTEGER NOT NULL REFERENCES instructors (id),
                lesson_type TEXT NOT NULL,
                lesson_date TEXT NOT NULL,
                duration INTEGER NOT NULL,
                status TEXT NOT NULL,
                fee REAL NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Index for the day schedule lookup
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_lessons_lesson_date
            ON lessons(lesson_date);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}
