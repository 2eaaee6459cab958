//! One repository per table. Each wraps a [`DbConnection`](crate::storage::DbConnection)
//! and issues the raw queries for its rows; no business rules live here.

pub mod instructor_repository;
pub mod lesson_repository;
pub mod student_repository;

pub use instructor_repository::InstructorRepository;
pub use lesson_repository::LessonRepository;
pub use student_repository::StudentRepository;
