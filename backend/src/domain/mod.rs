//! # Domain Module
//!
//! Contains all business logic for the driving school record manager.
//!
//! This module encapsulates the rules that govern students, instructors and
//! lessons. It operates independently of any specific UI framework or storage
//! mechanism.
//!
//! ## Module Organization
//!
//! - **student_service**: Student registration, lookup, search and deletion
//! - **instructor_service**: Instructor registration, lookup, search and deletion
//! - **lesson_service**: Lesson booking, fee derivation and fee quotes
//! - **schedule_service**: The day timetable view
//! - **errors**: Typed domain errors for status-code mapping
//!
//! ## Business Rules
//!
//! - Student emails and phone numbers are unique; phones are 11 digits
//! - Instructor licenses are unique ignoring case and mix letters and digits
//! - Lessons reference an existing student and instructor
//! - A lesson's fee is derived from its type's flat hourly rate times its
//!   duration, never supplied by the caller
//! - Records are created and deleted, never edited in place
//! - Students and instructors cannot be deleted while lessons reference them

pub mod errors;
pub mod instructor_service;
pub mod lesson_service;
pub mod schedule_service;
pub mod student_service;

pub use errors::DomainError;
pub use instructor_service::InstructorService;
pub use lesson_service::LessonService;
pub use schedule_service::ScheduleService;
pub use student_service::StudentService;
