//! # Storage Module
//!
//! Handles all data persistence for the driving school record store.
//!
//! This module abstracts away the specific storage implementation details and
//! provides a consistent interface for persisting and retrieving rows. The
//! implementation can be swapped out (SQLite, PostgreSQL, flat files, etc.)
//! without affecting the domain logic or the interface layer.
//!
//! ## Key Responsibilities
//!
//! - **Data Persistence**: Saving student, instructor and lesson rows
//! - **Data Retrieval**: Loading stored rows back into memory
//! - **Connection Management**: Handling the database pool and lifecycle
//! - **Schema Setup**: Creating the three tables and their indexes on startup
//!
//! ## Current Implementation
//!
//! - **Primary Storage**: SQLite database accessed through SQLx
//! - **Repository Pattern**: One repository per table, clean separation
//!   between domain and data access

pub mod db;
pub mod repositories;

// Re-export the main types that other modules need
pub use db::DbConnection;
pub use repositories::{InstructorRepository, LessonRepository, StudentRepository};
