use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A student enrolled at the driving school.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Contact email, unique per student
    pub email: String,
    /// Contact phone, exactly 11 digits, unique per student
    pub phone: String,
}

impl Student {
    /// Display name used in lesson views and dropdowns
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// An instructor employed by the driving school.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instructor {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Driving instructor license number, unique (case-insensitive)
    pub license: String,
}

impl Instructor {
    /// Display name used in lesson views and dropdowns
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The category a lesson belongs to. Each type carries a flat hourly rate
/// used to derive the lesson fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LessonType {
    Introductory,
    Standard,
    #[serde(rename = "Pass Plus")]
    PassPlus,
    #[serde(rename = "Driving Test")]
    DrivingTest,
}

impl LessonType {
    /// All lesson types, in the order the booking form offers them
    pub const ALL: [LessonType; 4] = [
        LessonType::Introductory,
        LessonType::Standard,
        LessonType::PassPlus,
        LessonType::DrivingTest,
    ];

    /// Flat hourly rate in GBP for this lesson type
    pub fn hourly_rate(&self) -> f64 {
        match self {
            LessonType::Introductory => 30.0,
            LessonType::Standard => 45.0,
            LessonType::PassPlus => 60.0,
            LessonType::DrivingTest => 75.0,
        }
    }

    /// Canonical string form, also used for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            LessonType::Introductory => "Introductory",
            LessonType::Standard => "Standard",
            LessonType::PassPlus => "Pass Plus",
            LessonType::DrivingTest => "Driving Test",
        }
    }
}

impl fmt::Display for LessonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LessonType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Introductory" => Ok(LessonType::Introductory),
            "Standard" => Ok(LessonType::Standard),
            "Pass Plus" => Ok(LessonType::PassPlus),
            "Driving Test" => Ok(LessonType::DrivingTest),
            other => Err(format!("Unknown lesson type: {}", other)),
        }
    }
}

/// Lifecycle state of a lesson. Booking always writes `Booked`; the other
/// states exist for rows recorded outside the booking flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LessonStatus {
    Booked,
    Completed,
    Cancelled,
}

impl LessonStatus {
    /// Canonical string form, also used for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            LessonStatus::Booked => "Booked",
            LessonStatus::Completed => "Completed",
            LessonStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for LessonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LessonStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Booked" => Ok(LessonStatus::Booked),
            "Completed" => Ok(LessonStatus::Completed),
            "Cancelled" => Ok(LessonStatus::Cancelled),
            other => Err(format!("Unknown lesson status: {}", other)),
        }
    }
}

/// A booked lesson as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: i64,
    pub student_id: i64,
    pub instructor_id: i64,
    pub lesson_type: LessonType,
    /// Calendar date of the lesson (YYYY-MM-DD)
    pub lesson_date: String,
    /// Lesson length in whole hours
    pub duration: i64,
    pub status: LessonStatus,
    /// Derived fee: hourly rate for the lesson type times duration
    pub fee: f64,
}

/// A lesson joined with the display names of its student and instructor,
/// as shown in the lessons table and the day schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonDetail {
    pub id: i64,
    pub student_id: i64,
    pub instructor_id: i64,
    pub student_name: String,
    pub instructor_name: String,
    pub lesson_type: LessonType,
    pub lesson_date: String,
    pub duration: i64,
    pub status: LessonStatus,
    pub fee: f64,
}

/// Request to register a new student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateStudentRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// Response after creating a student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentResponse {
    pub student: Student,
    pub success_message: String,
}

/// Response listing students, with the total shown in the records view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentListResponse {
    pub students: Vec<Student>,
    pub total: usize,
}

/// Request to register a new instructor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateInstructorRequest {
    pub first_name: String,
    pub last_name: String,
    pub license: String,
}

/// Response after creating an instructor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructorResponse {
    pub instructor: Instructor,
    pub success_message: String,
}

/// Response listing instructors, with the total shown in the records view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructorListResponse {
    pub instructors: Vec<Instructor>,
    pub total: usize,
}

/// Request to book a lesson. The fee is always derived server-side from the
/// lesson type and duration, never supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookLessonRequest {
    pub student_id: i64,
    pub instructor_id: i64,
    pub lesson_type: LessonType,
    /// Calendar date of the lesson (YYYY-MM-DD)
    pub lesson_date: String,
    /// Lesson length in whole hours, at least 1
    pub duration: i64,
}

/// Response after booking a lesson
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonResponse {
    pub lesson: Lesson,
    pub success_message: String,
}

/// Response listing lessons with joined display names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonListResponse {
    pub lessons: Vec<LessonDetail>,
    pub total: usize,
}

/// A fee quote for a prospective lesson: the hourly rate for the chosen
/// lesson type and the total over the requested duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeQuote {
    pub lesson_type: LessonType,
    pub hourly_rate: f64,
    pub duration: i64,
    pub total_fee: f64,
}

/// A single day's lessons, ordered by lesson type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub date: String,
    pub lessons: Vec<LessonDetail>,
}

/// The date a schedule view is focused on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleFocusDate {
    pub date: String,
}

impl Default for ScheduleFocusDate {
    fn default() -> Self {
        Self {
            date: chrono::Local::now().format("%Y-%m-%d").to_string(),
        }
    }
}
