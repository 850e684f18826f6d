//! Class (homeroom group) definition.

use serde::{Deserialize, Serialize};

/// A class of students that receives a weekly timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRoom {
    /// Unique identifier.
    pub id: String,
    /// Display name (e.g. "1-3").
    pub name: String,
    /// Grade level.
    pub grade: u8,
    /// Number of enrolled students.
    pub student_count: u32,
}

impl ClassRoom {
    /// Creates a class with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            grade: 1,
            student_count: 0,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the grade level.
    pub fn with_grade(mut self, grade: u8) -> Self {
        self.grade = grade;
        self
    }

    /// Sets the student count.
    pub fn with_student_count(mut self, count: u32) -> Self {
        self.student_count = count;
        self
    }
}
