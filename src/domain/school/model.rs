//! Course and enrollment records plus enrollment date statistics

use chrono::NaiveDate;

/// Letter grade of a finished enrollment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
            Self::C => write!(f, "C"),
            Self::D => write!(f, "D"),
            Self::F => write!(f, "F"),
        }
    }
}

/// A course offered by a department
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    /// Course number, assigned by the registrar rather than generated
    pub id: i32,
    pub title: String,
    pub credits: i32,
    pub department_id: i32,
}

/// A student's enrollment in a course, with the course loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentRecord {
    pub id: i32,
    pub course: Course,
    /// `None` until the course is graded
    pub grade: Option<Grade>,
}

/// Number of students who enrolled on a given date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentDateGroup {
    pub enrollment_date: NaiveDate,
    pub student_count: u64,
}
