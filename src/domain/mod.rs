pub mod repositories;
pub mod school;
pub mod student;

// Re-export commonly used types
pub use repositories::{DomainResult, RepositoryProvider, WriteOutcome};
pub use school::{Course, EnrollmentDateGroup, EnrollmentRecord, Grade, StatisticsRepository};
pub use student::{
    Student, StudentDetails, StudentFields, StudentInput, StudentQuery, StudentRepository,
    StudentSortOrder,
};

pub use crate::shared::errors::DomainError;
