//! Application layer - use cases over the domain repositories

pub mod school;
pub mod students;

pub use school::SchoolStatisticsService;
pub use students::{
    DeleteOutcome, MutationStrategy, StudentListRequest, StudentService, StudentWriteError,
    StudentsListView,
};
