//! School records around students (courses and enrollments) plus the
//! enrollment statistics query.

pub mod model;
pub mod repository;

pub use model::{Course, EnrollmentDateGroup, EnrollmentRecord, Grade};
pub use repository::StatisticsRepository;
