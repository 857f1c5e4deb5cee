//! Database entities module

pub mod course;
pub mod course_assignment;
pub mod department;
pub mod enrollment;
pub mod instructor;
pub mod office_assignment;
pub mod student;

pub use course::Entity as Course;
pub use course_assignment::Entity as CourseAssignment;
pub use department::Entity as Department;
pub use enrollment::Entity as Enrollment;
pub use instructor::Entity as Instructor;
pub use office_assignment::Entity as OfficeAssignment;
pub use student::Entity as Student;
