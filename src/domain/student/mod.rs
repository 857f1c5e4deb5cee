//! Student aggregate
//!
//! Contains the Student entity, form input validation, list ordering and
//! the repository interface.

pub mod model;
pub mod repository;

pub use model::{
    Student, StudentDetails, StudentFields, StudentInput, StudentQuery, StudentSortOrder,
};
pub use repository::StudentRepository;
