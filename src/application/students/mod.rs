//! Student use-cases: the filtered, sorted, paged list and the
//! create/edit/delete workflows.

pub mod listing;
pub mod service;

pub use listing::{StudentListRequest, StudentsListView};
pub use service::{
    DeleteOutcome, MutationStrategy, StudentService, StudentWriteError, DELETE_FAILED_MESSAGE,
    SAVE_FAILED_MESSAGE,
};
