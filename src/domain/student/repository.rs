//! Student repository interface

use std::num::NonZeroU64;

use async_trait::async_trait;

use super::model::{Student, StudentDetails, StudentFields, StudentQuery};
use crate::domain::repositories::WriteOutcome;
use crate::domain::DomainResult;
use crate::shared::PaginatedList;

#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Filter, order and slice the student table into one page.
    async fn list_page(
        &self,
        query: &StudentQuery,
        requested_page: Option<i64>,
        page_size: NonZeroU64,
    ) -> DomainResult<PaginatedList<Student>>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Student>>;

    /// Student with enrollments and their courses.
    async fn find_with_enrollments(&self, id: i32) -> DomainResult<Option<StudentDetails>>;

    async fn create(&self, fields: StudentFields) -> DomainResult<Student>;

    /// Write `fields` to the row keyed by `id` without reading it first.
    async fn update(&self, id: i32, fields: StudentFields) -> DomainResult<WriteOutcome>;

    /// Delete the row keyed by `id` without reading it first.
    async fn delete(&self, id: i32) -> DomainResult<WriteOutcome>;
}
