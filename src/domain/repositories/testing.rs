//! In-memory repositories whose writes fail in a chosen way.

use std::num::NonZeroU64;

use async_trait::async_trait;
use chrono::NaiveDate;

use super::{DomainResult, RepositoryProvider, WriteOutcome};
use crate::domain::school::{EnrollmentDateGroup, StatisticsRepository};
use crate::domain::student::{
    Student, StudentDetails, StudentFields, StudentQuery, StudentRepository,
};
use crate::shared::errors::DomainError;
use crate::shared::PaginatedList;

pub(crate) fn storage_error() -> DomainResult<WriteOutcome> {
    Err(DomainError::Storage("disk I/O error".into()))
}

pub(crate) fn conflict() -> DomainResult<WriteOutcome> {
    Ok(WriteOutcome::Conflict("FOREIGN KEY constraint failed".into()))
}

fn student(id: i32) -> Student {
    Student {
        id,
        last_name: "Alexander".into(),
        first_mid_name: "Carson".into(),
        enrollment_date: NaiveDate::from_ymd_opt(2010, 9, 1).unwrap(),
    }
}

/// Every id exists on read; every write answers with `write`.
pub(crate) struct FailingStudents {
    write: fn() -> DomainResult<WriteOutcome>,
}

#[async_trait]
impl StudentRepository for FailingStudents {
    async fn list_page(
        &self,
        _query: &StudentQuery,
        requested_page: Option<i64>,
        page_size: NonZeroU64,
    ) -> DomainResult<PaginatedList<Student>> {
        let page = crate::shared::normalize_page(requested_page);
        Ok(PaginatedList::from_parts(vec![student(1)], 1, page, page_size))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Student>> {
        Ok(Some(student(id)))
    }

    async fn find_with_enrollments(&self, id: i32) -> DomainResult<Option<StudentDetails>> {
        Ok(Some(StudentDetails {
            student: student(id),
            enrollments: Vec::new(),
        }))
    }

    async fn create(&self, _fields: StudentFields) -> DomainResult<Student> {
        (self.write)()?;
        Err(DomainError::Storage("insert rejected".into()))
    }

    async fn update(&self, _id: i32, _fields: StudentFields) -> DomainResult<WriteOutcome> {
        (self.write)()
    }

    async fn delete(&self, _id: i32) -> DomainResult<WriteOutcome> {
        (self.write)()
    }
}

pub(crate) struct NoStatistics;

#[async_trait]
impl StatisticsRepository for NoStatistics {
    async fn enrollment_date_groups(&self) -> DomainResult<Vec<EnrollmentDateGroup>> {
        Ok(Vec::new())
    }
}

pub(crate) struct FailingRepositories {
    students: FailingStudents,
    statistics: NoStatistics,
}

impl FailingRepositories {
    pub(crate) fn new(write: fn() -> DomainResult<WriteOutcome>) -> Self {
        Self {
            students: FailingStudents { write },
            statistics: NoStatistics,
        }
    }
}

impl RepositoryProvider for FailingRepositories {
    fn students(&self) -> &dyn StudentRepository {
        &self.students
    }

    fn statistics(&self) -> &dyn StatisticsRepository {
        &self.statistics
    }
}
