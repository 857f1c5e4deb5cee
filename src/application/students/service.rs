//! Student service: application-layer orchestration
//!
//! HTTP handlers stay thin and delegate here. Writes go through one of two
//! strategies chosen at start-up; both report failures the same way.

use std::num::NonZeroU64;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use validator::ValidationErrors;

use super::listing::{StudentListRequest, StudentsListView};
use crate::domain::{
    DomainError, DomainResult, RepositoryProvider, Student, StudentDetails, StudentInput,
    WriteOutcome,
};

/// Form-level message shown for any failed create or edit.
pub const SAVE_FAILED_MESSAGE: &str =
    "Unable to save changes. Try again, and if the problem persists see your system administrator.";

/// Message on the delete confirmation page after a failed delete.
pub const DELETE_FAILED_MESSAGE: &str =
    "Delete failed. Try again, and if the problem persists see your system administrator.";

/// How edits and deletes reach the database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationStrategy {
    /// Load the row, then write it back. A missing row is reported as such.
    ReadThenWrite,
    /// Write by key in one round trip; absence shows up only in the result.
    #[default]
    Optimistic,
}

impl MutationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReadThenWrite => "read_then_write",
            Self::Optimistic => "optimistic",
        }
    }
}

/// Why a student write did not go through
#[derive(Debug, Error)]
pub enum StudentWriteError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// The row was looked up before writing and is not there
    #[error("Student {0} not found")]
    NotFound(i32),

    /// The write itself failed; the reason is for logs only
    #[error("Save failed: {0}")]
    SaveFailed(String),
}

/// Result of a delete request that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Read-then-write found nothing to delete
    Missing,
}

fn record_write(operation: &'static str, outcome: &'static str) {
    metrics::counter!("student_writes_total", "operation" => operation, "outcome" => outcome)
        .increment(1);
}

/// Turn a repository write result into the service's answer.
fn settle(
    operation: &'static str,
    id: i32,
    result: DomainResult<WriteOutcome>,
) -> Result<(), StudentWriteError> {
    match result {
        Ok(WriteOutcome::Applied) => {
            record_write(operation, "applied");
            info!(student_id = id, operation, "Student write applied");
            Ok(())
        }
        Ok(outcome) => {
            record_write(operation, outcome.label());
            warn!(student_id = id, operation, outcome = outcome.label(), "Student write not applied");
            Err(StudentWriteError::SaveFailed(format!(
                "{operation} of student {id}: {outcome:?}"
            )))
        }
        Err(e) => {
            record_write(operation, "error");
            warn!(student_id = id, operation, error = %e, "Student write failed");
            Err(StudentWriteError::SaveFailed(e.to_string()))
        }
    }
}

/// Orchestrates the student list and CRUD use-cases.
pub struct StudentService {
    repos: Arc<dyn RepositoryProvider>,
    strategy: MutationStrategy,
    page_size: NonZeroU64,
}

impl StudentService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        strategy: MutationStrategy,
        page_size: NonZeroU64,
    ) -> Self {
        Self {
            repos,
            strategy,
            page_size,
        }
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Search, sort and page the student list.
    pub async fn list(&self, request: &StudentListRequest) -> DomainResult<StudentsListView> {
        let query = request.query();
        let page = self
            .repos
            .students()
            .list_page(&query, request.effective_page(), self.page_size)
            .await?;

        Ok(StudentsListView::new(request, page))
    }

    pub async fn find(&self, id: i32) -> DomainResult<Student> {
        self.repos
            .students()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Student", id))
    }

    /// Student with enrollments and their courses.
    pub async fn details(&self, id: i32) -> DomainResult<StudentDetails> {
        self.repos
            .students()
            .find_with_enrollments(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Student", id))
    }

    // ── Writes ──────────────────────────────────────────────────

    /// Validate and insert a new student. The id is always generated.
    pub async fn create(&self, input: StudentInput) -> Result<Student, StudentWriteError> {
        let fields = input.validated().map_err(|errors| {
            record_write("create", "invalid");
            StudentWriteError::Validation(errors)
        })?;

        match self.repos.students().create(fields).await {
            Ok(student) => {
                record_write("create", "applied");
                Ok(student)
            }
            Err(e) => {
                record_write("create", "error");
                warn!(error = %e, "Student create failed");
                Err(StudentWriteError::SaveFailed(e.to_string()))
            }
        }
    }

    /// Overwrite the editable fields of student `id`.
    pub async fn edit(&self, id: i32, input: StudentInput) -> Result<(), StudentWriteError> {
        if self.strategy == MutationStrategy::ReadThenWrite {
            let existing = self
                .repos
                .students()
                .find_by_id(id)
                .await
                .map_err(|e| StudentWriteError::SaveFailed(e.to_string()))?;
            if existing.is_none() {
                record_write("edit", "not_found");
                return Err(StudentWriteError::NotFound(id));
            }
        }

        let fields = input.validated().map_err(|errors| {
            record_write("edit", "invalid");
            StudentWriteError::Validation(errors)
        })?;

        let result = self.repos.students().update(id, fields).await;
        settle("edit", id, result)
    }

    /// Remove student `id` and, through the schema, its enrollments.
    pub async fn delete(&self, id: i32) -> Result<DeleteOutcome, StudentWriteError> {
        if self.strategy == MutationStrategy::ReadThenWrite {
            let existing = self
                .repos
                .students()
                .find_by_id(id)
                .await
                .map_err(|e| StudentWriteError::SaveFailed(e.to_string()))?;
            if existing.is_none() {
                record_write("delete", "missing");
                return Ok(DeleteOutcome::Missing);
            }
        }

        let result = self.repos.students().delete(id).await;
        settle("delete", id, result).map(|()| DeleteOutcome::Deleted)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::repositories::testing::{conflict, storage_error, FailingRepositories};
    use crate::infrastructure::database::testing::seeded_database;
    use crate::infrastructure::SeaOrmRepositoryProvider;

    async fn service(strategy: MutationStrategy) -> StudentService {
        let repos = Arc::new(SeaOrmRepositoryProvider::new(seeded_database().await));
        StudentService::new(repos, strategy, NonZeroU64::new(3).unwrap())
    }

    fn input(last: &str) -> StudentInput {
        StudentInput {
            last_name: last.into(),
            first_mid_name: "Grace".into(),
            enrollment_date: NaiveDate::from_ymd_opt(2019, 9, 1),
        }
    }

    #[tokio::test]
    async fn list_applies_request_parameters() {
        let svc = service(MutationStrategy::Optimistic).await;
        let request = StudentListRequest {
            sort_order: Some("date_asc".into()),
            current_filter: Some("an".into()),
            page_number: Some(2),
            ..Default::default()
        };

        let view = svc.list(&request).await.unwrap();

        // Alexander, Li, Anand, Norman by date
        assert_eq!(view.students.page_index(), 2);
        assert_eq!(view.students.total_pages(), 2);
        assert_eq!(view.students.items()[0].last_name, "Norman");
        assert_eq!(view.current_filter, "an");
    }

    #[tokio::test]
    async fn details_of_missing_student_is_not_found() {
        let svc = service(MutationStrategy::Optimistic).await;
        let err = svc.details(404).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn create_with_empty_last_name_persists_nothing() {
        let svc = service(MutationStrategy::Optimistic).await;

        let err = svc.create(input("")).await.unwrap_err();
        assert!(matches!(err, StudentWriteError::Validation(_)));

        let all = svc
            .list(&StudentListRequest {
                page_number: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(all.students.total_count(), 8);
    }

    #[tokio::test]
    async fn create_persists_the_student() {
        let svc = service(MutationStrategy::Optimistic).await;
        let created = svc.create(input("Hopper")).await.unwrap();
        assert_eq!(svc.find(created.id).await.unwrap().last_name, "Hopper");
    }

    #[tokio::test]
    async fn read_then_write_edit_of_missing_is_not_found() {
        let svc = service(MutationStrategy::ReadThenWrite).await;
        let err = svc.edit(77, input("Ghost")).await.unwrap_err();
        assert!(matches!(err, StudentWriteError::NotFound(77)));
    }

    #[tokio::test]
    async fn optimistic_edit_of_missing_is_a_save_failure() {
        let svc = service(MutationStrategy::Optimistic).await;
        let err = svc.edit(77, input("Ghost")).await.unwrap_err();
        assert!(matches!(err, StudentWriteError::SaveFailed(_)));
    }

    #[tokio::test]
    async fn edit_updates_both_ways() {
        for strategy in [MutationStrategy::ReadThenWrite, MutationStrategy::Optimistic] {
            let svc = service(strategy).await;
            svc.edit(3, input("Anand-Rao")).await.unwrap();
            assert_eq!(svc.find(3).await.unwrap().last_name, "Anand-Rao");
        }
    }

    #[tokio::test]
    async fn invalid_edit_leaves_row_untouched() {
        let svc = service(MutationStrategy::Optimistic).await;
        let err = svc.edit(3, input(" ")).await.unwrap_err();
        assert!(matches!(err, StudentWriteError::Validation(_)));
        assert_eq!(svc.find(3).await.unwrap().last_name, "Anand");
    }

    #[tokio::test]
    async fn delete_of_missing_student_depends_on_strategy() {
        let svc = service(MutationStrategy::ReadThenWrite).await;
        assert_eq!(svc.delete(99).await.unwrap(), DeleteOutcome::Missing);

        let svc = service(MutationStrategy::Optimistic).await;
        let err = svc.delete(99).await.unwrap_err();
        assert!(matches!(err, StudentWriteError::SaveFailed(_)));
    }

    #[tokio::test]
    async fn delete_removes_the_student() {
        let svc = service(MutationStrategy::Optimistic).await;
        assert_eq!(svc.delete(8).await.unwrap(), DeleteOutcome::Deleted);
        assert!(svc.find(8).await.is_err());
    }

    fn failing_service(
        strategy: MutationStrategy,
        write: fn() -> DomainResult<WriteOutcome>,
    ) -> StudentService {
        let repos = Arc::new(FailingRepositories::new(write));
        StudentService::new(repos, strategy, NonZeroU64::new(3).unwrap())
    }

    #[tokio::test]
    async fn storage_errors_and_conflicts_are_save_failures() {
        let writes: [fn() -> DomainResult<WriteOutcome>; 2] = [storage_error, conflict];
        for strategy in [MutationStrategy::ReadThenWrite, MutationStrategy::Optimistic] {
            for write in writes {
                let svc = failing_service(strategy, write);

                let err = svc.edit(1, input("Alexander")).await.unwrap_err();
                assert!(matches!(err, StudentWriteError::SaveFailed(_)), "{strategy:?}");

                let err = svc.delete(1).await.unwrap_err();
                assert!(matches!(err, StudentWriteError::SaveFailed(_)), "{strategy:?}");

                let err = svc.create(input("Alexander")).await.unwrap_err();
                assert!(matches!(err, StudentWriteError::SaveFailed(_)), "{strategy:?}");
            }
        }
    }

    #[tokio::test]
    async fn validation_runs_before_a_failing_write() {
        let svc = failing_service(MutationStrategy::Optimistic, storage_error);
        let err = svc.edit(1, input("")).await.unwrap_err();
        assert!(matches!(err, StudentWriteError::Validation(_)));
    }

    #[test]
    fn strategy_reads_from_config_values() {
        #[derive(Deserialize)]
        struct Wrapper {
            strategy: MutationStrategy,
        }
        let parsed: Wrapper = toml::from_str("strategy = \"read_then_write\"").unwrap();
        assert_eq!(parsed.strategy, MutationStrategy::ReadThenWrite);
        assert_eq!(MutationStrategy::default().as_str(), "optimistic");
    }
}
